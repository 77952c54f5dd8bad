use std::time::{Duration, Instant};

use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use emu8_core::constants::TIMER_FREQUENCY;
use emu8_core::{Chip8, HaltReason, Status};
use emu8_display::Display;

use crate::keymap::keymap;
use crate::Args;

pub fn run(mut chip8: Chip8, args: &Args) -> Result<(), String> {
    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init()?;
    let mut display: Display = Display::new(&sdl, args.scale)?;
    let mut events = sdl.event_pump()?;

    // Set initial timing
    let cycle_time = Duration::from_secs(1) / args.clock_speed.max(1);
    let timer_time = Duration::from_secs(1) / TIMER_FREQUENCY;
    let mut last_cycle = Instant::now();
    let mut last_tick = Instant::now();

    // Whether or not the clock speed should be respected
    let mut fast_forward = false;

    display.render(chip8.frame())?;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => chip8.request_stop(),
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc).map_err(|e| e.to_string())?,
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => chip8.request_stop(),
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_release(kc).map_err(|e| e.to_string())?,
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        match chip8.step() {
            Status::Halted(HaltReason::Stopped) => break 'event,
            Status::Halted(HaltReason::Fault(fault)) => return Err(fault.to_string()),
            Status::Running | Status::AwaitingKey { .. } => {}
        }

        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame)?;
        }

        // Handle timing
        let current_time = Instant::now();
        while current_time - last_tick >= timer_time {
            chip8.tick_timers();
            last_tick += timer_time;
        }
        let elapsed_cycle_time = current_time - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    info!("stopped at pc {:#05X}", chip8.state().pc);
    Ok(())
}
