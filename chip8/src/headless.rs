use emu8_core::constants::TIMER_FREQUENCY;
use emu8_core::{Chip8, HaltReason, Status};
use emu8_display::frame_to_text;
use log::info;

use crate::Args;

/// Runs without a window or keyboard.
///
/// Timers tick once every `clock_speed / 60` instructions so a ROM sees the same
/// timer behaviour it would at full speed. Stops at the step budget, on a halt, or
/// on a key wait (nothing can ever press a key), then prints the screen.
pub fn run(mut chip8: Chip8, args: &Args) -> Result<(), String> {
    let status = execute(&mut chip8, args.clock_speed, args.steps);
    println!("{}", frame_to_text(chip8.frame()));
    info!("finished at pc {:#05X}: {:?}", chip8.state().pc, status);

    match status {
        Status::Halted(HaltReason::Fault(fault)) => Err(fault.to_string()),
        _ => Ok(()),
    }
}

fn execute(chip8: &mut Chip8, clock_speed: u32, steps: usize) -> Status {
    let steps_per_tick = (clock_speed / TIMER_FREQUENCY).max(1) as usize;
    let mut executed = 0;

    while executed < steps {
        let budget = steps_per_tick.min(steps - executed);
        let status = chip8.run(budget);
        executed += budget;
        if status != Status::Running {
            return status;
        }
        chip8.tick_timers();
    }
    chip8.status()
}
