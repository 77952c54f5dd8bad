use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use emu8_core::{Chip8, CLOCK_SPEED};

#[cfg(not(feature = "sdl"))]
mod headless;
#[cfg(feature = "sdl")]
mod keymap;
#[cfg(feature = "sdl")]
mod run;

/// Runs a Chip-8 ROM
#[derive(Debug, Parser)]
#[command(name = "emu8", version, about)]
pub struct Args {
    /// Path to the ROM image
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = CLOCK_SPEED)]
    clock_speed: u32,

    /// Size multiplier for each pixel of the window
    #[arg(long, default_value_t = 10)]
    scale: u32,

    /// Seed for the random number generator; drawn from the OS when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Instructions to execute before giving up when running headless
    #[arg(long, default_value_t = 10_000)]
    steps: usize,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };

    let rom = match std::fs::read(&args.rom) {
        Ok(rom) => rom,
        Err(e) => {
            error!("unable to read {}: {}", args.rom.display(), e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = chip8.load_rom(&rom) {
        error!("unable to load {}: {}", args.rom.display(), e);
        return ExitCode::FAILURE;
    }
    info!("successfully loaded ROM {}", args.rom.display());

    #[cfg(feature = "sdl")]
    let result = run::run(chip8, &args);
    #[cfg(not(feature = "sdl"))]
    let result = headless::run(chip8, &args);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
