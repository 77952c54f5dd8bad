pub use chip8::{Chip8, HaltReason, Status};
pub use constants::CLOCK_SPEED;
pub use error::{Error, Fault};
pub use instruction::Instruction;

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
pub mod state;
