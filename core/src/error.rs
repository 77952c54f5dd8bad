use thiserror::Error;

/// A condition that stops the CPU mid-program.
///
/// Faults are raised before any part of the offending instruction takes effect,
/// so the state a fault is observed in is the state the instruction started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("memory access out of bounds at address {address:#06X}")]
    InvalidAddress { address: u16 },

    #[error("unknown instruction {opcode:#06X}")]
    InvalidInstruction { opcode: u16 },

    #[error("stack overflow: subroutines nested deeper than the 16-level stack")]
    StackOverflow,

    #[error("stack underflow: attempted to return with an empty call stack")]
    StackUnderflow,
}

impl Fault {
    /// Whether this fault came from the call stack
    pub fn is_stack_fault(&self) -> bool {
        matches!(self, Fault::StackOverflow | Fault::StackUnderflow)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Fault(#[from] Fault),

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("key {key:#04X} is not on the keypad (0x0..=0xF)")]
    KeyIndexOutOfRange { key: u8 },
}
