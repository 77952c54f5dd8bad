use std::ops::Range;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG_REGISTER, FONT_START, INSTRUCTION_SIZE, KEY_COUNT,
    MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, SPRITE_SHEET, STACK_SIZE,
};
use crate::error::Fault;
use crate::opcode;

/// The FrameBuffer is indexed as [y][x]; each pixel is 0 (off) or 1 (on)
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// A snapshot of the Chip-8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of addresses on the stack; 0 is empty, 16 is full
///
/// Timers
/// - 2 8-bit timers (delay & sound), counted down by the host at 60Hz
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x050..0x0A0 holds the font
///     - 0x200.. holds the loaded ROM
/// - 32x64 frame buffer
///
/// ## Input
/// - the pressed status of keys 0..F
/// - execution is suspended while a register is waiting for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub keys: [bool; KEY_COUNT],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub register_needing_key: Option<u8>,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        memory[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_SIZE],
            memory,
            delay_timer: 0,
            sound_timer: 0,
            keys: [false; KEY_COUNT],
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            register_needing_key: None,
        }
    }

    /// The instruction at the program counter.
    /// Both of its bytes must lie in memory.
    pub fn fetch(&self) -> Result<u16, Fault> {
        let range = self.memory_range(self.pc, INSTRUCTION_SIZE as usize)?;
        Ok(opcode::from_bytes(
            self.memory[range.start],
            self.memory[range.start + 1],
        ))
    }

    /// Checks that `len` bytes starting at `start` are all addressable.
    ///
    /// Out of range accesses are rejected rather than wrapped; the reported address is the
    /// first byte that falls outside memory.
    pub fn memory_range(&self, start: u16, len: usize) -> Result<Range<usize>, Fault> {
        let start = usize::from(start);
        let end = start + len;
        if end > MEMORY_SIZE {
            let address = start.max(MEMORY_SIZE) as u16;
            return Err(Fault::InvalidAddress { address });
        }
        Ok(start..end)
    }

    pub fn read_memory(&self, start: u16, len: usize) -> Result<&[u8], Fault> {
        let range = self.memory_range(start, len)?;
        Ok(&self.memory[range])
    }

    pub fn write_memory(&mut self, start: u16, bytes: &[u8]) -> Result<(), Fault> {
        let range = self.memory_range(start, bytes.len())?;
        self.memory[range].copy_from_slice(bytes);
        Ok(())
    }

    pub fn register(&self, x: u8) -> u8 {
        self.v[usize::from(x)]
    }

    pub fn register_mut(&mut self, x: u8) -> &mut u8 {
        &mut self.v[usize::from(x)]
    }

    pub fn set_flag(&mut self, flag: bool) {
        self.v[FLAG_REGISTER] = u8::from(flag);
    }

    /// Moves on to the next instruction
    pub fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(INSTRUCTION_SIZE);
    }

    /// Moves past the next instruction if `condition` holds, otherwise onto it
    pub fn skip_if(&mut self, condition: bool) {
        self.advance();
        if condition {
            self.advance();
        }
    }

    pub fn push(&mut self, address: u16) -> Result<(), Fault> {
        let sp = usize::from(self.sp);
        if sp >= STACK_SIZE {
            return Err(Fault::StackOverflow);
        }
        self.stack[sp] = address;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Fault> {
        if self.sp == 0 {
            return Err(Fault::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[usize::from(self.sp)])
    }

    /// Whether key `key` is down; only the low nibble of `key` names a key
    pub fn is_key_down(&self, key: u8) -> bool {
        self.keys[usize::from(key & 0xF)]
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = State::new();
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.sp, 0);
        assert_eq!(state.memory[0x050..0x0A0], SPRITE_SHEET[..]);
        assert!(state.memory[..0x050].iter().all(|&b| b == 0));
        assert!(state.memory[0x0A0..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fetch() {
        let mut state = State::new();
        state.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(state.fetch(), Ok(0xAABB));
    }

    #[test]
    fn test_fetch_needs_both_bytes_in_memory() {
        let mut state = State::new();
        state.pc = 0xFFE;
        assert!(state.fetch().is_ok());
        state.pc = 0xFFF;
        assert_eq!(
            state.fetch(),
            Err(Fault::InvalidAddress { address: 0x1000 })
        );
        state.pc = 0x1234;
        assert_eq!(
            state.fetch(),
            Err(Fault::InvalidAddress { address: 0x1234 })
        );
    }

    #[test]
    fn test_memory_range_rejects_overflow() {
        let state = State::new();
        assert_eq!(state.memory_range(0xFFD, 3), Ok(0xFFD..0x1000));
        assert_eq!(
            state.memory_range(0xFFE, 3),
            Err(Fault::InvalidAddress { address: 0x1000 })
        );
    }

    #[test]
    fn test_push_pop() {
        let mut state = State::new();
        assert_eq!(state.pop(), Err(Fault::StackUnderflow));
        state.push(0x123).unwrap();
        state.push(0x456).unwrap();
        assert_eq!(state.sp, 2);
        assert_eq!(state.pop(), Ok(0x456));
        assert_eq!(state.pop(), Ok(0x123));
        assert_eq!(state.sp, 0);
    }

    #[test]
    fn test_push_overflows_past_sixteen() {
        let mut state = State::new();
        for address in 0..16 {
            state.push(address).unwrap();
        }
        let before = state;
        assert_eq!(state.push(0xFFF), Err(Fault::StackOverflow));
        assert_eq!(state, before);
    }

    #[test]
    fn test_skip_if() {
        let mut state = State::new();
        state.skip_if(false);
        assert_eq!(state.pc, 0x202);
        state.skip_if(true);
        assert_eq!(state.pc, 0x206);
    }
}
