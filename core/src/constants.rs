/// Bytes of addressable memory (0x000..=0xFFF)
pub const MEMORY_SIZE: usize = 0x1000;

/// Where ROMs are loaded and execution begins; everything below is reserved
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Depth of the return-address stack
pub const STACK_SIZE: usize = 16;

/// Number of general purpose registers (V0..VF)
pub const REGISTER_COUNT: usize = 16;

/// Index of VF, the flag register
pub const FLAG_REGISTER: usize = 0xF;

/// Number of keys on the hexadecimal keypad
pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Width in bytes of a single instruction
pub const INSTRUCTION_SIZE: u16 = 2;

/// Frequency at which the host should call `Chip8::tick_timers`
pub const TIMER_FREQUENCY: u32 = 60;

/// A conventional CPU speed for hosts; Chip-8 itself defines no clock
pub const CLOCK_SPEED: u32 = 500;

/// Start of the built-in hexadecimal sprites
pub const FONT_START: u16 = 0x050;

/// Height in bytes of a single font sprite
pub const FONT_SPRITE_HEIGHT: u16 = 5;

/// # Font
/// 16 sprites for the hexadecimal digits 0..F, 5 rows each.
///
/// Only the high nibble of each row is drawn, so every glyph is 4 pixels wide:
/// ```text
/// 0xF0  ████
/// 0x90  █  █
/// 0x90  █  █
/// 0x90  █  █
/// 0xF0  ████
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
