/// # Opcodes
///
/// A raw Chip-8 instruction is 16 bits, read big-endian from two consecutive bytes.
/// Which instruction it is depends on some combination of:
/// - `[o___]` the family; applies to every instruction
/// - `[___n]` the operation within families 0x8 and (with `[__n_]`) 0xE/0xF
/// - `[_nnn]` a fixed operation without operands (CLS and RET)
///
/// The nibbles that don't select the instruction carry its operands:
/// - `[_nnn]` a 12-bit address
/// - `[__kk]` an 8-bit immediate
/// - `[_x__]` the register Vx, or the last register of the block V0..=Vx
/// - `[__y_]` the register Vy
/// - `[___n]` a sprite height
pub trait Opcode {
    /// The instruction split into its four nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `[o___]`
    fn family(&self) -> u8;

    /// `[_x__]`
    fn x(&self) -> u8;

    /// `[__y_]`
    fn y(&self) -> u8;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__kk]`
    fn kk(&self) -> u8;

    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family(), self.x(), self.y(), self.n())
    }

    fn family(&self) -> u8 {
        (self >> 12) as u8
    }

    fn x(&self) -> u8 {
        ((self >> 8) & 0xF) as u8
    }

    fn y(&self) -> u8 {
        ((self >> 4) & 0xF) as u8
    }

    fn n(&self) -> u8 {
        (self & 0xF) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0xFF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}

/// Joins the two bytes of an instruction as they are laid out in memory.
pub fn from_bytes(high: u8, low: u8) -> u16 {
    u16::from_be_bytes([high, low])
}
