use std::fmt;

use rand::RngCore;

use crate::error::Fault;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// A decoded Chip-8 instruction with its operands.
///
/// Registers are named by their index (`x`, `y` in 0x0..=0xF), addresses are 12 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Cls,
    /// 00EE
    Ret,
    /// 1nnn
    Jump { addr: u16 },
    /// 2nnn
    Call { addr: u16 },
    /// 3xkk
    SkipEqImm { x: u8, kk: u8 },
    /// 4xkk
    SkipNeImm { x: u8, kk: u8 },
    /// 5xy_
    SkipEqReg { x: u8, y: u8 },
    /// 6xkk
    LoadImm { x: u8, kk: u8 },
    /// 7xkk
    AddImm { x: u8, kk: u8 },
    /// 8xy0
    Move { x: u8, y: u8 },
    /// 8xy1
    Or { x: u8, y: u8 },
    /// 8xy2
    And { x: u8, y: u8 },
    /// 8xy3
    Xor { x: u8, y: u8 },
    /// 8xy4
    AddReg { x: u8, y: u8 },
    /// 8xy5
    Sub { x: u8, y: u8 },
    /// 8x_6
    ShiftRight { x: u8 },
    /// 8xy7
    SubN { x: u8, y: u8 },
    /// 8x_E
    ShiftLeft { x: u8 },
    /// 9xy_
    SkipNeReg { x: u8, y: u8 },
    /// Annn
    LoadIndex { addr: u16 },
    /// Bnnn
    JumpV0 { addr: u16 },
    /// Cxkk
    Random { x: u8, kk: u8 },
    /// Dxyn
    Draw { x: u8, y: u8, n: u8 },
    /// Ex9E
    SkipKeyDown { x: u8 },
    /// ExA1
    SkipKeyUp { x: u8 },
    /// Fx07
    LoadDelay { x: u8 },
    /// Fx0A
    WaitKey { x: u8 },
    /// Fx15
    SetDelay { x: u8 },
    /// Fx18
    SetSound { x: u8 },
    /// Fx1E
    AddIndex { x: u8 },
    /// Fx29
    LoadFont { x: u8 },
    /// Fx33
    StoreBcd { x: u8 },
    /// Fx55
    StoreRegisters { x: u8 },
    /// Fx65
    LoadRegisters { x: u8 },
}

impl Instruction {
    /// Selects the Instruction for a raw opcode.
    ///
    /// Every opcode maps to at most one instruction; anything else is an `InvalidInstruction`.
    pub fn decode(op: u16) -> Result<Self, Fault> {
        use Instruction::*;

        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Cls,
            (0x0, 0x0, 0xE, 0xE) => Ret,
            (0x1, ..) => Jump { addr: op.nnn() },
            (0x2, ..) => Call { addr: op.nnn() },
            (0x3, x, ..) => SkipEqImm { x, kk: op.kk() },
            (0x4, x, ..) => SkipNeImm { x, kk: op.kk() },
            (0x5, x, y, _) => SkipEqReg { x, y },
            (0x6, x, ..) => LoadImm { x, kk: op.kk() },
            (0x7, x, ..) => AddImm { x, kk: op.kk() },
            (0x8, x, y, 0x0) => Move { x, y },
            (0x8, x, y, 0x1) => Or { x, y },
            (0x8, x, y, 0x2) => And { x, y },
            (0x8, x, y, 0x3) => Xor { x, y },
            (0x8, x, y, 0x4) => AddReg { x, y },
            (0x8, x, y, 0x5) => Sub { x, y },
            (0x8, x, _, 0x6) => ShiftRight { x },
            (0x8, x, y, 0x7) => SubN { x, y },
            (0x8, x, _, 0xE) => ShiftLeft { x },
            (0x9, x, y, _) => SkipNeReg { x, y },
            (0xA, ..) => LoadIndex { addr: op.nnn() },
            (0xB, ..) => JumpV0 { addr: op.nnn() },
            (0xC, x, ..) => Random { x, kk: op.kk() },
            (0xD, x, y, n) => Draw { x, y, n },
            (0xE, x, 0x9, 0xE) => SkipKeyDown { x },
            (0xE, x, 0xA, 0x1) => SkipKeyUp { x },
            (0xF, x, 0x0, 0x7) => LoadDelay { x },
            (0xF, x, 0x0, 0xA) => WaitKey { x },
            (0xF, x, 0x1, 0x5) => SetDelay { x },
            (0xF, x, 0x1, 0x8) => SetSound { x },
            (0xF, x, 0x1, 0xE) => AddIndex { x },
            (0xF, x, 0x2, 0x9) => LoadFont { x },
            (0xF, x, 0x3, 0x3) => StoreBcd { x },
            (0xF, x, 0x5, 0x5) => StoreRegisters { x },
            (0xF, x, 0x6, 0x5) => LoadRegisters { x },
            _ => return Err(Fault::InvalidInstruction { opcode: op }),
        };
        Ok(instruction)
    }

    /// Applies the instruction to `state`.
    ///
    /// On error `state` is left exactly as it was.
    pub fn execute(self, state: &mut State, rng: &mut dyn RngCore) -> Result<(), Fault> {
        use Instruction::*;

        match self {
            Cls => clr(state),
            Ret => rts(state)?,
            Jump { addr } => jump(state, addr),
            Call { addr } => call(state, addr)?,
            SkipEqImm { x, kk } => ske(state, x, kk),
            SkipNeImm { x, kk } => skne(state, x, kk),
            SkipEqReg { x, y } => skre(state, x, y),
            LoadImm { x, kk } => load(state, x, kk),
            AddImm { x, kk } => add(state, x, kk),
            Move { x, y } => mv(state, x, y),
            Or { x, y } => or(state, x, y),
            And { x, y } => and(state, x, y),
            Xor { x, y } => xor(state, x, y),
            AddReg { x, y } => addr(state, x, y),
            Sub { x, y } => sub(state, x, y),
            ShiftRight { x } => shr(state, x),
            SubN { x, y } => subn(state, x, y),
            ShiftLeft { x } => shl(state, x),
            SkipNeReg { x, y } => skrne(state, x, y),
            LoadIndex { addr } => loadi(state, addr),
            JumpV0 { addr } => jumpi(state, addr),
            Random { x, kk } => rand(state, x, kk, rng),
            Draw { x, y, n } => draw(state, x, y, n)?,
            SkipKeyDown { x } => skpr(state, x),
            SkipKeyUp { x } => skup(state, x),
            LoadDelay { x } => moved(state, x),
            WaitKey { x } => keyd(state, x),
            SetDelay { x } => loads(state, x),
            SetSound { x } => ld(state, x),
            AddIndex { x } => addi(state, x),
            LoadFont { x } => ldspr(state, x),
            StoreBcd { x } => bcd(state, x)?,
            StoreRegisters { x } => stor(state, x)?,
            LoadRegisters { x } => read(state, x)?,
        }
        Ok(())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Cls => write!(f, "CLS"),
            Ret => write!(f, "RET"),
            Jump { addr } => write!(f, "JP {addr:#05X}"),
            Call { addr } => write!(f, "CALL {addr:#05X}"),
            SkipEqImm { x, kk } => write!(f, "SE V{x:X}, {kk:#04X}"),
            SkipNeImm { x, kk } => write!(f, "SNE V{x:X}, {kk:#04X}"),
            SkipEqReg { x, y } => write!(f, "SE V{x:X}, V{y:X}"),
            LoadImm { x, kk } => write!(f, "LD V{x:X}, {kk:#04X}"),
            AddImm { x, kk } => write!(f, "ADD V{x:X}, {kk:#04X}"),
            Move { x, y } => write!(f, "LD V{x:X}, V{y:X}"),
            Or { x, y } => write!(f, "OR V{x:X}, V{y:X}"),
            And { x, y } => write!(f, "AND V{x:X}, V{y:X}"),
            Xor { x, y } => write!(f, "XOR V{x:X}, V{y:X}"),
            AddReg { x, y } => write!(f, "ADD V{x:X}, V{y:X}"),
            Sub { x, y } => write!(f, "SUB V{x:X}, V{y:X}"),
            ShiftRight { x } => write!(f, "SHR V{x:X}"),
            SubN { x, y } => write!(f, "SUBN V{x:X}, V{y:X}"),
            ShiftLeft { x } => write!(f, "SHL V{x:X}"),
            SkipNeReg { x, y } => write!(f, "SNE V{x:X}, V{y:X}"),
            LoadIndex { addr } => write!(f, "LD I, {addr:#05X}"),
            JumpV0 { addr } => write!(f, "JP V0, {addr:#05X}"),
            Random { x, kk } => write!(f, "RND V{x:X}, {kk:#04X}"),
            Draw { x, y, n } => write!(f, "DRW V{x:X}, V{y:X}, {n}"),
            SkipKeyDown { x } => write!(f, "SKP V{x:X}"),
            SkipKeyUp { x } => write!(f, "SKNP V{x:X}"),
            LoadDelay { x } => write!(f, "LD V{x:X}, DT"),
            WaitKey { x } => write!(f, "LD V{x:X}, K"),
            SetDelay { x } => write!(f, "LD DT, V{x:X}"),
            SetSound { x } => write!(f, "LD ST, V{x:X}"),
            AddIndex { x } => write!(f, "ADD I, V{x:X}"),
            LoadFont { x } => write!(f, "LD F, V{x:X}"),
            StoreBcd { x } => write!(f, "LD B, V{x:X}"),
            StoreRegisters { x } => write!(f, "LD [I], V{x:X}"),
            LoadRegisters { x } => write!(f, "LD V{x:X}, [I]"),
        }
    }
}
