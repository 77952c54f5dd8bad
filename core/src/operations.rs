use rand::{Rng, RngCore};

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_SPRITE_HEIGHT, FONT_START, REGISTER_COUNT,
};
use crate::error::Fault;
use crate::state::State;

/// Sprites are at most 15 rows tall
const MAX_SPRITE_HEIGHT: usize = 15;

/// clear
pub fn clr(state: &mut State) {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
    state.advance();
}

/// PC = STACK.pop()
/// Resumes at the address the matching CALL pushed
pub fn rts(state: &mut State) -> Result<(), Fault> {
    state.pc = state.pop()?;
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) {
    state.pc = addr;
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16) -> Result<(), Fault> {
    state.push(state.pc)?;
    state.pc = addr;
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut State, x: u8, kk: u8) {
    state.skip_if(state.register(x) == kk);
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut State, x: u8, kk: u8) {
    state.skip_if(state.register(x) != kk);
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: u8, y: u8) {
    state.skip_if(state.register(x) == state.register(y));
}

/// Vx = kk
pub fn load(state: &mut State, x: u8, kk: u8) {
    *state.register_mut(x) = kk;
    state.advance();
}

/// Vx += kk
/// Overflow is dropped and VF is untouched
pub fn add(state: &mut State, x: u8, kk: u8) {
    let vx = state.register(x);
    *state.register_mut(x) = vx.wrapping_add(kk);
    state.advance();
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) {
    let vy = state.register(y);
    *state.register_mut(x) = vy;
    state.advance();
}

/// Vx |= Vy
pub fn or(state: &mut State, x: u8, y: u8) {
    let vy = state.register(y);
    *state.register_mut(x) |= vy;
    state.advance();
}

/// Vx &= Vy
pub fn and(state: &mut State, x: u8, y: u8) {
    let vy = state.register(y);
    *state.register_mut(x) &= vy;
    state.advance();
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: u8, y: u8) {
    let vy = state.register(y);
    *state.register_mut(x) ^= vy;
    state.advance();
}

// The flag-setting ALU operations compute both the flag and the result from the operands
// as they were before the instruction, then write VF followed by Vx.

/// Vx += Vy; VF = overflow
pub fn addr(state: &mut State, x: u8, y: u8) {
    let (res, over) = state.register(x).overflowing_add(state.register(y));
    state.set_flag(over);
    *state.register_mut(x) = res;
    state.advance();
}

/// Vx -= Vy; VF = !underflow
pub fn sub(state: &mut State, x: u8, y: u8) {
    let (res, under) = state.register(x).overflowing_sub(state.register(y));
    state.set_flag(!under);
    *state.register_mut(x) = res;
    state.advance();
}

/// Vx >>= 1; VF = lsb
pub fn shr(state: &mut State, x: u8) {
    let vx = state.register(x);
    state.set_flag(vx & 0x1 == 0x1);
    *state.register_mut(x) = vx >> 1;
    state.advance();
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(state: &mut State, x: u8, y: u8) {
    let (res, under) = state.register(y).overflowing_sub(state.register(x));
    state.set_flag(!under);
    *state.register_mut(x) = res;
    state.advance();
}

/// Vx <<= 1; VF = msb
pub fn shl(state: &mut State, x: u8) {
    let vx = state.register(x);
    state.set_flag(vx >> 7 == 0x1);
    *state.register_mut(x) = vx << 1;
    state.advance();
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &mut State, x: u8, y: u8) {
    state.skip_if(state.register(x) != state.register(y));
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) {
    state.i = addr;
    state.advance();
}

/// PC = V0 + addr
pub fn jumpi(state: &mut State, addr: u16) {
    state.pc = u16::from(state.register(0x0)).wrapping_add(addr);
}

/// Vx = rand_byte & kk
pub fn rand(state: &mut State, x: u8, kk: u8, rng: &mut dyn RngCore) {
    let rand_byte: u8 = rng.gen();
    *state.register_mut(x) = rand_byte & kk;
    state.advance();
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixel is erased
pub fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Result<(), Fault> {
    let height = usize::from(n).min(MAX_SPRITE_HEIGHT);
    let mut sprite = [0; MAX_SPRITE_HEIGHT];
    sprite[..height].copy_from_slice(state.read_memory(state.i, height)?);

    let origin_x = usize::from(state.register(x)) % DISPLAY_WIDTH;
    let origin_y = usize::from(state.register(y)) % DISPLAY_HEIGHT;
    let mut collision = false;

    for (row, byte) in sprite[..height].iter().enumerate() {
        let y = (origin_y + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            if (byte >> (7 - bit)) & 0x1 == 0 {
                continue;
            }
            let x = (origin_x + bit) % DISPLAY_WIDTH;
            let pixel = &mut state.frame_buffer[y][x];
            collision |= *pixel == 0x1;
            *pixel ^= 0x1;
        }
    }

    state.set_flag(collision);
    state.draw_flag = true;
    state.advance();
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, x: u8) {
    state.skip_if(state.is_key_down(state.register(x)));
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, x: u8) {
    state.skip_if(!state.is_key_down(state.register(x)));
}

/// Vx = DT
pub fn moved(state: &mut State, x: u8) {
    let delay = state.delay_timer;
    *state.register_mut(x) = delay;
    state.advance();
}

/// await keypress for Vx
/// The pc stays on this instruction until the key arrives
pub fn keyd(state: &mut State, x: u8) {
    state.register_needing_key = Some(x);
}

/// DT = Vx
pub fn loads(state: &mut State, x: u8) {
    state.delay_timer = state.register(x);
    state.advance();
}

/// ST = Vx
pub fn ld(state: &mut State, x: u8) {
    state.sound_timer = state.register(x);
    state.advance();
}

/// I += Vx
pub fn addi(state: &mut State, x: u8) {
    state.i = state.i.wrapping_add(u16::from(state.register(x)));
    state.advance();
}

/// I = FONT_START + Vx * 5
/// Set I to the memory address of the sprite for the digit in Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(state: &mut State, x: u8) {
    let digit = u16::from(state.register(x) & 0xF);
    state.i = FONT_START + digit * FONT_SPRITE_HEIGHT;
    state.advance();
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, x: u8) -> Result<(), Fault> {
    let vx = state.register(x);
    let bcd = [vx / 100, vx / 10 % 10, vx % 10];
    state.write_memory(state.i, &bcd)?;
    state.advance();
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &mut State, x: u8) -> Result<(), Fault> {
    let count = (usize::from(x) + 1).min(REGISTER_COUNT);
    let v = state.v;
    state.write_memory(state.i, &v[..count])?;
    state.advance();
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, x: u8) -> Result<(), Fault> {
    let count = (usize::from(x) + 1).min(REGISTER_COUNT);
    let range = state.memory_range(state.i, count)?;
    state.v[..count].copy_from_slice(&state.memory[range]);
    state.advance();
    Ok(())
}
