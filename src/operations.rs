use log::info;
use rand::Rng;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_BASE, GLYPH_SIZE, STACK_SIZE};
use crate::error::MachineError;
use crate::opcode::Opcode;
use crate::state::State;

pub type Outcome = Result<(), MachineError>;

/// pc = pc + 2, or pc + 4 when `skip` holds
fn skip_if(state: &mut State, skip: bool) -> Outcome {
    state.pc += if skip { 0x4 } else { 0x2 };
    Ok(())
}

/// stop
pub fn halt(op: Opcode, state: &mut State) -> Outcome {
    info!("halt instruction {} at {:04X}", op, state.pc);
    state.halted = true;
    Ok(())
}

/// stop, and report the opcode
pub fn unknown(op: Opcode, state: &mut State) -> Outcome {
    state.halted = true;
    Err(MachineError::UnknownOpcode { opcode: op.0 })
}

/// clear
pub fn clr(_op: Opcode, state: &mut State) -> Outcome {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
    state.pc += 0x2;
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: Opcode, state: &mut State) -> Outcome {
    if state.sp == 0 {
        state.halted = true;
        return Err(MachineError::StackUnderflow { pc: state.pc });
    }
    state.sp -= 1;
    state.pc = state.stack[state.sp as usize];
    Ok(())
}

/// PC = addr
pub fn jump(op: Opcode, state: &mut State) -> Outcome {
    state.pc = op.nnn();
    Ok(())
}

/// STACK.push(PC + 2); PC = addr
pub fn call(op: Opcode, state: &mut State) -> Outcome {
    if state.sp as usize == STACK_SIZE {
        state.halted = true;
        return Err(MachineError::StackOverflow { pc: state.pc });
    }
    state.stack[state.sp as usize] = state.pc + 0x2;
    state.sp += 1;
    state.pc = op.nnn();
    Ok(())
}

/// if Vx == nn then pc += 2
pub fn ske(op: Opcode, state: &mut State) -> Outcome {
    let skip = state.v[op.x()] == op.nn();
    skip_if(state, skip)
}

/// if Vx != nn then pc += 2
pub fn skne(op: Opcode, state: &mut State) -> Outcome {
    let skip = state.v[op.x()] != op.nn();
    skip_if(state, skip)
}

/// if Vx == Vy then pc += 2
pub fn skre(op: Opcode, state: &mut State) -> Outcome {
    let skip = state.v[op.x()] == state.v[op.y()];
    skip_if(state, skip)
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: Opcode, state: &mut State) -> Outcome {
    let skip = state.v[op.x()] != state.v[op.y()];
    skip_if(state, skip)
}

/// Vx = nn
pub fn load(op: Opcode, state: &mut State) -> Outcome {
    state.v[op.x()] = op.nn();
    state.pc += 0x2;
    Ok(())
}

/// Vx += nn
/// Add nn to Vx; allow for overflow but implicitly drop it
pub fn add(op: Opcode, state: &mut State) -> Outcome {
    state.v[op.x()] = state.v[op.x()].wrapping_add(op.nn());
    state.pc += 0x2;
    Ok(())
}

/// Vx = Vy
pub fn mv(op: Opcode, state: &mut State) -> Outcome {
    state.v[op.x()] = state.v[op.y()];
    state.pc += 0x2;
    Ok(())
}

/// Vx |= Vy
pub fn or(op: Opcode, state: &mut State) -> Outcome {
    state.v[op.x()] |= state.v[op.y()];
    state.pc += 0x2;
    Ok(())
}

/// Vx &= Vy
pub fn and(op: Opcode, state: &mut State) -> Outcome {
    state.v[op.x()] &= state.v[op.y()];
    state.pc += 0x2;
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: Opcode, state: &mut State) -> Outcome {
    state.v[op.x()] ^= state.v[op.y()];
    state.pc += 0x2;
    Ok(())
}

/// Vx += Vy; VF = carry
pub fn addr(op: Opcode, state: &mut State) -> Outcome {
    let (res, carry) = state.v[op.x()].overflowing_add(state.v[op.y()]);
    state.v[op.x()] = res;
    state.set_flag(carry);
    state.pc += 0x2;
    Ok(())
}

/// Vx -= Vy; VF = !borrow
pub fn sub(op: Opcode, state: &mut State) -> Outcome {
    let (res, borrow) = state.v[op.x()].overflowing_sub(state.v[op.y()]);
    state.v[op.x()] = res;
    state.set_flag(!borrow);
    state.pc += 0x2;
    Ok(())
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(op: Opcode, state: &mut State) -> Outcome {
    let (res, borrow) = state.v[op.y()].overflowing_sub(state.v[op.x()]);
    state.v[op.x()] = res;
    state.set_flag(!borrow);
    state.pc += 0x2;
    Ok(())
}

/// Vx >>= 1; VF = the bit shifted out
/// Vy is ignored
pub fn shr(op: Opcode, state: &mut State) -> Outcome {
    let lsb = state.v[op.x()] & 0x1;
    state.v[op.x()] >>= 1;
    state.set_flag(lsb == 1);
    state.pc += 0x2;
    Ok(())
}

/// Vx <<= 1; VF = the bit shifted out
/// Vy is ignored
pub fn shl(op: Opcode, state: &mut State) -> Outcome {
    let msb = state.v[op.x()] >> 7;
    state.v[op.x()] <<= 1;
    state.set_flag(msb == 1);
    state.pc += 0x2;
    Ok(())
}

/// I = addr
pub fn loadi(op: Opcode, state: &mut State) -> Outcome {
    state.i = op.nnn();
    state.pc += 0x2;
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: Opcode, state: &mut State) -> Outcome {
    state.pc = u16::from(state.v[0x0]) + op.nnn();
    Ok(())
}

/// Vx = rand_byte & nn
pub fn rnd(op: Opcode, state: &mut State) -> Outcome {
    let rand_byte: u8 = state.rng.gen();
    state.v[op.x()] = rand_byte & op.nn();
    state.pc += 0x2;
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(op: Opcode, state: &mut State) -> Outcome {
    let sprite = state.span(state.i, op.n() as usize)?;
    let left = state.v[op.x()] as usize % DISPLAY_WIDTH;
    let top = state.v[op.y()] as usize % DISPLAY_HEIGHT;
    let mut collision = false;

    for (row, byte) in state.memory[sprite].iter().enumerate() {
        let y = (top + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            if (byte >> (7 - bit)) & 1 == 0 {
                continue;
            }
            let x = (left + bit) % DISPLAY_WIDTH;
            let pixel = &mut state.frame_buffer[y][x];
            collision |= *pixel == 1;
            *pixel ^= 1;
        }
    }

    state.draw_flag = true;
    state.set_flag(collision);
    state.pc += 0x2;
    Ok(())
}

/// if keys[Vx] is pressed then pc += 2
pub fn skpr(op: Opcode, state: &mut State) -> Outcome {
    let key = (state.v[op.x()] & 0xF) as usize;
    let skip = state.pressed_keys[key];
    skip_if(state, skip)
}

/// if keys[Vx] is not pressed then pc += 2
pub fn skup(op: Opcode, state: &mut State) -> Outcome {
    let key = (state.v[op.x()] & 0xF) as usize;
    let skip = !state.pressed_keys[key];
    skip_if(state, skip)
}

/// Vx = DT
pub fn moved(op: Opcode, state: &mut State) -> Outcome {
    state.v[op.x()] = state.delay_timer;
    state.pc += 0x2;
    Ok(())
}

/// await keypress for Vx
/// The pc stays put until the keypress is seen
pub fn keyd(op: Opcode, state: &mut State) -> Outcome {
    state.register_needing_key = Some(op.x() as u8);
    Ok(())
}

/// DT = Vx
pub fn loadd(op: Opcode, state: &mut State) -> Outcome {
    state.delay_timer = state.v[op.x()];
    state.pc += 0x2;
    Ok(())
}

/// ST = Vx
pub fn loads(op: Opcode, state: &mut State) -> Outcome {
    state.sound_timer = state.v[op.x()];
    state.pc += 0x2;
    Ok(())
}

/// I += Vx
/// VF is left alone
pub fn addi(op: Opcode, state: &mut State) -> Outcome {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x()]));
    state.pc += 0x2;
    Ok(())
}

/// I = FONT_BASE + Vx * 5
/// Set I to the memory address of the glyph for the low nibble of Vx
pub fn ldspr(op: Opcode, state: &mut State) -> Outcome {
    state.i = FONT_BASE + u16::from(state.v[op.x()] & 0xF) * GLYPH_SIZE;
    state.pc += 0x2;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address I
pub fn bcd(op: Opcode, state: &mut State) -> Outcome {
    let value = state.v[op.x()];
    let bcd = [value / 100, value / 10 % 10, value % 10];
    let span = state.span(state.i, bcd.len())?;
    state.memory[span].copy_from_slice(&bcd);
    state.pc += 0x2;
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: Opcode, state: &mut State) -> Outcome {
    let span = state.span(state.i, op.x() + 1)?;
    state.memory[span].copy_from_slice(&state.v[..=op.x()]);
    state.pc += 0x2;
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: Opcode, state: &mut State) -> Outcome {
    let span = state.span(state.i, op.x() + 1)?;
    state.v[..=op.x()].copy_from_slice(&state.memory[span]);
    state.pc += 0x2;
    Ok(())
}
