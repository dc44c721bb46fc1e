use rand::{Rng, RngCore};

use crate::config::{Quirks, StoreLoad};
use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_SIZE, DISPLAY_WIDTH, FONT_ADDR, FONT_STRIDE, STACK_SIZE,
};
use crate::error::{Error, Region, Result};
use crate::state::{Keypad, State};

/// Everything outside of `State` an instruction may consult
pub struct Peripherals<'a> {
    pub pressed_keys: &'a Keypad,
    pub rng: &'a mut dyn RngCore,
    pub quirks: Quirks,
}

/// clear
pub fn clr(state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        frame_buffer: [0; DISPLAY_SIZE],
        draw_flag: true,
        ..*state
    }
}

/// PC = STACK.pop()
/// The stack holds the address of the call itself, so execution resumes at the one after it
pub fn rts(state: &State) -> Result<State> {
    if state.sp == 0 {
        return Err(Error::StackUnderflow { pc: state.pc });
    }
    let sp = state.sp - 0x1;
    Ok(State {
        pc: state.stack[sp as usize] + 0x2,
        sp,
        ..*state
    })
}

/// PC = nnn
pub fn jump(nnn: u16, state: &State) -> State {
    State { pc: nnn, ..*state }
}

/// STACK.push(PC); PC = nnn
pub fn call(nnn: u16, state: &State) -> Result<State> {
    if state.sp as usize == STACK_SIZE {
        return Err(Error::StackOverflow { pc: state.pc });
    }
    let mut stack = state.stack;
    stack[state.sp as usize] = state.pc;
    Ok(State {
        pc: nnn,
        sp: state.sp + 0x1,
        stack,
        ..*state
    })
}

/// Advances past the next instruction when `condition` holds
fn skip_if(condition: bool, state: &State) -> State {
    let pc = if condition {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    State { pc, ..*state }
}

/// if Vx == nn then pc += 2
pub fn ske(x: u8, nn: u8, state: &State) -> State {
    skip_if(state.v[x as usize] == nn, state)
}

/// if Vx != nn then pc += 2
pub fn skne(x: u8, nn: u8, state: &State) -> State {
    skip_if(state.v[x as usize] != nn, state)
}

/// if Vx == Vy then pc += 2
pub fn skre(x: u8, y: u8, state: &State) -> State {
    skip_if(state.v[x as usize] == state.v[y as usize], state)
}

/// Vx = nn
pub fn load(x: u8, nn: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = nn;
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx += nn
/// Add nn to Vx; allow for overflow but implicitly drop it, VF is untouched
pub fn add(x: u8, nn: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = v[x as usize].wrapping_add(nn);
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx = Vy
pub fn mv(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = v[y as usize];
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx |= Vy
pub fn or(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] |= v[y as usize];
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx &= Vy
pub fn and(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] &= v[y as usize];
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx ^= Vy
pub fn xor(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] ^= v[y as usize];
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx += Vy; VF = carry
/// The flag is written last, so `8Fy4` leaves the carry in VF rather than the sum
pub fn addr(x: u8, y: u8, state: &State) -> State {
    let (res, carry) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    let mut v = state.v;
    v[x as usize] = res;
    v[0xF] = u8::from(carry);
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// if Vx != Vy then pc += 2
pub fn skrne(x: u8, y: u8, state: &State) -> State {
    skip_if(state.v[x as usize] != state.v[y as usize], state)
}

/// I = nnn
pub fn loadi(nnn: u16, state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        i: nnn,
        ..*state
    }
}

/// Vx = rand_byte & nn
pub fn rand(x: u8, nn: u8, state: &State, peripherals: &mut Peripherals<'_>) -> State {
    let rand_byte: u8 = peripherals.rng.gen();
    let mut v = state.v;
    v[x as usize] = rand_byte & nn;
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer.
/// Sets VF if any pixels are erased.
///
/// There is no wrapping or clipping: a lit sprite pixel that lands off screen is a fault.
pub fn draw(x: u8, y: u8, n: u8, state: &State) -> Result<State> {
    let origin_x = state.v[x as usize] as usize;
    let origin_y = state.v[y as usize] as usize;
    let sprite = state.memory.slice(state.i as usize, n as usize)?;

    let mut v = state.v;
    let mut frame_buffer = state.frame_buffer;

    // Reset the carry flag (used for collision detection)
    v[0xF] = 0x0;

    for (row, byte) in sprite.iter().enumerate() {
        for col in 0..8 {
            if byte & (0x80 >> col) == 0 {
                continue;
            }
            let (px, py) = (origin_x + col, origin_y + row);
            let offset = px + py * DISPLAY_WIDTH;
            if px >= DISPLAY_WIDTH || py >= DISPLAY_HEIGHT {
                return Err(Error::MemoryFault {
                    region: Region::Display,
                    address: offset,
                });
            }
            if frame_buffer[offset] == 0x1 {
                v[0xF] = 0x1;
            }
            frame_buffer[offset] ^= 0x1;
        }
    }

    Ok(State {
        pc: state.pc + 0x2,
        draw_flag: true,
        v,
        frame_buffer,
        ..*state
    })
}

/// Keys past 0xF don't exist and so are never pressed
fn is_pressed(key: u8, pressed_keys: &Keypad) -> bool {
    pressed_keys.get(key as usize).copied().unwrap_or(false)
}

/// if Vx.pressed then pc += 2
pub fn skpr(x: u8, state: &State, peripherals: &Peripherals<'_>) -> State {
    skip_if(is_pressed(state.v[x as usize], peripherals.pressed_keys), state)
}

/// if !Vx.pressed then pc += 2
pub fn skup(x: u8, state: &State, peripherals: &Peripherals<'_>) -> State {
    skip_if(!is_pressed(state.v[x as usize], peripherals.pressed_keys), state)
}

/// Vx = DT
pub fn moved(x: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = state.delay_timer;
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// DT = Vx
pub fn loads(x: u8, state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        delay_timer: state.v[x as usize],
        ..*state
    }
}

/// ST = Vx
pub fn ld(x: u8, state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        sound_timer: state.v[x as usize],
        ..*state
    }
}

/// I += Vx; VF = I didn't grow
/// VF is 1 when the sum wrapped past 0xFFFF, or Vx is 0, and 0 when I ended up larger.
/// Programs like Spacefight 2091! depend on this flag.
pub fn addi(x: u8, state: &State) -> State {
    let i = state.i.wrapping_add(u16::from(state.v[x as usize]));
    let mut v = state.v;
    v[0xF] = if i > state.i { 0x0 } else { 0x1 };
    State {
        pc: state.pc + 0x2,
        i,
        v,
        ..*state
    }
}

/// I = FONT_ADDR + Vx * 4
/// See constants::FONT_ADDR for why this doesn't point at the sprite sheet's glyphs
pub fn ldspr(x: u8, state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        i: FONT_ADDR + u16::from(state.v[x as usize]) * FONT_STRIDE,
        ..*state
    }
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(x: u8, state: &State) -> Result<State> {
    let value = state.v[x as usize];
    let digits = [value / 100 % 10, value / 10 % 10, value % 10];
    let mut memory = state.memory;
    memory
        .slice_mut(state.i as usize, digits.len())?
        .copy_from_slice(&digits);
    Ok(State {
        pc: state.pc + 0x2,
        memory,
        ..*state
    })
}

/// mem[I..] = V0..Vx
/// See config::StoreLoad for the range stored and where I ends up
pub fn stor(x: u8, state: &State, peripherals: &Peripherals<'_>) -> Result<State> {
    let (count, i) = match peripherals.quirks.store_load {
        StoreLoad::Reference => (x as usize, u16::from(x) + 0x1),
        StoreLoad::Cosmac => (
            x as usize + 1,
            state.i.wrapping_add(u16::from(x) + 0x1),
        ),
    };
    let mut memory = state.memory;
    memory
        .slice_mut(state.i as usize, count)?
        .copy_from_slice(&state.v[..count]);
    Ok(State {
        pc: state.pc + 0x2,
        i,
        memory,
        ..*state
    })
}

/// V0..=Vx = mem[I..=I+x]
/// See config::StoreLoad for where I ends up
pub fn read(x: u8, state: &State, peripherals: &Peripherals<'_>) -> Result<State> {
    let count = x as usize + 1;
    let i = match peripherals.quirks.store_load {
        StoreLoad::Reference => state.i,
        StoreLoad::Cosmac => state.i.wrapping_add(count as u16),
    };
    let mut v = state.v;
    v[..count].copy_from_slice(state.memory.slice(state.i as usize, count)?);
    Ok(State {
        pc: state.pc + 0x2,
        i,
        v,
        ..*state
    })
}
