use std::fmt;

use crate::constants::STACK_SIZE;
use crate::state::State;

/// A copy of every register, taken between instructions for debuggers and tracers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_SIZE],
    pub delay_timer: u8,
    pub sound_timer: u8,
}

impl From<&State> for Registers {
    fn from(state: &State) -> Self {
        Registers {
            v: state.v,
            i: state.i,
            pc: state.pc,
            sp: state.sp,
            stack: state.stack,
            delay_timer: state.delay_timer,
            sound_timer: state.sound_timer,
        }
    }
}

/// `pc0200 i0000 sp0 dt00 st00 v[00 00 .. 00]`
impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pc{:04X} i{:04X} sp{:X} dt{:02X} st{:02X} v[",
            self.pc, self.i, self.sp, self.delay_timer, self.sound_timer
        )?;
        for (n, register) in self.v.iter().enumerate() {
            if n > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02X}", register)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_on_one_line() {
        let mut state = State::new();
        state.v[0x0] = 0xAB;
        state.v[0xF] = 0x1;
        state.i = 0x123;
        state.sp = 0x2;
        state.delay_timer = 0x3C;
        let registers = Registers::from(&state);
        assert_eq!(
            registers.to_string(),
            "pc0200 i0123 sp2 dt3C st00 v[AB 00 00 00 00 00 00 00 00 00 00 00 00 00 00 01]"
        );
    }
}
