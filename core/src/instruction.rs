use crate::error::{Error, Result};
use crate::opcode::Opcode;
use crate::operations::{self, Peripherals};
use crate::state::State;

/// A decoded Chip-8 instruction with its operands pulled out of the opcode.
///
/// `x` and `y` index registers, `nn` is an immediate byte, `nnn` an address and `n` a sprite height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`
    Clear,
    /// `00EE`
    Return,
    /// `1nnn`
    Jump { nnn: u16 },
    /// `2nnn`
    Call { nnn: u16 },
    /// `3xnn`
    SkipEqByte { x: u8, nn: u8 },
    /// `4xnn`
    SkipNeByte { x: u8, nn: u8 },
    /// `5xy0`
    SkipEqReg { x: u8, y: u8 },
    /// `6xnn`
    LoadByte { x: u8, nn: u8 },
    /// `7xnn`
    AddByte { x: u8, nn: u8 },
    /// `8xy0`
    Move { x: u8, y: u8 },
    /// `8xy1`
    Or { x: u8, y: u8 },
    /// `8xy2`
    And { x: u8, y: u8 },
    /// `8xy3`
    Xor { x: u8, y: u8 },
    /// `8xy4`
    AddReg { x: u8, y: u8 },
    /// `9xy0`
    SkipNeReg { x: u8, y: u8 },
    /// `Annn`
    LoadI { nnn: u16 },
    /// `Cxnn`
    Random { x: u8, nn: u8 },
    /// `Dxyn`
    Draw { x: u8, y: u8, n: u8 },
    /// `Ex9E`
    SkipPressed { x: u8 },
    /// `ExA1`
    SkipNotPressed { x: u8 },
    /// `Fx07`
    LoadDelay { x: u8 },
    /// `Fx15`
    SetDelay { x: u8 },
    /// `Fx18`
    SetSound { x: u8 },
    /// `Fx1E`
    AddI { x: u8 },
    /// `Fx29`
    LoadGlyph { x: u8 },
    /// `Fx33`
    Bcd { x: u8 },
    /// `Fx55`
    Store { x: u8 },
    /// `Fx65`
    Read { x: u8 },
}

impl Instruction {
    /// Selects the correct Instruction for a given Opcode
    pub fn decode(op: u16) -> Result<Self> {
        let (x, y, n, nn, nnn) = (op.x(), op.y(), op.n(), op.nn(), op.nnn());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Clear,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Return,
            (0x1, ..) => Instruction::Jump { nnn },
            (0x2, ..) => Instruction::Call { nnn },
            (0x3, ..) => Instruction::SkipEqByte { x, nn },
            (0x4, ..) => Instruction::SkipNeByte { x, nn },
            (0x5, .., 0x0) => Instruction::SkipEqReg { x, y },
            (0x6, ..) => Instruction::LoadByte { x, nn },
            (0x7, ..) => Instruction::AddByte { x, nn },
            (0x8, .., 0x0) => Instruction::Move { x, y },
            (0x8, .., 0x1) => Instruction::Or { x, y },
            (0x8, .., 0x2) => Instruction::And { x, y },
            (0x8, .., 0x3) => Instruction::Xor { x, y },
            (0x8, .., 0x4) => Instruction::AddReg { x, y },
            (0x9, .., 0x0) => Instruction::SkipNeReg { x, y },
            (0xA, ..) => Instruction::LoadI { nnn },
            (0xC, ..) => Instruction::Random { x, nn },
            (0xD, ..) => Instruction::Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => Instruction::SkipPressed { x },
            (0xE, _, 0xA, 0x1) => Instruction::SkipNotPressed { x },
            (0xF, _, 0x0, 0x7) => Instruction::LoadDelay { x },
            (0xF, _, 0x1, 0x5) => Instruction::SetDelay { x },
            (0xF, _, 0x1, 0x8) => Instruction::SetSound { x },
            (0xF, _, 0x1, 0xE) => Instruction::AddI { x },
            (0xF, _, 0x2, 0x9) => Instruction::LoadGlyph { x },
            (0xF, _, 0x3, 0x3) => Instruction::Bcd { x },
            (0xF, _, 0x5, 0x5) => Instruction::Store { x },
            (0xF, _, 0x6, 0x5) => Instruction::Read { x },
            _ => return Err(Error::UnimplementedOpcode { opcode: op }),
        };
        Ok(instruction)
    }

    /// Applies the instruction to `state`, producing the state after it.
    ///
    /// `state` is left untouched, so when this fails the machine is still exactly as it was before
    /// the instruction was fetched.
    pub fn execute(self, state: &State, peripherals: &mut Peripherals<'_>) -> Result<State> {
        match self {
            Instruction::Clear => Ok(operations::clr(state)),
            Instruction::Return => operations::rts(state),
            Instruction::Jump { nnn } => Ok(operations::jump(nnn, state)),
            Instruction::Call { nnn } => operations::call(nnn, state),
            Instruction::SkipEqByte { x, nn } => Ok(operations::ske(x, nn, state)),
            Instruction::SkipNeByte { x, nn } => Ok(operations::skne(x, nn, state)),
            Instruction::SkipEqReg { x, y } => Ok(operations::skre(x, y, state)),
            Instruction::LoadByte { x, nn } => Ok(operations::load(x, nn, state)),
            Instruction::AddByte { x, nn } => Ok(operations::add(x, nn, state)),
            Instruction::Move { x, y } => Ok(operations::mv(x, y, state)),
            Instruction::Or { x, y } => Ok(operations::or(x, y, state)),
            Instruction::And { x, y } => Ok(operations::and(x, y, state)),
            Instruction::Xor { x, y } => Ok(operations::xor(x, y, state)),
            Instruction::AddReg { x, y } => Ok(operations::addr(x, y, state)),
            Instruction::SkipNeReg { x, y } => Ok(operations::skrne(x, y, state)),
            Instruction::LoadI { nnn } => Ok(operations::loadi(nnn, state)),
            Instruction::Random { x, nn } => Ok(operations::rand(x, nn, state, peripherals)),
            Instruction::Draw { x, y, n } => operations::draw(x, y, n, state),
            Instruction::SkipPressed { x } => Ok(operations::skpr(x, state, peripherals)),
            Instruction::SkipNotPressed { x } => Ok(operations::skup(x, state, peripherals)),
            Instruction::LoadDelay { x } => Ok(operations::moved(x, state)),
            Instruction::SetDelay { x } => Ok(operations::loads(x, state)),
            Instruction::SetSound { x } => Ok(operations::ld(x, state)),
            Instruction::AddI { x } => Ok(operations::addi(x, state)),
            Instruction::LoadGlyph { x } => Ok(operations::ldspr(x, state)),
            Instruction::Bcd { x } => operations::bcd(x, state),
            Instruction::Store { x } => operations::stor(x, state, peripherals),
            Instruction::Read { x } => operations::read(x, state, peripherals),
        }
    }
}
