use std::fmt;

use thiserror::Error;

/// The part of the machine an out of range access was aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Ram,
    Display,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Ram => write!(f, "memory"),
            Region::Display => write!(f, "display"),
        }
    }
}

/// Raised by the collaborator that paints frames
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("renderer failed: {0}")]
pub struct RenderError(pub String);

/// Every way the machine can stop.
///
/// None of these are recovered from internally; the scheduler halts and hands them to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("tried to load a zero-length ROM")]
    InvalidRom,

    #[error("opcode not implemented: {opcode:#06X}")]
    UnimplementedOpcode { opcode: u16 },

    #[error("stack exhausted calling from {pc:#06X}")]
    StackOverflow { pc: u16 },

    #[error("stack bottom returning from {pc:#06X}")]
    StackUnderflow { pc: u16 },

    #[error("{region} access out of bounds at {address:#06X}")]
    MemoryFault { region: Region, address: usize },

    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type Result<T> = std::result::Result<T, Error>;
