pub use crate::chip8::Chip8;
pub use crate::config::{Quirks, StoreLoad};
pub use crate::constants::CLOCK_SPEED;
pub use crate::error::{Error, Region, RenderError, Result};
pub use crate::instruction::Instruction;
pub use crate::memory::Memory;
pub use crate::operations::Peripherals;
pub use crate::scheduler::{Renderer, RunState, Scheduler, Ticker};
pub use crate::trace::Registers;

mod chip8;
mod config;
pub mod constants;
mod error;
mod instruction;
mod memory;
mod opcode;
mod operations;
mod scheduler;
pub mod state;
mod trace;
