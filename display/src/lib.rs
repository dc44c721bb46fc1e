pub use crate::display::{save_bmp, Display};
pub use crate::error::{Error, Result};

mod display;
mod error;
