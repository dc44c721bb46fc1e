use sdl2::render::TextureValueError;
use sdl2::video::WindowBuildError;
use sdl2::IntegerOrSdlError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Most SDL calls only report a message
    #[error("sdl: {0}")]
    Sdl(String),
    #[error(transparent)]
    Window(#[from] WindowBuildError),
    #[error(transparent)]
    Canvas(#[from] IntegerOrSdlError),
    #[error(transparent)]
    Texture(#[from] TextureValueError),
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Sdl(message)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
