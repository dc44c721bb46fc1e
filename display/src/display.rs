use std::path::Path;

use log::debug;
use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::rect::Rect;
use sdl2::surface::Surface;

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::state::FrameBuffer;
use chip8_core::{RenderError, Renderer};

use crate::error::Result;

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively, one byte per pixel, row after row.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "Chip-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()?;
        let canvas = window.into_canvas().build()?;
        debug!("opened {}x scaled window", scale);

        Ok(Display { canvas })
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of ints that represent concatenated rows of RGB pixels.
    ///
    /// This creates a black and white rendering by:
    /// - Triplicating each pixel of the frame buffer to represent its RGB values
    /// - Multiplying each value by 255 to convert from a binary state to 0-255 intensity
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|&pixel| std::iter::repeat(pixel * 255).take(3))
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<()> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            DISPLAY_WIDTH as u32,
            DISPLAY_HEIGHT as u32,
        )?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            for (row, line) in pixels.chunks(DISPLAY_WIDTH * 3).enumerate() {
                buffer[row * pitch..row * pitch + line.len()].copy_from_slice(line);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

impl Renderer for Display {
    fn render(&mut self, frame: &FrameBuffer) -> std::result::Result<(), RenderError> {
        Display::render(self, frame).map_err(|err| RenderError(err.to_string()))
    }
}

/// Lit pixels of `frame` as rectangles `scale` pixels on a side
fn lit_rects(frame: &FrameBuffer, scale: u32) -> Vec<Rect> {
    frame
        .iter()
        .enumerate()
        .filter(|(_, &pixel)| pixel == 1)
        .map(|(n, _)| {
            let x = (n % DISPLAY_WIDTH) as u32 * scale;
            let y = (n / DISPLAY_WIDTH) as u32 * scale;
            Rect::new(x as i32, y as i32, scale, scale)
        })
        .collect()
}

/// Saves `frame` to `path` as a BMP, white on black, each pixel `scale` pixels on a side.
///
/// Doesn't need a window, so it also works for headless runs.
pub fn save_bmp<P: AsRef<Path>>(frame: &FrameBuffer, scale: u32, path: P) -> Result<()> {
    let mut surface = Surface::new(
        DISPLAY_WIDTH as u32 * scale,
        DISPLAY_HEIGHT as u32 * scale,
        PixelFormatEnum::RGB24,
    )?;
    surface.fill_rect(None, Color::RGB(0, 0, 0))?;
    surface.fill_rects(&lit_rects(frame, scale), Color::RGB(255, 255, 255))?;
    surface.save_bmp(path.as_ref())?;
    debug!("saved screenshot to {}", path.as_ref().display());
    Ok(())
}
