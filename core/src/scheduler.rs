use std::ops::ControlFlow;

use log::{debug, error};

use crate::chip8::Chip8;
use crate::error::{Error, RenderError, Result};
use crate::state::FrameBuffer;

/// Paints frames published by the scheduler.
///
/// Receives the whole 64x32 buffer, one byte per pixel, every time an instruction changes it.
pub trait Renderer {
    fn render(&mut self, frame: &FrameBuffer) -> std::result::Result<(), RenderError>;
}

impl<F> Renderer for F
where
    F: FnMut(&FrameBuffer) -> std::result::Result<(), RenderError>,
{
    fn render(&mut self, frame: &FrameBuffer) -> std::result::Result<(), RenderError> {
        self(frame)
    }
}

/// Gates each cycle of `run_for_cycles` and `run_forever`.
///
/// Implementations wait until the next cycle is due, and return `Break` to stop running.
pub trait Ticker {
    fn tick(&mut self) -> ControlFlow<()>;
}

impl<F> Ticker for F
where
    F: FnMut() -> ControlFlow<()>,
{
    fn tick(&mut self) -> ControlFlow<()> {
        self()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Stopped for good by the contained error
    Halted(Error),
}

/// # Scheduler
/// Drives a Chip8 one cycle at a time.
///
/// A cycle:
/// - executes one instruction
/// - counts both timers down
/// - publishes the frame buffer to the renderer if the instruction changed it
///
/// The first error halts the scheduler and every later call returns that same error.
pub struct Scheduler<R> {
    chip8: Chip8,
    renderer: R,
    run_state: RunState,
    cycles: u64,
}

impl<R: Renderer> Scheduler<R> {
    pub fn new(chip8: Chip8, renderer: R) -> Self {
        Scheduler {
            chip8,
            renderer,
            run_state: RunState::Running,
            cycles: 0,
        }
    }

    pub fn run_one_cycle(&mut self) -> Result<()> {
        if let RunState::Halted(err) = &self.run_state {
            return Err(err.clone());
        }
        self.cycle().map_err(|err| {
            error!(
                "halted after {} cycles at {}: {}",
                self.cycles,
                self.chip8.registers(),
                err
            );
            self.run_state = RunState::Halted(err.clone());
            err
        })
    }

    /// Runs up to `cycles` cycles, each one waiting on `ticker` first
    ///
    /// Returns how many cycles ran, which is less than `cycles` only if `ticker` stopped early.
    pub fn run_for_cycles(&mut self, cycles: u64, ticker: &mut impl Ticker) -> Result<u64> {
        for ran in 0..cycles {
            if ticker.tick().is_break() {
                debug!("stopped after {} of {} cycles", ran, cycles);
                return Ok(ran);
            }
            self.run_one_cycle()?;
        }
        Ok(cycles)
    }

    /// Runs until an instruction fails or `ticker` stops it
    pub fn run_forever(&mut self, ticker: &mut impl Ticker) -> Result<()> {
        while ticker.tick().is_continue() {
            self.run_one_cycle()?;
        }
        debug!("stopped after {} cycles", self.cycles);
        Ok(())
    }

    fn cycle(&mut self) -> Result<()> {
        let redraw = self.chip8.advance_cpu()?;
        self.chip8.advance_timers();
        self.cycles += 1;
        if redraw {
            self.renderer.render(self.chip8.frame())?;
        }
        Ok(())
    }

    pub fn run_state(&self) -> &RunState {
        &self.run_state
    }

    /// Cycles completed so far
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn chip8(&self) -> &Chip8 {
        &self.chip8
    }

    pub fn chip8_mut(&mut self) -> &mut Chip8 {
        &mut self.chip8
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
