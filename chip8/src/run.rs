use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use color_eyre::eyre::{eyre, Result};
use log::debug;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::constants::DISPLAY_WIDTH;
use chip8_core::state::FrameBuffer;
use chip8_core::{Chip8, RenderError, Scheduler, CLOCK_SPEED};
use chip8_display::Display;

use crate::keymap::keymap;
use crate::Args;

/// Time between instructions at `hz` instructions per second
fn cycle_time(hz: u32) -> Duration {
    Duration::from_nanos(CLOCK_SPEED * 60 / u64::from(hz))
}

/// Runs `chip8` in a window until it's closed, `--cycles` run out, or an instruction fails.
/// Returns the last frame.
pub fn windowed(chip8: Chip8, args: &Args) -> Result<FrameBuffer> {
    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| eyre!(e))?;
    let display = Display::new(&sdl, args.scale)?;
    let mut events = sdl.event_pump().map_err(|e| eyre!(e))?;
    let mut scheduler = Scheduler::new(chip8, display);

    let cycle_time = cycle_time(args.hz);
    let mut last_cycle = Instant::now();

    // Whether or not the clock speed should be respected
    let mut fast_forward = false;

    'event: loop {
        if args.cycles.map_or(false, |limit| scheduler.cycles() >= limit) {
            break;
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => scheduler.chip8_mut().key_press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => break 'event,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => scheduler.chip8_mut().key_release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        scheduler.run_one_cycle()?;

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    debug!("window closed after {} cycles", scheduler.cycles());
    Ok(*scheduler.chip8().frame())
}

/// Runs `chip8` for `--cycles` instructions as fast as possible and prints the last frame.
pub fn headless(chip8: Chip8, args: &Args) -> Result<FrameBuffer> {
    let cycles = args
        .cycles
        .ok_or_else(|| eyre!("--headless needs --cycles"))?;
    let mut scheduler = Scheduler::new(chip8, |_: &FrameBuffer| -> Result<(), RenderError> {
        Ok(())
    });
    scheduler.run_for_cycles(cycles, &mut || ControlFlow::<()>::Continue(()))?;

    let frame = *scheduler.chip8().frame();
    println!("{}", frame_to_text(&frame));
    Ok(frame)
}

/// One line per row, `#` for lit pixels and `.` for unlit ones
fn frame_to_text(frame: &FrameBuffer) -> String {
    frame
        .chunks(DISPLAY_WIDTH)
        .map(|row| {
            row.iter()
                .map(|&pixel| if pixel == 1 { '#' } else { '.' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
