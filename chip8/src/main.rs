use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

use chip8_core::{Chip8, Quirks, StoreLoad};

mod keymap;
mod run;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quirk {
    /// Fx55 stores V0 up to but not including Vx and sets I to x + 1
    Reference,
    /// Fx55 and Fx65 include Vx and advance I past the registers
    Cosmac,
}

impl From<Quirk> for StoreLoad {
    fn from(quirk: Quirk) -> Self {
        match quirk {
            Quirk::Reference => StoreLoad::Reference,
            Quirk::Cosmac => StoreLoad::Cosmac,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "chip8", about = "Runs a Chip-8 ROM in an SDL window.")]
pub struct Args {
    /// ROM image to load at 0x200.
    #[arg(value_name = "ROM")]
    pub rom: PathBuf,

    /// Instructions executed per second. Timers count down once per instruction.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub hz: u32,

    /// Size of each Chip-8 pixel in window pixels.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=64))]
    pub scale: u32,

    /// Seed for Cxnn, making runs reproducible.
    #[arg(long)]
    pub seed: Option<u64>,

    /// How Fx55 and Fx65 treat Vx and I.
    #[arg(long, value_enum, default_value_t = Quirk::Reference)]
    pub quirk: Quirk,

    /// Stop after this many instructions.
    #[arg(long, value_name = "N")]
    pub cycles: Option<u64>,

    /// Run without a window and print the final frame.
    #[arg(long, default_value_t = false, requires = "cycles")]
    pub headless: bool,

    /// Save the final frame as a BMP.
    #[arg(long, value_name = "PATH")]
    pub screenshot: Option<PathBuf>,

    /// One of off, error, warn, info, debug, trace.
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    SimpleLogger::new().with_level(args.log_level).init()?;

    let rom = std::fs::read(&args.rom)
        .wrap_err_with(|| format!("unable to read ROM {}", args.rom.display()))?;
    let mut chip8 = match args.seed {
        Some(seed) => Chip8::seeded(seed),
        None => Chip8::new(),
    }
    .with_quirks(Quirks {
        store_load: args.quirk.into(),
    });
    chip8
        .load_rom(&rom)
        .wrap_err_with(|| format!("unable to load ROM {}", args.rom.display()))?;
    info!("loaded {}", args.rom.display());

    let frame = if args.headless {
        run::headless(chip8, &args)?
    } else {
        run::windowed(chip8, &args)?
    };

    if let Some(path) = &args.screenshot {
        chip8_display::save_bmp(&frame, args.scale, path)
            .wrap_err_with(|| format!("unable to save screenshot {}", path.display()))?;
        info!("saved screenshot {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["chip8", "pong.ch8"]).unwrap();
        assert_eq!(args.rom, PathBuf::from("pong.ch8"));
        assert_eq!(args.hz, 60);
        assert_eq!(args.scale, 10);
        assert_eq!(args.quirk, Quirk::Reference);
        assert_eq!(args.log_level, LevelFilter::Info);
        assert!(!args.headless);
    }

    #[test]
    fn test_headless_needs_cycles() {
        assert!(Args::try_parse_from(["chip8", "--headless", "pong.ch8"]).is_err());
        let args =
            Args::try_parse_from(["chip8", "--headless", "--cycles", "500", "pong.ch8"]).unwrap();
        assert_eq!(args.cycles, Some(500));
    }

    #[test]
    fn test_zero_hz_is_rejected() {
        assert!(Args::try_parse_from(["chip8", "--hz", "0", "pong.ch8"]).is_err());
    }

    #[test]
    fn test_quirk_and_log_level() {
        let args = Args::try_parse_from([
            "chip8",
            "--quirk",
            "cosmac",
            "--log-level",
            "trace",
            "pong.ch8",
        ])
        .unwrap();
        assert_eq!(StoreLoad::from(args.quirk), StoreLoad::Cosmac);
        assert_eq!(args.log_level, LevelFilter::Trace);
    }
}
