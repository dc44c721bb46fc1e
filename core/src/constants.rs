/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// ROMs are loaded into memory starting here and the pc starts here
pub const PROGRAM_START: u16 = 0x200;

/// Number of return addresses the call stack can hold
pub const STACK_SIZE: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;
pub const DISPLAY_SIZE: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// Address `Fx29` points I at for glyph 0
///
/// The sprite sheet itself lives at 0x000, so `Fx29` does not land on the start of a glyph.
/// Programs that draw digits this way get the same pixels they got on the reference machine.
pub const FONT_ADDR: u16 = 0x50;

/// Distance between consecutive glyph addresses as computed by `Fx29`
pub const FONT_STRIDE: u16 = 4;

/// Nanoseconds per CPU cycle at the classic 60Hz rate
pub const CLOCK_SPEED: u64 = 1_000_000_000 / 60;

/// # Sprite sheet
/// Glyphs for the hexadecimal digits 0..F, each 4 pixels wide and 5 rows tall.
/// Only the high nibble of every row is lit.
///
/// ```text
/// 0xF0  XXXX....
/// 0x90  X..X....
/// 0x90  X..X....
/// 0x90  X..X....
/// 0xF0  XXXX....
/// ```
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
