use crate::constants::{MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::{Error, Region, Result};

/// # Memory
/// 4096 bytes of flat addressable memory.
///
/// - `0x000..0x050` holds the sprite sheet, written once on construction
/// - `0x200..0x1000` holds the loaded program and whatever data it writes
///
/// Every access is bounds checked; an address outside of memory is a `MemoryFault`.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    pub fn read(&self, addr: usize) -> Result<u8> {
        self.bytes.get(addr).copied().ok_or(fault(addr))
    }

    /// Reads the big-endian word stored at `addr` and `addr + 1`
    pub fn read_word(&self, addr: usize) -> Result<u16> {
        let bytes = self.slice(addr, 2)?;
        Ok(u16::from(bytes[0]) << 8 | u16::from(bytes[1]))
    }

    pub fn write(&mut self, addr: usize, byte: u8) -> Result<()> {
        let cell = self.bytes.get_mut(addr).ok_or(fault(addr))?;
        *cell = byte;
        Ok(())
    }

    /// Borrows `len` bytes starting at `addr`
    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8]> {
        check(addr, len)?;
        Ok(&self.bytes[addr..addr + len])
    }

    /// Mutably borrows `len` bytes starting at `addr`
    pub fn slice_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8]> {
        check(addr, len)?;
        Ok(&mut self.bytes[addr..addr + len])
    }

    /// Copies a ROM into memory starting at `PROGRAM_START`
    ///
    /// # Arguments
    /// * `rom` the raw program bytes; must be non-empty and fit in the program region
    pub fn load_program(&mut self, rom: &[u8]) -> Result<()> {
        if rom.is_empty() {
            return Err(Error::InvalidRom);
        }
        self.slice_mut(PROGRAM_START as usize, rom.len())?
            .copy_from_slice(rom);
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

fn fault(address: usize) -> Error {
    Error::MemoryFault {
        region: Region::Ram,
        address,
    }
}

/// Faults on the first address of `addr..addr + len` that falls outside of memory
fn check(addr: usize, len: usize) -> Result<()> {
    match addr.checked_add(len) {
        Some(end) if end <= MEMORY_SIZE => Ok(()),
        _ => Err(fault(addr.max(MEMORY_SIZE))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_sheet_is_seeded() {
        let memory = Memory::new();
        assert_eq!(memory.slice(0, 80).unwrap(), &SPRITE_SHEET[..]);
    }

    #[test]
    fn test_program_region_is_zeroed() {
        let memory = Memory::new();
        assert!(memory.as_bytes()[0x200..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_read_word_is_big_endian() {
        let mut memory = Memory::new();
        memory.write(0x300, 0xAB).unwrap();
        memory.write(0x301, 0xCD).unwrap();
        assert_eq!(memory.read_word(0x300), Ok(0xABCD));
    }

    #[test]
    fn test_read_word_straddling_the_end_faults() {
        let memory = Memory::new();
        assert_eq!(
            memory.read_word(0xFFF),
            Err(Error::MemoryFault {
                region: Region::Ram,
                address: 0x1000
            })
        );
    }

    #[test]
    fn test_write_out_of_bounds_faults() {
        let mut memory = Memory::new();
        assert_eq!(
            memory.write(0x1000, 0x1),
            Err(Error::MemoryFault {
                region: Region::Ram,
                address: 0x1000
            })
        );
    }

    #[test]
    fn test_program_load_ok() {
        let mut memory = Memory::new();
        memory.load_program(&[0x00, 0xE0]).unwrap();
        assert_eq!(memory.slice(0x200, 2).unwrap(), &[0x00, 0xE0]);
    }

    #[test]
    fn test_program_load_rejects_empty_rom() {
        let mut memory = Memory::new();
        assert_eq!(memory.load_program(&[]), Err(Error::InvalidRom));
    }

    #[test]
    fn test_program_load_rejects_oversized_rom() {
        let mut memory = Memory::new();
        let rom = [0xFF; MEMORY_SIZE - 0x200 + 1];
        assert!(matches!(
            memory.load_program(&rom),
            Err(Error::MemoryFault { .. })
        ));
        // nothing was copied
        assert!(memory.as_bytes()[0x200..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_program_load_fills_program_region_exactly() {
        let mut memory = Memory::new();
        let rom = [0x12; MEMORY_SIZE - 0x200];
        memory.load_program(&rom).unwrap();
        assert_eq!(memory.read(0xFFF), Ok(0x12));
    }
}
