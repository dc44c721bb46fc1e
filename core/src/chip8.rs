use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::config::Quirks;
use crate::error::Result;
use crate::instruction::Instruction;
use crate::operations::Peripherals;
use crate::state::{FrameBuffer, Keypad, State};
use crate::trace::Registers;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `pressed_keys` with public interfaces for manipulating them
///  - the `rng` behind `Cxnn`, injectable so runs can be reproduced
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
/// - inspecting its registers for tracing by some debugger
pub struct Chip8 {
    state: State,
    pressed_keys: Keypad,
    quirks: Quirks,
    rng: Box<dyn RngCore>,
}

impl Chip8 {
    /// A machine whose random numbers are seeded from the OS
    pub fn new() -> Self {
        Self::with_rng(Box::new(StdRng::from_entropy()))
    }

    /// A machine whose random numbers are the same for every run with the same `seed`
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn with_rng(rng: Box<dyn RngCore>) -> Self {
        Chip8 {
            state: State::new(),
            pressed_keys: [false; 16],
            quirks: Quirks::default(),
            rng,
        }
    }

    pub fn with_quirks(self, quirks: Quirks) -> Self {
        Chip8 { quirks, ..self }
    }

    /// Load a rom into memory at the program start
    ///
    /// # Arguments
    /// * `rom` the program's bytes; empty roms are rejected
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        self.state.memory.load_program(rom)?;
        debug!("loaded {} byte rom", rom.len());
        Ok(())
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn get_frame(&self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn registers(&self) -> Registers {
        Registers::from(&self.state)
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed, 0..F
    pub fn key_press(&mut self, key: u8) {
        if let Some(pressed) = self.pressed_keys.get_mut(key as usize) {
            *pressed = true;
        }
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released, 0..F
    pub fn key_release(&mut self, key: u8) {
        if let Some(pressed) = self.pressed_keys.get_mut(key as usize) {
            *pressed = false;
        }
    }

    /// Advances the CPU by a single instruction
    /// - gets, decodes and executes the next opcode
    /// - returns whether the instruction changed the frame buffer
    ///
    /// When this fails the registers, memory and frame buffer are as they were before the call.
    pub fn advance_cpu(&mut self) -> Result<bool> {
        self.state.draw_flag = false;
        let op = self.get_op()?;
        trace!("{:04X} {}", op, self.registers());
        let instruction = Instruction::decode(op)?;
        let mut peripherals = Peripherals {
            pressed_keys: &self.pressed_keys,
            rng: self.rng.as_mut(),
            quirks: self.quirks,
        };
        self.state = instruction.execute(&self.state, &mut peripherals)?;
        Ok(self.state.draw_flag)
    }

    /// Counts both timers down by one, stopping at 0
    pub fn advance_timers(&mut self) {
        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }

        if self.state.sound_timer > 0 {
            if self.state.sound_timer == 1 {
                info!("beep");
            }
            self.state.sound_timer -= 1;
        }
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<u16> {
        self.state.memory.read_word(self.state.pc as usize)
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreLoad;
    use crate::error::{Error, Region};

    fn with_program(program: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::seeded(0);
        chip8.load_rom(program).unwrap();
        chip8
    }

    #[test]
    fn test_chip8_gets_op() {
        let chip8 = with_program(&[0xAA, 0xBB]);
        assert_eq!(chip8.get_op(), Ok(0xAABB));
    }

    #[test]
    fn test_chip8_rejects_empty_rom() {
        let mut chip8 = Chip8::seeded(0);
        assert_eq!(chip8.load_rom(&[]), Err(Error::InvalidRom));
    }

    #[test]
    fn test_advances_pc() {
        let mut chip8 = with_program(&[0x00, 0xE0]);
        let starting_pc = chip8.state.pc;
        assert_eq!(chip8.advance_cpu(), Ok(true));
        assert_eq!(chip8.state.pc, starting_pc + 0x2);
    }

    #[test]
    fn test_only_drawing_instructions_request_a_frame() {
        let mut chip8 = with_program(&[0x00, 0xE0, 0x61, 0x01]);
        chip8.advance_cpu().unwrap();
        assert!(chip8.get_frame().is_some());
        assert_eq!(chip8.advance_cpu(), Ok(false));
        assert!(chip8.get_frame().is_none());
    }

    #[test]
    fn test_failing_instruction_leaves_state_alone() {
        let mut chip8 = with_program(&[0x61, 0x07, 0x81, 0x15]);
        chip8.advance_cpu().unwrap();
        assert_eq!(
            chip8.advance_cpu(),
            Err(Error::UnimplementedOpcode { opcode: 0x8115 })
        );
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.v[0x1], 0x07);
    }

    #[test]
    fn test_fetch_past_memory_faults() {
        let mut chip8 = with_program(&[0x1F, 0xFF]);
        chip8.advance_cpu().unwrap();
        assert_eq!(
            chip8.advance_cpu(),
            Err(Error::MemoryFault {
                region: Region::Ram,
                address: 0x1000
            })
        );
    }

    #[test]
    fn test_timers_count_down_to_zero() {
        let mut chip8 = Chip8::seeded(0);
        chip8.state.delay_timer = 0x2;
        chip8.state.sound_timer = 0x1;
        chip8.advance_timers();
        assert_eq!((chip8.state.delay_timer, chip8.state.sound_timer), (0x1, 0x0));
        chip8.advance_timers();
        chip8.advance_timers();
        assert_eq!((chip8.state.delay_timer, chip8.state.sound_timer), (0x0, 0x0));
    }

    #[test]
    fn test_key_presses_reach_ex9e() {
        // V1 = 5; skip if key 5 pressed
        let mut chip8 = with_program(&[0x61, 0x05, 0xE1, 0x9E]);
        chip8.key_press(0x5);
        chip8.advance_cpu().unwrap();
        chip8.advance_cpu().unwrap();
        assert_eq!(chip8.state.pc, 0x206);
    }

    #[test]
    fn test_key_releases_reach_ex9e() {
        let mut chip8 = with_program(&[0x61, 0x05, 0xE1, 0x9E]);
        chip8.key_press(0x5);
        chip8.key_release(0x5);
        chip8.advance_cpu().unwrap();
        chip8.advance_cpu().unwrap();
        assert_eq!(chip8.state.pc, 0x204);
    }

    #[test]
    fn test_keys_past_f_are_ignored() {
        let mut chip8 = Chip8::seeded(0);
        chip8.key_press(0x10);
        assert_eq!(chip8.pressed_keys, [false; 16]);
    }

    #[test]
    fn test_same_seed_same_random_numbers() {
        let program = [0xC0, 0xFF, 0xC1, 0xFF, 0xC2, 0xFF];
        let run = || {
            let mut chip8 = with_program(&program);
            for _ in 0..3 {
                chip8.advance_cpu().unwrap();
            }
            chip8.state.v
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_quirks_reach_fx55() {
        // I = 0x300; V0 = 9; store V0..V0
        let program = [0xA3, 0x00, 0x60, 0x09, 0xF0, 0x55];
        let mut chip8 = with_program(&program).with_quirks(Quirks {
            store_load: StoreLoad::Cosmac,
        });
        for _ in 0..3 {
            chip8.advance_cpu().unwrap();
        }
        assert_eq!(chip8.state.memory.read(0x300), Ok(0x09));
        assert_eq!(chip8.state.i, 0x301);
    }
}
