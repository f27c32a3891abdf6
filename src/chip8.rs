use log::{debug, trace, warn};

use crate::constants::{MAX_ROM_SIZE, PROGRAM_START};
use crate::error::MachineError;
use crate::instruction::{decode, Instruction};
use crate::opcode::Opcode;
use crate::state::{FrameBuffer, State};

/// What a single call to `Chip8::step` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// An instruction ran and the timers ticked
    Executed(Instruction),
    /// Waiting on a key; nothing ran
    AwaitingKey,
    /// A newly pressed key was written to the waiting register
    KeyResolved(u8),
    /// The machine is stopped for good
    Halted,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_keys`, the key sample from the last step, for spotting new key presses
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - stepping the CPU and its timers
/// - taking its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    previous_keys: [bool; 16],
}

impl Chip8 {
    /// A machine whose random numbers are seeded from the operating system
    pub fn new() -> Self {
        Self::from_state(State::new())
    }

    /// A machine whose random numbers are fully determined by `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::from_state(State::with_seed(seed))
    }

    fn from_state(state: State) -> Self {
        Chip8 {
            state,
            previous_keys: [false; 16],
        }
    }

    /// Load a rom into program memory
    ///
    /// # Arguments
    /// * `rom` the raw program bytes; anything longer than program memory is rejected
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), MachineError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(MachineError::RomTooLarge { size: rom.len() });
        }
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + rom.len()].copy_from_slice(rom);
        debug!("loaded {} byte ROM at {:04X}", rom.len(), PROGRAM_START);
        Ok(())
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state.halted
    }

    pub fn is_awaiting_key(&self) -> bool {
        self.state.register_needing_key.is_some()
    }

    /// Whether a tone should be playing
    pub fn is_sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// The frame buffer as it stands, without touching the draw flag
    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if the display should be redrawn, unsetting the draw flag
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the key that was pressed; only its low nibble is used
    pub fn key_press(&mut self, key: u8) {
        self.state.pressed_keys[(key & 0xF) as usize] = true;
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the key that was released; only its low nibble is used
    pub fn key_release(&mut self, key: u8) {
        self.state.pressed_keys[(key & 0xF) as usize] = false;
    }

    /// Replace the pressed status of every key at once
    pub fn set_keys(&mut self, keys: [bool; 16]) {
        self.state.pressed_keys = keys;
    }

    /// Advances the machine by a single logical step
    /// - does nothing once halted
    /// - while awaiting a key, only looks for a newly pressed one
    /// - otherwise gets and executes the next opcode, then ticks the timers
    ///
    /// Any error leaves the machine halted.
    pub fn step(&mut self) -> Result<Step, MachineError> {
        if self.state.halted {
            return Ok(Step::Halted);
        }

        let keys = self.state.pressed_keys;
        let step = match self.state.register_needing_key {
            Some(register) => Ok(self.resolve_key(register, &keys)),
            None => self.execute(),
        };
        self.previous_keys = keys;

        step.map_err(|error| {
            warn!("halting at {:04X}: {}", self.state.pc, error);
            self.state.halted = true;
            error
        })
    }

    /// Steps until halted or `budget` steps have been taken, returning the number taken
    pub fn run(&mut self, budget: usize) -> Result<usize, MachineError> {
        let mut taken = 0;
        while taken < budget && !self.state.halted {
            self.step()?;
            taken += 1;
        }
        Ok(taken)
    }

    /// Writes the lowest newly pressed key to `register` and moves past the wait
    fn resolve_key(&mut self, register: u8, keys: &[bool; 16]) -> Step {
        let pressed = (0..16u8).find(|&key| keys[key as usize] && !self.previous_keys[key as usize]);
        match pressed {
            Some(key) => {
                debug!("key {:X} resolves wait for V{:X}", key, register);
                self.state.v[register as usize] = key;
                self.state.register_needing_key = None;
                self.state.pc += 0x2;
                Step::KeyResolved(key)
            }
            None => Step::AwaitingKey,
        }
    }

    fn execute(&mut self) -> Result<Step, MachineError> {
        let op = Opcode::fetch(&self.state.memory, self.state.pc)?;
        let instruction = decode(op);
        trace!(
            "{} {:?} v{:02X?} i{:04X} pc{:04X}",
            op,
            instruction,
            self.state.v,
            self.state.i,
            self.state.pc
        );
        instruction.execute(op, &mut self.state)?;
        self.advance_timers();
        Ok(Step::Executed(instruction))
    }

    /// Counts both timers down towards 0
    fn advance_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
