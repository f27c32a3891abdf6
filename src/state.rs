use std::ops::Range;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG_REGISTER, FONT, FONT_BASE, FONT_LINES, MEMORY_SIZE,
    PROGRAM_START, STACK_SIZE,
};
use crate::error::MachineError;

/// The FrameBuffer is indexed as [y][x], so its rows are laid out one after another
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// The Chip-8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the next free slot of the stack, 0..=16
///
/// Timers
/// - 2 8-bit timers (delay & sound) counting down to 0 at 60Hz
///
/// ## Memory
/// - a stack of 16 return addresses
/// - 4096 bytes of addressable memory
///     - 0x050..0x0A0 holds the built-in font
///     - ROMs are loaded at 0x200
/// - 32x64 byte frame buffer holding 0 or 1 per pixel
///
/// ## Input
/// - 16 flags tracking the pressed status of keys 0..F
/// - Emulation halts until a key's value is written to `register_needing_key`
///
/// ## Randomness
/// - every State owns its generator, so a seed fully determines a run
#[derive(Clone, Debug)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub pressed_keys: [bool; 16],
    pub draw_flag: bool,
    pub halted: bool,
    pub register_needing_key: Option<u8>,
    pub rng: StdRng,
}

impl State {
    /// A fresh state whose generator is seeded from the operating system
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A fresh state whose generator is seeded with `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_BASE as usize..FONT_BASE as usize + FONT.len();
        for (byte, line) in memory[font].iter_mut().zip(FONT.iter()) {
            *byte = FONT_LINES[*line as usize];
        }

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            delay_timer: 0,
            sound_timer: 0,
            pressed_keys: [false; 16],
            draw_flag: false,
            halted: false,
            register_needing_key: None,
            rng,
        }
    }

    /// Sets VF; always the last write an instruction makes
    pub fn set_flag(&mut self, flag: bool) {
        self.v[FLAG_REGISTER] = flag as u8;
    }

    /// The memory indices `start..start + len`, or the first address that falls outside of memory
    pub fn span(&self, start: u16, len: usize) -> Result<Range<usize>, MachineError> {
        let start = start as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            return Err(MachineError::AddressOutOfRange {
                address: start.max(MEMORY_SIZE),
            });
        }
        Ok(start..end)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
