/// Addressable memory in bytes (0x000..=0xFFF)
pub const MEMORY_SIZE: usize = 4096;

/// ROMs are loaded, and execution starts, at this address
pub const PROGRAM_START: u16 = 0x200;

/// Largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Number of return addresses the stack can hold
pub const STACK_SIZE: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// VF doubles as the carry/borrow/collision flag
pub const FLAG_REGISTER: usize = 0xF;

/// Rate at which logical steps are taken and the timers count down
pub const TIMER_HZ: u32 = 60;

/// Start of the built-in font in memory
pub const FONT_BASE: u16 = 0x50;

/// Bytes per glyph; each byte is one 8-pixel row of which only the high nibble is used
pub const GLYPH_SIZE: u16 = 5;

/// # Font lines
/// Every row of every built-in glyph is one of four shapes.
/// ```text
/// 0: ****
/// 1: *--*
/// 2: ---*
/// 3: *---
/// ```
pub const FONT_LINES: [u8; 4] = [0xF0, 0x90, 0x10, 0x80];

/// # Font
/// Glyphs 0..F, five rows each, as indices into `FONT_LINES`.
pub const FONT: [u8; 80] = [
    0, 1, 1, 1, 0, // 0
    2, 2, 2, 2, 2, // 1
    0, 2, 0, 3, 0, // 2
    0, 2, 0, 2, 0, // 3
    1, 1, 0, 2, 2, // 4
    0, 3, 0, 2, 0, // 5
    0, 3, 0, 1, 0, // 6
    0, 2, 2, 2, 2, // 7
    0, 1, 0, 1, 0, // 8
    0, 1, 0, 2, 2, // 9
    0, 1, 0, 1, 1, // A
    3, 3, 0, 1, 0, // B
    0, 3, 3, 3, 0, // C
    2, 2, 0, 1, 0, // D
    0, 1, 0, 3, 0, // E
    0, 3, 0, 3, 3, // F
];
