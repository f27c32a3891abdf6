//! Human readable dumps of machine state for debugging. The layout is for people, not parsers.

use std::fmt::Write;

use crate::constants::MEMORY_SIZE;
use crate::state::{FrameBuffer, State};

const BYTES_PER_LINE: usize = 16;

fn printable(byte: u8) -> char {
    if (b' '..=b'~').contains(&byte) {
        byte as char
    } else {
        '.'
    }
}

/// Tabulates V0..VF followed by I, pc, sp and the timers.
///
/// # Arguments
/// * `ascii` show registers as characters instead of hex
pub fn dump_registers(state: &State, ascii: bool) -> String {
    let mut out = String::new();
    for (row, registers) in state.v.chunks(8).enumerate() {
        out.push('|');
        for index in 0..registers.len() {
            let _ = write!(out, "   V{:X} |", row * 8 + index);
        }
        out.push_str("\n|");
        for value in registers {
            if ascii {
                let _ = write!(out, "    {} |", printable(*value));
            } else {
                let _ = write!(out, " {:#04x} |", value);
            }
        }
        out.push_str("\n\n");
    }

    out.push_str("|      I |     pc |   sp |   dt |   st |\n");
    let _ = write!(
        out,
        "| {:#06x} | {:#06x} | {:#04x} | {:#04x} | {:#04x} |",
        state.i, state.pc, state.sp, state.delay_timer, state.sound_timer
    );
    out
}

/// Hex dump of all of memory; address, 16 bytes, then the printable ones.
pub fn dump_memory(state: &State) -> String {
    let mut out = String::with_capacity(MEMORY_SIZE / BYTES_PER_LINE * 72);
    for (line, bytes) in state.memory.chunks(BYTES_PER_LINE).enumerate() {
        let _ = write!(out, "{:04x} ", line * BYTES_PER_LINE);
        for byte in bytes {
            let _ = write!(out, "{:02x} ", byte);
        }
        out.push_str(" : ");
        out.extend(bytes.iter().map(|&byte| printable(byte)));
        out.push('\n');
    }
    out
}

/// One line per display row, `#` for a lit pixel and `.` otherwise.
pub fn dump_frame(frame: &FrameBuffer) -> String {
    frame
        .iter()
        .map(|row| {
            row.iter()
                .map(|&pixel| if pixel == 0 { '.' } else { '#' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

    #[test]
    fn test_dump_registers_names_everything() {
        let mut state = State::new();
        state.v[0xA] = 0x2A;
        state.i = 0x123;
        let dump = dump_registers(&state, false);
        for register in 0..16 {
            assert!(dump.contains(&format!("V{:X}", register)));
        }
        assert!(dump.contains("0x2a"));
        assert!(dump.contains("0x0123"));
        assert!(dump.contains("0x0200"));
    }

    #[test]
    fn test_dump_registers_ascii() {
        let mut state = State::new();
        state.v[0x0] = b'A';
        let dump = dump_registers(&state, true);
        assert!(dump.contains("    A |"));
        assert!(dump.contains("    . |"));
    }

    #[test]
    fn test_dump_memory_lines() {
        let mut state = State::new();
        state.memory[0x200..0x203].copy_from_slice(b"hi\x00");
        let dump = dump_memory(&state);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 256);
        assert!(lines[0x20].starts_with("0200 68 69 00 "));
        assert!(lines[0x20].ends_with(" : hi.............."));
        assert!(lines[0x05].starts_with("0050 f0 90 90 90 f0 "));
    }

    #[test]
    fn test_dump_frame() {
        let mut frame = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        frame[0][0] = 1;
        frame[31][63] = 1;
        let dump = dump_frame(&frame);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), DISPLAY_HEIGHT);
        assert!(lines.iter().all(|line| line.len() == DISPLAY_WIDTH));
        assert!(lines[0].starts_with("#."));
        assert!(lines[31].ends_with(".#"));
    }
}
