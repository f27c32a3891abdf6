use std::fmt;

use crate::constants::MEMORY_SIZE;
use crate::error::MachineError;

/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each. Their behavior is cased on some combination of:
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within a category
/// - `(_, _, n, n)` more specific behavior within a category
/// - `(_, n, n, n)` some fixed function that doesn't require variables (e.g. CLS; clear screen)
///
/// Nibbles not used to determine the operation often (but not always) carry important data.
/// - `(_, n, n, n)` represent a 12-bit address
/// - `(_, _, n, n)` encodes some data that is assigned to and/or compared with Vx
/// - `(_, n, _, _)` refers either to the register Vx or a range of registers V0..=Vx
/// - `(_, _, n, _)` refers to the the register Vy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Reads the opcode at `pc`.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes,
    /// most significant first.
    pub fn fetch(memory: &[u8; MEMORY_SIZE], pc: u16) -> Result<Self, MachineError> {
        let address = pc as usize;
        if address + 1 >= MEMORY_SIZE {
            return Err(MachineError::AddressOutOfRange { address });
        }
        let left = u16::from(memory[address]);
        let right = u16::from(memory[address + 1]);
        Ok(Opcode(left << 8 | right))
    }

    /// Returns the Opcode's component nibbles.
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        (
            ((self.0 & 0xF000) >> 12) as u8,
            ((self.0 & 0x0F00) >> 8) as u8,
            ((self.0 & 0x00F0) >> 4) as u8,
            (self.0 & 0x000F) as u8,
        )
    }

    /// The Opcode's second nibble as a register index.
    /// `[_x__]`
    pub fn x(self) -> usize {
        usize::from((self.0 & 0x0F00) >> 8)
    }

    /// The Opcode's third nibble as a register index.
    /// `[__y_]`
    pub fn y(self) -> usize {
        usize::from((self.0 & 0x00F0) >> 4)
    }

    /// The Opcode's fourth nibble.
    /// `[___n]`
    pub fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    /// The Opcode's least significant byte.
    /// `[__nn]`
    pub fn nn(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// The Opcode without its most significant nibble.
    /// `[_nnn]`
    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    #[test]
    fn test_nibbles() {
        let op = Opcode(0xABCD);
        assert_eq!(op.nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_x() {
        assert_eq!(Opcode(0xABCD).x(), 0xB);
    }

    #[test]
    fn test_y() {
        assert_eq!(Opcode(0xABCD).y(), 0xC);
    }

    #[test]
    fn test_n() {
        assert_eq!(Opcode(0xABCD).n(), 0xD);
    }

    #[test]
    fn test_nn() {
        assert_eq!(Opcode(0xABCD).nn(), 0xCD);
    }

    #[test]
    fn test_nnn() {
        assert_eq!(Opcode(0xABCD).nnn(), 0x0BCD);
    }

    #[test]
    fn test_display_is_zero_padded_hex() {
        assert_eq!(Opcode(0x00E0).to_string(), "00E0");
    }

    #[test]
    fn test_fetch_is_big_endian() {
        let mut memory = [0; MEMORY_SIZE];
        memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(Opcode::fetch(&memory, 0x200), Ok(Opcode(0xAABB)));
    }

    #[test]
    fn test_fetch_last_whole_opcode() {
        let mut memory = [0; MEMORY_SIZE];
        memory[0xFFE..].copy_from_slice(&[0x12, 0x34]);
        assert_eq!(Opcode::fetch(&memory, 0xFFE), Ok(Opcode(0x1234)));
    }

    #[test]
    fn test_fetch_past_end_of_memory() {
        let memory = [0; MEMORY_SIZE];
        assert_eq!(
            Opcode::fetch(&memory, 0xFFF),
            Err(MachineError::AddressOutOfRange { address: 0xFFF })
        );
        assert_eq!(
            Opcode::fetch(&memory, 0x10FE),
            Err(MachineError::AddressOutOfRange { address: 0x10FE })
        );
    }
}
