use thiserror::Error;

/// Conditions that stop a Chip-8.
///
/// Everything but `RomTooLarge` is raised while stepping and leaves the machine halted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MachineError {
    /// An opcode fetch or a memory-relative instruction reached past the end of memory.
    #[error("address 0x{address:04X} is outside of memory")]
    AddressOutOfRange { address: usize },

    /// No decode rule matched.
    #[error("unknown opcode 0x{opcode:04X}")]
    UnknownOpcode { opcode: u16 },

    /// A call was made with every stack slot in use.
    #[error("stack overflow calling from 0x{pc:04X}")]
    StackOverflow { pc: u16 },

    /// A return was made with an empty stack.
    #[error("stack underflow returning from 0x{pc:04X}")]
    StackUnderflow { pc: u16 },

    /// The ROM doesn't fit between the program start and the end of memory.
    #[error("ROM of {size} bytes does not fit in program memory")]
    RomTooLarge { size: usize },
}
