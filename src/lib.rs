pub use crate::chip8::{Chip8, Step};
pub use crate::error::MachineError;
pub use crate::instruction::{decode, Instruction};
pub use crate::opcode::Opcode;
pub use crate::state::{FrameBuffer, State};
pub use crate::timing::FixedTimestep;

mod chip8;
pub mod constants;
pub mod diagnostics;
mod error;
mod instruction;
mod opcode;
mod operations;
pub mod state;
mod timing;
