use crate::error::MachineError;
use crate::opcode::Opcode;
use crate::operations::{self, Outcome};
use crate::state::State;

/// Every instruction handler the interpreter knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    Halt,
    Clear,
    Return,
    Jump,
    Call,
    SkipEqImm,
    SkipNeImm,
    SkipEqReg,
    LoadImm,
    AddImm,
    SkipNeReg,
    LoadIndex,
    JumpIndexed,
    Random,
    Draw,
    Move,
    Or,
    And,
    Xor,
    AddWithCarry,
    SubWithBorrow,
    ShiftRight,
    ReverseSub,
    ShiftLeft,
    SkipKeyDown,
    SkipKeyUp,
    GetDelay,
    WaitForKey,
    SetDelay,
    SetSound,
    AddToIndex,
    SpriteAddress,
    StoreBcd,
    StoreRegisters,
    LoadRegisters,
    Unknown,
}

/// An opcode matches a rule when `opcode & mask == value`
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub mask: u16,
    pub value: u16,
    pub instruction: Instruction,
}

const fn rule(mask: u16, value: u16, instruction: Instruction) -> Rule {
    Rule {
        mask,
        value,
        instruction,
    }
}

/// # Decode rules
/// Checked in order, first match wins. Literal opcodes come before the families
/// sharing their high nibble; anything left over is `Instruction::Unknown`.
pub const RULES: [Rule; 35] = [
    // exact literals
    rule(0xFFFF, 0x0000, Instruction::Halt),
    rule(0xFFFF, 0x00E0, Instruction::Clear),
    rule(0xFFFF, 0x00EE, Instruction::Return),
    // high nibble families
    rule(0xF000, 0x1000, Instruction::Jump),
    rule(0xF000, 0x2000, Instruction::Call),
    rule(0xF000, 0x3000, Instruction::SkipEqImm),
    rule(0xF000, 0x4000, Instruction::SkipNeImm),
    rule(0xF00F, 0x5000, Instruction::SkipEqReg),
    rule(0xF000, 0x6000, Instruction::LoadImm),
    rule(0xF000, 0x7000, Instruction::AddImm),
    rule(0xF00F, 0x9000, Instruction::SkipNeReg),
    rule(0xF000, 0xA000, Instruction::LoadIndex),
    rule(0xF000, 0xB000, Instruction::JumpIndexed),
    rule(0xF000, 0xC000, Instruction::Random),
    rule(0xF000, 0xD000, Instruction::Draw),
    // 8xy_ by low nibble
    rule(0xF00F, 0x8000, Instruction::Move),
    rule(0xF00F, 0x8001, Instruction::Or),
    rule(0xF00F, 0x8002, Instruction::And),
    rule(0xF00F, 0x8003, Instruction::Xor),
    rule(0xF00F, 0x8004, Instruction::AddWithCarry),
    rule(0xF00F, 0x8005, Instruction::SubWithBorrow),
    rule(0xF00F, 0x8006, Instruction::ShiftRight),
    rule(0xF00F, 0x8007, Instruction::ReverseSub),
    rule(0xF00F, 0x800E, Instruction::ShiftLeft),
    // Ex__ by low byte
    rule(0xF0FF, 0xE09E, Instruction::SkipKeyDown),
    rule(0xF0FF, 0xE0A1, Instruction::SkipKeyUp),
    // Fx__ by low byte
    rule(0xF0FF, 0xF007, Instruction::GetDelay),
    rule(0xF0FF, 0xF00A, Instruction::WaitForKey),
    rule(0xF0FF, 0xF015, Instruction::SetDelay),
    rule(0xF0FF, 0xF018, Instruction::SetSound),
    rule(0xF0FF, 0xF01E, Instruction::AddToIndex),
    rule(0xF0FF, 0xF029, Instruction::SpriteAddress),
    rule(0xF0FF, 0xF033, Instruction::StoreBcd),
    rule(0xF0FF, 0xF055, Instruction::StoreRegisters),
    rule(0xF0FF, 0xF065, Instruction::LoadRegisters),
];

/// Selects the Instruction for a given Opcode
pub fn decode(op: Opcode) -> Instruction {
    RULES
        .iter()
        .find(|rule| op.0 & rule.mask == rule.value)
        .map_or(Instruction::Unknown, |rule| rule.instruction)
}

impl Instruction {
    /// Applies the instruction's effect to `state`
    pub fn execute(self, op: Opcode, state: &mut State) -> Result<(), MachineError> {
        use Instruction::*;

        let handler: fn(Opcode, &mut State) -> Outcome = match self {
            Halt => operations::halt,
            Clear => operations::clr,
            Return => operations::rts,
            Jump => operations::jump,
            Call => operations::call,
            SkipEqImm => operations::ske,
            SkipNeImm => operations::skne,
            SkipEqReg => operations::skre,
            LoadImm => operations::load,
            AddImm => operations::add,
            SkipNeReg => operations::skrne,
            LoadIndex => operations::loadi,
            JumpIndexed => operations::jumpi,
            Random => operations::rnd,
            Draw => operations::draw,
            Move => operations::mv,
            Or => operations::or,
            And => operations::and,
            Xor => operations::xor,
            AddWithCarry => operations::addr,
            SubWithBorrow => operations::sub,
            ShiftRight => operations::shr,
            ReverseSub => operations::subn,
            ShiftLeft => operations::shl,
            SkipKeyDown => operations::skpr,
            SkipKeyUp => operations::skup,
            GetDelay => operations::moved,
            WaitForKey => operations::keyd,
            SetDelay => operations::loadd,
            SetSound => operations::loads,
            AddToIndex => operations::addi,
            SpriteAddress => operations::ldspr,
            StoreBcd => operations::bcd,
            StoreRegisters => operations::stor,
            LoadRegisters => operations::read,
            Unknown => operations::unknown,
        };
        handler(op, state)
    }
}
