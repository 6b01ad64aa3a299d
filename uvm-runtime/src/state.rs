//! VM state for UVM

use std::fmt;
use uvm_spec::Word;

/// VM state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VMState {
    /// Operand stack, top at the end
    pub stack: Vec<Word>,

    /// Program counter: byte offset (binary) or record index (intermediate)
    pub pc: usize,

    /// Executed instruction count
    pub steps: u64,

    /// Halted flag
    pub halted: bool,

    /// Halt reason
    pub halt_reason: Option<HaltReason>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HaltReason {
    /// Program counter reached the end of code memory
    EndOfProgram,
    /// Opcode bits matched no instruction; the byte at `pc` was consumed
    UnknownOpcode { pc: usize, bits: u8 },
    /// The last bytes do not form a complete instruction
    TruncatedInstruction { pc: usize },
    /// Step ceiling reached
    StepLimit,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HaltReason::EndOfProgram => write!(f, "end of program"),
            HaltReason::UnknownOpcode { pc, bits } => {
                write!(f, "unknown opcode bits {:#05b} at pc {}", bits, pc)
            }
            HaltReason::TruncatedInstruction { pc } => {
                write!(f, "incomplete instruction at pc {}", pc)
            }
            HaltReason::StepLimit => write!(f, "step limit reached"),
        }
    }
}

impl VMState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, value: Word) {
        self.stack.push(value);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Word> {
        self.stack.pop()
    }

    /// Pop `(left, right)`; the right operand is on top.
    ///
    /// Leaves the stack untouched when it holds fewer than two values.
    pub fn pop_pair(&mut self) -> Option<(Word, Word)> {
        if self.stack.len() < 2 {
            return None;
        }
        let right = self.stack.pop()?;
        let left = self.stack.pop()?;
        Some((left, right))
    }

    /// Halt execution
    pub fn halt(&mut self, reason: HaltReason) {
        self.halted = true;
        self.halt_reason = Some(reason);
    }
}
