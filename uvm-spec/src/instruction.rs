//! UVM Instruction Set
//!
//! Four instructions over an operand stack and a byte-addressable data memory.
//! There is no control flow: programs run straight through once.
//!
//! The serde form is the intermediate-program record:
//! `{"op": "LOAD_CONST", "value": 128}`, `{"op": "WRITE_MEM", "address": 64}`,
//! `{"op": "BINARY_OP", "address": 0}`, `{"op": "READ_MEM"}`.

use crate::Opcode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine word. Stack values are never truncated; only stores narrow to a byte.
pub type Word = i64;

/// UVM Instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Instruction {
    /// READ_MEM: addr = pop; push mem[addr] (0 when out of range)
    ReadMem,

    /// BINARY_OP: right = pop; left = pop; push left + right
    ///
    /// `address` is carried for format compatibility only and is never read
    /// by the engine.
    BinaryOp {
        #[serde(default)]
        address: Word,
    },

    /// WRITE_MEM: value = pop; mem[address] = value & 0xFF
    WriteMem { address: Word },

    /// LOAD_CONST: push value
    LoadConst { value: Word },
}

impl Instruction {
    /// Opcode of this instruction
    pub const fn opcode(&self) -> Opcode {
        match self {
            Instruction::ReadMem => Opcode::ReadMem,
            Instruction::BinaryOp { .. } => Opcode::BinaryOp,
            Instruction::WriteMem { .. } => Opcode::WriteMem,
            Instruction::LoadConst { .. } => Opcode::LoadConst,
        }
    }

    /// The B field: the constant or address, `None` for READ_MEM
    pub const fn operand(&self) -> Option<Word> {
        match self {
            Instruction::ReadMem => None,
            Instruction::BinaryOp { address } | Instruction::WriteMem { address } => {
                Some(*address)
            }
            Instruction::LoadConst { value } => Some(*value),
        }
    }

    /// Encoded length in bytes
    #[inline]
    pub const fn encoded_len(&self) -> usize {
        self.opcode().encoded_len()
    }

    /// Build an instruction from an opcode and its B field
    pub const fn from_parts(opcode: Opcode, operand: Word) -> Self {
        match opcode {
            Opcode::ReadMem => Instruction::ReadMem,
            Opcode::BinaryOp => Instruction::BinaryOp { address: operand },
            Opcode::WriteMem => Instruction::WriteMem { address: operand },
            Opcode::LoadConst => Instruction::LoadConst { value: operand },
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operand() {
            Some(operand) => write!(f, "{} {}", self.opcode(), operand),
            None => write!(f, "{}", self.opcode()),
        }
    }
}
