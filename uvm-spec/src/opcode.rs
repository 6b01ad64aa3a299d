//! # UVM Opcode Definitions
//!
//! Opcodes are 3 bits and live in the top bits of an instruction's first byte.
//!
//! ## Opcode Encoding
//!
//! | Opcode       | Value | Encoded length |
//! |--------------|-------|----------------|
//! | `READ_MEM`   | 0     | 1 byte         |
//! | `BINARY_OP`  | 3     | 3 bytes        |
//! | `WRITE_MEM`  | 5     | 3 bytes        |
//! | `LOAD_CONST` | 7     | 5 bytes        |
//!
//! The remaining bit patterns (1, 2, 4, 6) are unassigned and decode as a halt.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction opcode (3 bits)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Opcode {
    /// READ_MEM: pop address, push mem[address]
    ReadMem = 0,
    /// BINARY_OP: pop right, pop left, push left + right
    BinaryOp = 3,
    /// WRITE_MEM: pop value, mem[address] = value & 0xFF
    WriteMem = 5,
    /// LOAD_CONST: push value
    LoadConst = 7,
}

impl Opcode {
    /// Opcode mask (0x7 for 3 bits)
    pub const MASK: u8 = 0x7;

    /// All opcodes in ascending numeric order
    pub const ALL: [Opcode; 4] = [
        Opcode::ReadMem,
        Opcode::BinaryOp,
        Opcode::WriteMem,
        Opcode::LoadConst,
    ];

    /// Try to convert from the 3-bit opcode field
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits & Self::MASK {
            0 => Some(Opcode::ReadMem),
            3 => Some(Opcode::BinaryOp),
            5 => Some(Opcode::WriteMem),
            7 => Some(Opcode::LoadConst),
            _ => None,
        }
    }

    /// Convert to u8
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Encoded length in bytes. A pure function of the opcode.
    #[inline]
    pub const fn encoded_len(self) -> usize {
        match self {
            Opcode::ReadMem => 1,
            Opcode::BinaryOp | Opcode::WriteMem => 3,
            Opcode::LoadConst => 5,
        }
    }

    /// Assembly mnemonic
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::ReadMem => "READ_MEM",
            Opcode::BinaryOp => "BINARY_OP",
            Opcode::WriteMem => "WRITE_MEM",
            Opcode::LoadConst => "LOAD_CONST",
        }
    }

    /// Look up an opcode by mnemonic, ignoring ASCII case
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
