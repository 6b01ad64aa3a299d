//! Disassembler errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DisassemblerError {
    #[error("Unknown opcode bits {bits:#05b} at offset {offset:#06x}")]
    UnknownOpcode { offset: usize, bits: u8 },

    #[error("Truncated instruction at offset {offset:#06x}: needs {needed} bytes, {available} available")]
    TruncatedInstruction {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

pub type Result<T> = std::result::Result<T, DisassemblerError>;
