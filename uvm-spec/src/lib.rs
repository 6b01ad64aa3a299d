//! # UVM Specification
//!
//! Core types for a tiny stack-based bytecode machine.
//!
//! ## Key Features
//! - 4 opcodes in a 3-bit field (READ_MEM, BINARY_OP, WRITE_MEM, LOAD_CONST)
//! - Variable-length bit-packed encoding (1, 3 or 5 bytes), 5 payload bits per byte
//! - Unpacked intermediate representation with named fields
//! - Operand stack of machine words plus byte-addressable data memory
//! - No control flow: programs run straight through once

pub mod opcode;
pub mod instruction;
pub mod encoding;
pub mod error;
pub mod program;

pub use opcode::Opcode;
pub use instruction::{Instruction, Word};
pub use error::SpecError;
pub use program::{
    IntermediateProgram, Metadata, Program, ProgramFormat, SourceProgram, SourceRecord,
};

/// Default data memory size in cells
pub const DEFAULT_MEMORY_SIZE: usize = 1024;

/// Default code memory capacity in bytes
pub const DEFAULT_CODE_SIZE: usize = 1024;

/// Default step ceiling
pub const DEFAULT_MAX_STEPS: u64 = 1000;

/// Cells a snapshot covers when no end address is given
pub const DEFAULT_DUMP_SPAN: usize = 100;
