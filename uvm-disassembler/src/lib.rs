//! # UVM Disassembler
//!
//! Decode bit-packed UVM bytecode and render it as assembly text.
//!
//! The binary form has no header or length prefix: instruction boundaries
//! are recovered only by reading the opcode bits of each first byte in turn.
//! [`decode`] is the single-instruction decoder the runtime uses for its
//! fetch step.
//!
//! ## Example
//!
//! ```rust
//! use uvm_disassembler::{decode, disassemble};
//! use uvm_spec::Instruction;
//!
//! let code = [0xE0, 0x00, 0x00, 0x00, 0x01, 0x00];
//! assert_eq!(decode(&code, 0).unwrap(), (Instruction::LoadConst { value: 128 }, 5));
//! println!("{}", disassemble(&code));
//! ```

pub mod error;
pub mod decoder;
pub mod formatter;
pub mod disassembler;

pub use error::{DisassemblerError, Result};
pub use disassembler::disassemble;
pub use decoder::{decode, decode_all};
pub use formatter::{format, format_bytes, format_line};
