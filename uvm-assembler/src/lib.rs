//! UVM Assembler
//!
//! Turn source instruction records into a bit-packed binary stream or an
//! unpacked intermediate program.
//!
//! ## Example
//!
//! ```rust
//! use uvm_assembler::assemble;
//! use uvm_spec::{SourceProgram, SourceRecord};
//!
//! let source = SourceProgram::new(vec![
//!     SourceRecord::new("LOAD_CONST").with_value(128),
//!     SourceRecord::new("WRITE_MEM").with_address(64),
//! ]);
//!
//! let binary = assemble(&source).unwrap();
//! assert_eq!(binary.len(), 8);
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod encoder;
pub mod assembler;

pub use error::{AssemblerError, Result};
pub use assembler::{
    assemble, assemble_instructions, assemble_intermediate, assemble_text, assemble_with_listing,
    Listing, ListingEntry,
};
pub use parser::{parse_program, parse_record, parse_source};
pub use encoder::{encode, encode_into};

/// Parse a source list document and assemble it to binary
pub fn assemble_json(text: &str) -> Result<Vec<u8>> {
    let source = uvm_spec::SourceProgram::from_json(text)?;
    assemble(&source)
}
