//! Main assembler logic

use std::fmt;
use uvm_spec::{Instruction, IntermediateProgram, SourceProgram, Word};
use crate::encoder::{encode, encode_into};
use crate::error::Result;
use crate::parser::{parse_program, parse_source};

/// Assemble a source list into a binary byte stream.
///
/// Every record is validated before anything is encoded, so a failure never
/// yields partial output.
pub fn assemble(source: &SourceProgram) -> Result<Vec<u8>> {
    let instructions = parse_program(source)?;
    Ok(assemble_instructions(&instructions))
}

/// Concatenate instruction encodings. No header, no separators.
pub fn assemble_instructions(instructions: &[Instruction]) -> Vec<u8> {
    let size = instructions.iter().map(Instruction::encoded_len).sum();
    let mut binary = Vec::with_capacity(size);
    for instr in instructions {
        encode_into(instr, &mut binary);
    }
    binary
}

/// Assemble line-oriented assembly text into a binary byte stream
pub fn assemble_text(text: &str) -> Result<Vec<u8>> {
    assemble(&parse_source(text)?)
}

/// Assemble a source list into the intermediate representation.
///
/// Operands are copied as written; no masking or truncation happens here.
pub fn assemble_intermediate(
    source: &SourceProgram,
    source_identifier: impl Into<String>,
) -> Result<IntermediateProgram> {
    let instructions = parse_program(source)?;
    Ok(IntermediateProgram::new(instructions, source_identifier))
}

// ============================================================================
// Test-Mode Listing
// ============================================================================

/// Per-instruction audit record produced in test mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Instruction as written in the source, e.g. `LOAD_CONST 607`
    pub text: String,

    /// Encoded bytes
    pub bytes: Vec<u8>,

    /// A field: the opcode number
    pub opcode: u8,

    /// B field as written in the source (before truncation); `None` for READ_MEM
    pub operand: Option<Word>,
}

impl ListingEntry {
    pub fn new(instr: &Instruction) -> Self {
        Self {
            text: instr.to_string(),
            bytes: encode(instr),
            opcode: instr.opcode().to_u8(),
            operand: instr.operand(),
        }
    }
}

impl fmt::Display for ListingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Instruction: {}", self.text)?;
        writeln!(f, "Bytes: {}", hex_list(&self.bytes))?;
        writeln!(f, "Field A: {}", self.opcode)?;
        if let Some(operand) = self.operand {
            writeln!(f, "Field B: {}", operand)?;
        }
        write!(f, "---")
    }
}

/// Binary output plus its per-instruction breakdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub binary: Vec<u8>,
    pub entries: Vec<ListingEntry>,
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Program listing ===")?;
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        writeln!(f, "Total bytes: {}", self.binary.len())?;
        write!(f, "Binary: {}", hex_list(&self.binary))
    }
}

/// Assemble in test mode: the binary plus a read-only audit view
pub fn assemble_with_listing(source: &SourceProgram) -> Result<Listing> {
    let instructions = parse_program(source)?;
    let entries: Vec<ListingEntry> = instructions.iter().map(ListingEntry::new).collect();
    let binary = entries.iter().flat_map(|e| e.bytes.iter().copied()).collect();
    Ok(Listing { binary, entries })
}

fn hex_list(bytes: &[u8]) -> String {
    let items: Vec<String> = bytes.iter().map(|b| format!("0x{:02X}", b)).collect();
    format!("[{}]", items.join(", "))
}
