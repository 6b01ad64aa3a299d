//! # Program Documents for UVM
//!
//! Three document shapes travel between the assembler and the engine:
//!
//! ```text
//! source list   {"instructions": [{"op": "LOAD_CONST", "value": 128}, ...]}
//! binary        raw bytes, instructions back to back, no header
//! intermediate  {"program": [{"op": "LOAD_CONST", "value": 128}, ...],
//!                "metadata": {"instruction_count": 1, "source_identifier": "..."}}
//! ```

use crate::error::{Result, SpecError};
use crate::instruction::{Instruction, Word};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Source Instruction List
// ============================================================================

/// One unvalidated source record.
///
/// Operand fields are optional here; the assembler decides which ones an
/// operation requires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Operation name, matched case-insensitively. A missing name reads as
    /// empty and is rejected as an unsupported operation.
    #[serde(default)]
    pub op: String,

    /// Constant for LOAD_CONST
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Word>,

    /// Address for WRITE_MEM and BINARY_OP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Word>,
}

impl SourceRecord {
    pub fn new(op: impl Into<String>) -> Self {
        Self {
            op: op.into(),
            value: None,
            address: None,
        }
    }

    pub fn with_value(mut self, value: Word) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_address(mut self, address: Word) -> Self {
        self.address = Some(address);
        self
    }
}

impl From<&Instruction> for SourceRecord {
    fn from(instr: &Instruction) -> Self {
        let record = SourceRecord::new(instr.opcode().mnemonic());
        match *instr {
            Instruction::ReadMem => record,
            Instruction::BinaryOp { address } | Instruction::WriteMem { address } => {
                record.with_address(address)
            }
            Instruction::LoadConst { value } => record.with_value(value),
        }
    }
}

/// Assembler input: an ordered list of source records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceProgram {
    #[serde(default)]
    pub instructions: Vec<SourceRecord>,
}

impl SourceProgram {
    pub fn new(instructions: Vec<SourceRecord>) -> Self {
        Self { instructions }
    }

    /// Parse a source list document
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to a pretty-printed document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

// ============================================================================
// Intermediate Representation
// ============================================================================

/// Intermediate program metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Number of records in `program`
    pub instruction_count: usize,

    /// Where the program came from (usually the source path)
    pub source_identifier: String,
}

/// Unpacked program: named-field records, no bit packing, no truncation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntermediateProgram {
    pub program: Vec<Instruction>,
    pub metadata: Metadata,
}

impl IntermediateProgram {
    /// Create a program, filling in the metadata count
    pub fn new(program: Vec<Instruction>, source_identifier: impl Into<String>) -> Self {
        let metadata = Metadata {
            instruction_count: program.len(),
            source_identifier: source_identifier.into(),
        };
        Self { program, metadata }
    }

    /// Check that the metadata agrees with the program body
    pub fn validate(&self) -> Result<()> {
        if self.metadata.instruction_count != self.program.len() {
            return Err(SpecError::InstructionCountMismatch {
                declared: self.metadata.instruction_count,
                actual: self.program.len(),
            });
        }
        Ok(())
    }

    /// Parse and validate an intermediate document
    pub fn from_json(text: &str) -> Result<Self> {
        let program: Self = serde_json::from_str(text)?;
        program.validate()?;
        Ok(program)
    }

    /// Serialize to a pretty-printed document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.program.len()
    }

    pub fn is_empty(&self) -> bool {
        self.program.is_empty()
    }
}

// ============================================================================
// Executable Program
// ============================================================================

/// Serialized program format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramFormat {
    /// Bit-packed byte stream
    Binary,
    /// JSON intermediate document
    Intermediate,
}

impl ProgramFormat {
    /// Pick a format from a file name: `.json` is intermediate, anything else binary.
    ///
    /// Content sniffing is not possible: `{` (0x7B) is a valid BINARY_OP first byte.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ProgramFormat::Intermediate,
            _ => ProgramFormat::Binary,
        }
    }
}

/// A program in either interchangeable serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Program {
    Binary(Vec<u8>),
    Intermediate(IntermediateProgram),
}

impl Program {
    /// Deserialize from file contents in a known format
    pub fn from_bytes(format: ProgramFormat, bytes: &[u8]) -> Result<Self> {
        match format {
            ProgramFormat::Binary => Ok(Program::Binary(bytes.to_vec())),
            ProgramFormat::Intermediate => {
                let text = std::str::from_utf8(bytes).map_err(|e| {
                    SpecError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
                })?;
                Ok(Program::Intermediate(IntermediateProgram::from_json(text)?))
            }
        }
    }

    /// Serialize to file contents
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Program::Binary(bytes) => Ok(bytes.clone()),
            Program::Intermediate(program) => Ok(program.to_json()?.into_bytes()),
        }
    }

    pub fn format(&self) -> ProgramFormat {
        match self {
            Program::Binary(_) => ProgramFormat::Binary,
            Program::Intermediate(_) => ProgramFormat::Intermediate,
        }
    }
}

impl From<Vec<u8>> for Program {
    fn from(bytes: Vec<u8>) -> Self {
        Program::Binary(bytes)
    }
}

impl From<IntermediateProgram> for Program {
    fn from(program: IntermediateProgram) -> Self {
        Program::Intermediate(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_program_parse() {
        let text = r#"{
            "instructions": [
                {"op": "LOAD_CONST", "value": 128},
                {"op": "WRITE_MEM", "address": 64},
                {"op": "READ_MEM"},
                {"op": "BINARY_OP", "address": 7}
            ]
        }"#;
        let source = SourceProgram::from_json(text).unwrap();
        assert_eq!(source.len(), 4);
        assert_eq!(source.instructions[0], SourceRecord::new("LOAD_CONST").with_value(128));
        assert_eq!(source.instructions[1], SourceRecord::new("WRITE_MEM").with_address(64));
        assert_eq!(source.instructions[2], SourceRecord::new("READ_MEM"));
        assert_eq!(source.instructions[3].address, Some(7));
    }

    #[test]
    fn test_source_program_ignores_unknown_fields() {
        let text = r#"{"instructions": [{"op": "READ_MEM", "comment": "x"}], "labels": {}}"#;
        let source = SourceProgram::from_json(text).unwrap();
        assert_eq!(source.instructions, vec![SourceRecord::new("READ_MEM")]);
    }

    #[test]
    fn test_source_record_missing_op_is_empty() {
        let source = SourceProgram::from_json(r#"{"instructions": [{"value": 5}]}"#).unwrap();
        assert_eq!(source.instructions[0], SourceRecord::new("").with_value(5));
    }

    #[test]
    fn test_source_program_missing_list_is_empty() {
        let source = SourceProgram::from_json("{}").unwrap();
        assert!(source.is_empty());
    }

    #[test]
    fn test_source_record_from_instruction() {
        let record = SourceRecord::from(&Instruction::BinaryOp { address: 5 });
        assert_eq!(record, SourceRecord::new("BINARY_OP").with_address(5));
    }

    #[test]
    fn test_intermediate_document_shape() {
        let program = IntermediateProgram::new(
            vec![Instruction::LoadConst { value: 42 }, Instruction::ReadMem],
            "demo.json",
        );
        let value: serde_json::Value = serde_json::from_str(&program.to_json().unwrap()).unwrap();
        assert_eq!(value["program"][0]["op"], "LOAD_CONST");
        assert_eq!(value["program"][0]["value"], 42);
        assert_eq!(value["program"][1]["op"], "READ_MEM");
        assert_eq!(value["metadata"]["instruction_count"], 2);
        assert_eq!(value["metadata"]["source_identifier"], "demo.json");
    }

    #[test]
    fn test_intermediate_serialization() {
        let program = IntermediateProgram::new(
            vec![
                Instruction::LoadConst { value: 42 },
                Instruction::WriteMem { address: 777 },
            ],
            "inline",
        );
        let text = program.to_json().unwrap();
        let deserialized = IntermediateProgram::from_json(&text).unwrap();
        assert_eq!(program, deserialized);
    }

    #[test]
    fn test_intermediate_count_mismatch() {
        let text = r#"{
            "program": [{"op": "READ_MEM"}],
            "metadata": {"instruction_count": 2, "source_identifier": "x"}
        }"#;
        let err = IntermediateProgram::from_json(text).unwrap_err();
        assert!(matches!(
            err,
            SpecError::InstructionCountMismatch { declared: 2, actual: 1 }
        ));
    }

    #[test]
    fn test_intermediate_unknown_op_rejected() {
        let text = r#"{
            "program": [{"op": "HALT"}],
            "metadata": {"instruction_count": 1, "source_identifier": "x"}
        }"#;
        assert!(matches!(
            IntermediateProgram::from_json(text),
            Err(SpecError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ProgramFormat::from_path("prog.json"), ProgramFormat::Intermediate);
        assert_eq!(ProgramFormat::from_path("PROG.JSON"), ProgramFormat::Intermediate);
        assert_eq!(ProgramFormat::from_path("prog.bin"), ProgramFormat::Binary);
        assert_eq!(ProgramFormat::from_path("prog"), ProgramFormat::Binary);
    }

    #[test]
    fn test_program_from_bytes() {
        let program = Program::from_bytes(ProgramFormat::Binary, &[0x00, 0x60, 0, 0]).unwrap();
        assert_eq!(program, Program::Binary(vec![0x00, 0x60, 0, 0]));
        assert_eq!(program.format(), ProgramFormat::Binary);

        let doc = IntermediateProgram::new(vec![Instruction::ReadMem], "t");
        let bytes = Program::Intermediate(doc.clone()).to_bytes().unwrap();
        let program = Program::from_bytes(ProgramFormat::Intermediate, &bytes).unwrap();
        assert_eq!(program, Program::Intermediate(doc));
    }

    #[test]
    fn test_program_from_bytes_invalid_utf8() {
        let result = Program::from_bytes(ProgramFormat::Intermediate, &[0xFF, 0xFE]);
        assert!(matches!(result, Err(SpecError::IoError(_))));
    }
}
