//! Integration tests for the UVM Assembler
//!
//! Tests the complete assembly workflow including:
//! - JSON source documents and the text syntax
//! - Binary and intermediate outputs
//! - Test-mode listings

use uvm_assembler::{
    assemble, assemble_intermediate, assemble_json, assemble_text, assemble_with_listing, encode,
};
use uvm_spec::{Instruction, IntermediateProgram, SourceProgram, SourceRecord};

// ============================================================================
// Basic Assembly Tests
// ============================================================================

#[test]
fn test_assemble_empty_program() {
    let binary = assemble_json(r#"{"instructions": []}"#).unwrap();
    assert!(binary.is_empty());
}

#[test]
fn test_assemble_comments_only() {
    let source = r#"
        # This is a comment
        ; Another comment
    "#;
    let binary = assemble_text(source).unwrap();
    assert!(binary.is_empty());
}

#[test]
fn test_assemble_single_instruction() {
    let binary = assemble_json(r#"{"instructions": [{"op": "READ_MEM"}]}"#).unwrap();
    assert_eq!(binary, vec![0x00]);
}

#[test]
fn test_total_length_is_sum_of_lengths() {
    let source = r#"{"instructions": [
        {"op": "LOAD_CONST", "value": 1},
        {"op": "LOAD_CONST", "value": 2},
        {"op": "BINARY_OP", "address": 0},
        {"op": "WRITE_MEM", "address": 0},
        {"op": "READ_MEM"}
    ]}"#;
    let binary = assemble_json(source).unwrap();
    assert_eq!(binary.len(), 5 + 5 + 3 + 3 + 1);
}

#[test]
fn test_binary_is_concatenation_of_encodings() {
    let instrs = vec![
        Instruction::LoadConst { value: 0x1234_5678 },
        Instruction::WriteMem { address: 0x1_0000 },
        Instruction::ReadMem,
        Instruction::BinaryOp { address: 3 },
    ];
    let source = SourceProgram::new(instrs.iter().map(SourceRecord::from).collect());
    let binary = assemble(&source).unwrap();

    let expected: Vec<u8> = instrs.iter().flat_map(encode).collect();
    assert_eq!(binary, expected);
}

#[test]
fn test_reference_bytes() {
    // Byte patterns produced by the reference assembler
    assert_eq!(
        assemble_json(r#"{"instructions": [{"op": "WRITE_MEM", "address": 777}]}"#).unwrap(),
        vec![0xA0, 0x00, 0x0C]
    );
    assert_eq!(
        assemble_json(r#"{"instructions": [{"op": "LOAD_CONST", "value": 607}]}"#).unwrap(),
        vec![0xE0, 0x00, 0x00, 0x00, 0x04]
    );
}

#[test]
fn test_text_and_json_agree() {
    let json = r#"{"instructions": [
        {"op": "load_const", "value": 4096},
        {"op": "Write_Mem", "address": 128},
        {"op": "READ_MEM"}
    ]}"#;
    let text = "LOAD_CONST 0x1000\nWRITE_MEM 128\nREAD_MEM\n";
    assert_eq!(assemble_json(json).unwrap(), assemble_text(text).unwrap());
}

// ============================================================================
// Intermediate Output Tests
// ============================================================================

#[test]
fn test_intermediate_document_roundtrip() {
    let source = SourceProgram::from_json(
        r#"{"instructions": [
            {"op": "LOAD_CONST", "value": 42},
            {"op": "WRITE_MEM", "address": 10},
            {"op": "BINARY_OP", "address": 99}
        ]}"#,
    )
    .unwrap();

    let program = assemble_intermediate(&source, "program.json").unwrap();
    let text = program.to_json().unwrap();
    let reloaded = IntermediateProgram::from_json(&text).unwrap();

    assert_eq!(reloaded, program);
    assert_eq!(
        reloaded.program,
        vec![
            Instruction::LoadConst { value: 42 },
            Instruction::WriteMem { address: 10 },
            Instruction::BinaryOp { address: 99 },
        ]
    );
}

#[test]
fn test_intermediate_is_not_truncated() {
    let source = SourceProgram::new(vec![SourceRecord::new("LOAD_CONST").with_value(42)]);
    let program = assemble_intermediate(&source, "x").unwrap();
    assert_eq!(program.program[0], Instruction::LoadConst { value: 42 });
}

// ============================================================================
// Listing Tests
// ============================================================================

#[test]
fn test_listing_matches_binary() {
    let source = SourceProgram::new(vec![
        SourceRecord::new("LOAD_CONST").with_value(607),
        SourceRecord::new("READ_MEM"),
    ]);
    let listing = assemble_with_listing(&source).unwrap();

    assert_eq!(listing.binary, assemble(&source).unwrap());
    assert_eq!(listing.entries[0].bytes, vec![0xE0, 0x00, 0x00, 0x00, 0x04]);
    assert_eq!(listing.entries[0].operand, Some(607));
    assert_eq!(listing.entries[1].opcode, 0);
}
