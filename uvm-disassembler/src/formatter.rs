//! Instruction formatting to assembly text
//!
//! The output is the text syntax the assembler reads back.

use uvm_spec::encoding::MAX_INSTRUCTION_LEN;
use uvm_spec::Instruction;

/// Format instruction as assembly text
pub fn format(instr: &Instruction) -> String {
    instr.to_string()
}

/// Format bytes as space-separated hex, e.g. `E0 00 00 00 01`
pub fn format_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format one listing line: offset, raw bytes, then the instruction
pub fn format_line(offset: usize, bytes: &[u8], instr: &Instruction) -> String {
    // Widest encoding: 5 bytes as "XX " minus the trailing space
    let width = MAX_INSTRUCTION_LEN * 3 - 1;
    format!("0x{:04X}:  {:<width$}  {}", offset, format_bytes(bytes), format(instr))
}
