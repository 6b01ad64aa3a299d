//! Main disassembler logic

use crate::decoder::decode;
use crate::error::DisassemblerError;
use crate::formatter::{format_bytes, format_line};

/// Disassemble a binary program into an annotated listing.
///
/// Decoding stops where the engine would halt: at unknown opcode bits or at
/// an incomplete trailing instruction. The remaining bytes are reported but
/// not interpreted.
pub fn disassemble(code: &[u8]) -> String {
    let mut lines = Vec::new();
    let mut offset = 0;
    let mut stop = None;

    while offset < code.len() {
        match decode(code, offset) {
            Ok((instr, len)) => {
                lines.push(format_line(offset, &code[offset..offset + len], &instr));
                offset += len;
            }
            Err(e) => {
                stop = Some(e);
                break;
            }
        }
    }

    let mut output = String::new();
    output.push_str("; UVM Disassembly\n");
    output.push_str(&format!(
        "; Code size: {} bytes ({} instructions)\n",
        code.len(),
        lines.len()
    ));
    output.push('\n');

    for line in &lines {
        output.push_str(line);
        output.push('\n');
    }

    if let Some(e) = stop {
        let reason = match e {
            DisassemblerError::UnknownOpcode { .. } => "halt",
            DisassemblerError::TruncatedInstruction { .. } => "incomplete",
        };
        output.push_str(&format!("; {}: {}\n", reason, e));
        output.push_str(&format!(
            "; {} trailing bytes not executed: {}\n",
            code.len() - offset,
            format_bytes(&code[offset..])
        ));
    }

    output
}
