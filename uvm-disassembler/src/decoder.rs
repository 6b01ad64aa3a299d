//! Instruction decoder

use uvm_spec::encoding::{decode_address, decode_load_const, extract_opcode_bits};
use uvm_spec::{Instruction, Opcode, Word};
use crate::error::{DisassemblerError, Result};

/// Decode the instruction starting at `offset`.
///
/// Returns the instruction and its encoded length. The opcode bits alone
/// determine how many bytes are consumed.
pub fn decode(code: &[u8], offset: usize) -> Result<(Instruction, usize)> {
    let [first] = *window::<1>(code, offset)?;

    let bits = extract_opcode_bits(first);
    let opcode = Opcode::from_bits(bits).ok_or(DisassemblerError::UnknownOpcode { offset, bits })?;

    let instr = match opcode {
        Opcode::ReadMem => Instruction::ReadMem,
        Opcode::BinaryOp | Opcode::WriteMem => {
            let address = Word::from(decode_address(window(code, offset)?));
            Instruction::from_parts(opcode, address)
        }
        Opcode::LoadConst => Instruction::LoadConst {
            value: Word::from(decode_load_const(window(code, offset)?)),
        },
    };

    Ok((instr, opcode.encoded_len()))
}

/// Decode a whole byte stream, failing on the first bad instruction
pub fn decode_all(code: &[u8]) -> Result<Vec<Instruction>> {
    let mut instructions = Vec::new();
    let mut offset = 0;
    while offset < code.len() {
        let (instr, len) = decode(code, offset)?;
        instructions.push(instr);
        offset += len;
    }
    Ok(instructions)
}

fn window<const N: usize>(code: &[u8], offset: usize) -> Result<&[u8; N]> {
    code.get(offset..)
        .and_then(|rest| rest.get(..N))
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(DisassemblerError::TruncatedInstruction {
            offset,
            needed: N,
            available: code.len().saturating_sub(offset),
        })
}
