//! Instruction encoding to the bit-packed binary form
//!
//! Operands are masked, never range checked: constants keep their low 32
//! bits and addresses their low 21 bits before packing.

use uvm_spec::encoding::{encode_address, encode_load_const, encode_read_mem};
use uvm_spec::Instruction;

/// Append the encoding of `instr` to `out`
pub fn encode_into(instr: &Instruction, out: &mut Vec<u8>) {
    match *instr {
        Instruction::ReadMem => out.extend_from_slice(&encode_read_mem()),
        Instruction::BinaryOp { address } | Instruction::WriteMem { address } => {
            out.extend_from_slice(&encode_address(instr.opcode(), address))
        }
        Instruction::LoadConst { value } => out.extend_from_slice(&encode_load_const(value)),
    }
}

/// Encode instruction to its 1, 3 or 5 byte form
pub fn encode(instr: &Instruction) -> Vec<u8> {
    let mut out = Vec::with_capacity(instr.encoded_len());
    encode_into(instr, &mut out);
    out
}
