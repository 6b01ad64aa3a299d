//! Instruction execution
//!
//! Execution is total. Stack underflow turns the instruction into a no-op;
//! out-of-range addresses are handled by [`DataMemory`].

use tracing::trace;
use uvm_spec::Instruction;
use crate::memory::DataMemory;
use crate::state::VMState;

/// Execute a single instruction
pub fn execute(instr: &Instruction, state: &mut VMState, memory: &mut DataMemory) {
    match *instr {
        Instruction::LoadConst { value } => state.push(value),

        Instruction::ReadMem => match state.pop() {
            Some(addr) => state.push(memory.load(addr)),
            None => trace!(pc = state.pc, "READ_MEM on empty stack"),
        },

        Instruction::WriteMem { address } => match state.pop() {
            Some(value) => {
                memory.store(address, value);
            }
            None => trace!(pc = state.pc, "WRITE_MEM on empty stack"),
        },

        // The address field is not used
        Instruction::BinaryOp { .. } => match state.pop_pair() {
            Some((left, right)) => state.push(left.wrapping_add(right)),
            None => trace!(pc = state.pc, depth = state.stack.len(), "BINARY_OP needs two operands"),
        },
    }
}
