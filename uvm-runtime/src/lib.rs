//! # UVM Runtime
//!
//! Execute UVM programs on a stack machine with byte-addressable data memory.
//!
//! ## Features
//!
//! - **Two program forms**: bit-packed binary (pc is a byte offset) or the
//!   unpacked intermediate list (pc is a record index)
//! - **Total execution**: stack underflow and out-of-range accesses are
//!   absorbed in place; `run` always returns a final state
//! - **Step ceiling**: the only way to stop a run early
//! - **Snapshots**: JSON view of a memory range plus stack and counters
//!
//! ## Example
//!
//! ```rust
//! use uvm_runtime::{VM, VMConfig, HaltReason};
//! use uvm_spec::Program;
//!
//! // LOAD_CONST 128; WRITE_MEM 64
//! let program = Program::Binary(vec![0xE0, 0x00, 0x00, 0x00, 0x01, 0xA0, 0x00, 0x01]);
//! let mut vm = VM::new(program, VMConfig::default());
//! let result = vm.run();
//!
//! assert_eq!(result.halt_reason, HaltReason::EndOfProgram);
//! assert_eq!(vm.memory().load(64), 128);
//! ```

pub mod error;
pub mod state;
pub mod memory;
pub mod execute;
pub mod vm;
pub mod snapshot;
pub mod io;

pub use state::{VMState, HaltReason};
pub use memory::{CodeMemory, DataMemory};
pub use execute::execute;
pub use vm::{VM, VMConfig, ExecutionResult};
pub use snapshot::MemorySnapshot;
pub use io::{load_program, load_program_auto, write_program, write_snapshot};
pub use error::{RuntimeError, Result};

/// Simple execution helper
///
/// Runs a program with the default configuration and returns the final stack.
pub fn run(program: uvm_spec::Program) -> Vec<uvm_spec::Word> {
    VM::new(program, VMConfig::default()).run().stack
}
