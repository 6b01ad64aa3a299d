//! Virtual Machine for UVM

use tracing::debug;
use uvm_spec::{Program, Word, DEFAULT_CODE_SIZE, DEFAULT_MAX_STEPS, DEFAULT_MEMORY_SIZE};
use crate::execute::execute;
use crate::memory::{CodeMemory, DataMemory};
use crate::snapshot::MemorySnapshot;
use crate::state::{HaltReason, VMState};

/// VM configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VMConfig {
    /// Data memory size in cells
    pub memory_size: usize,

    /// Code memory capacity in bytes; longer binaries are truncated at load
    pub code_size: usize,

    /// Maximum number of executed instructions before halting
    pub max_steps: u64,

    /// Log every executed instruction at debug level
    pub trace: bool,
}

impl Default for VMConfig {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            code_size: DEFAULT_CODE_SIZE,
            max_steps: DEFAULT_MAX_STEPS,
            trace: false,
        }
    }
}

/// Execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Number of instructions executed
    pub steps: u64,

    /// Reason for halting
    pub halt_reason: HaltReason,

    /// Final operand stack, top last
    pub stack: Vec<Word>,

    /// Final program counter
    pub pc: usize,
}

/// UVM Virtual Machine
///
/// Owns one machine state exclusively. A run never fails: every anomaly
/// is either absorbed or turned into a [`HaltReason`].
#[derive(Debug, Clone)]
pub struct VM {
    /// Stack, pc and counters
    state: VMState,

    /// Loaded program
    code: CodeMemory,

    /// Data memory
    memory: DataMemory,

    /// Configuration
    config: VMConfig,
}

impl VM {
    /// Create a VM with zeroed data memory
    pub fn new(program: Program, config: VMConfig) -> Self {
        let memory = DataMemory::new(config.memory_size);
        Self::build(program, memory, config)
    }

    /// Create a VM with data memory pre-loaded from `initial`
    pub fn with_memory(program: Program, initial: &[u8], config: VMConfig) -> Self {
        let memory = DataMemory::with_contents(config.memory_size, initial);
        Self::build(program, memory, config)
    }

    fn build(program: Program, memory: DataMemory, config: VMConfig) -> Self {
        let code = CodeMemory::load(program, config.code_size);
        Self {
            state: VMState::new(),
            code,
            memory,
            config,
        }
    }

    /// Run one fetch-execute cycle.
    ///
    /// Returns `true` if an instruction was executed, `false` once halted.
    pub fn step(&mut self) -> bool {
        if self.state.halted {
            return false;
        }

        if self.state.steps >= self.config.max_steps {
            self.halt(HaltReason::StepLimit);
            return false;
        }

        let (instr, len) = match self.code.fetch(self.state.pc) {
            Ok(fetched) => fetched,
            Err(reason) => {
                if let HaltReason::UnknownOpcode { .. } = reason {
                    // The offending byte is consumed
                    self.state.pc += 1;
                }
                self.halt(reason);
                return false;
            }
        };

        if self.config.trace {
            debug!(step = self.state.steps, pc = self.state.pc, %instr, "execute");
        }

        self.state.pc += len;
        execute(&instr, &mut self.state, &mut self.memory);
        self.state.steps += 1;
        true
    }

    /// Run the VM until halt
    pub fn run(&mut self) -> ExecutionResult {
        while self.step() {}

        ExecutionResult {
            steps: self.state.steps,
            halt_reason: self.state.halt_reason.unwrap_or(HaltReason::EndOfProgram),
            stack: self.state.stack.clone(),
            pc: self.state.pc,
        }
    }

    fn halt(&mut self, reason: HaltReason) {
        debug!(pc = self.state.pc, steps = self.state.steps, %reason, "halted");
        self.state.halt(reason);
    }

    /// Snapshot `[start, end)` of data memory plus the current registers
    pub fn snapshot(&self, start: usize, end: Option<usize>) -> MemorySnapshot {
        MemorySnapshot::capture(&self.state, &self.memory, start, end)
    }

    pub fn state(&self) -> &VMState {
        &self.state
    }

    pub fn memory(&self) -> &DataMemory {
        &self.memory
    }

    pub fn code(&self) -> &CodeMemory {
        &self.code
    }

    pub fn config(&self) -> &VMConfig {
        &self.config
    }

    pub fn stack(&self) -> &[Word] {
        &self.state.stack
    }

    pub fn pc(&self) -> usize {
        self.state.pc
    }

    pub fn steps(&self) -> u64 {
        self.state.steps
    }

    pub fn is_halted(&self) -> bool {
        self.state.halted
    }
}
