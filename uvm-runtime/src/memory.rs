//! Memory subsystem
//!
//! Data memory is a fixed block of byte cells addressed by machine words.
//! Accesses outside it never fail: loads read 0 and stores are dropped.
//! Code memory holds the loaded program and is never written after load.

use tracing::{trace, warn};
use uvm_disassembler::{decode, DisassemblerError};
use uvm_spec::{Instruction, Program, Word};
use crate::state::HaltReason;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataMemory {
    cells: Box<[u8]>,
}

impl DataMemory {
    /// Zero-filled memory of `size` cells
    pub fn new(size: usize) -> Self {
        DataMemory {
            cells: vec![0; size].into_boxed_slice(),
        }
    }

    /// Memory of `size` cells pre-loaded from `initial`; bytes past the end are dropped
    pub fn with_contents(size: usize, initial: &[u8]) -> Self {
        let mut memory = Self::new(size);
        let len = initial.len().min(size);
        memory.cells[..len].copy_from_slice(&initial[..len]);
        memory
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    fn index(&self, addr: Word) -> Option<usize> {
        usize::try_from(addr).ok().filter(|&i| i < self.cells.len())
    }

    /// Read the cell at `addr`, or 0 when out of range
    pub fn load(&self, addr: Word) -> Word {
        match self.index(addr) {
            Some(i) => Word::from(self.cells[i]),
            None => {
                trace!(addr, size = self.size(), "read out of range, yielding 0");
                0
            }
        }
    }

    /// Store the low byte of `value` at `addr`.
    ///
    /// Returns `false` when `addr` is out of range and nothing was written.
    pub fn store(&mut self, addr: Word, value: Word) -> bool {
        match self.index(addr) {
            Some(i) => {
                self.cells[i] = (value & 0xFF) as u8;
                true
            }
            None => {
                trace!(addr, size = self.size(), "write out of range dropped");
                false
            }
        }
    }

    /// Cell at a host index, `None` past the end
    pub fn get(&self, index: usize) -> Option<u8> {
        self.cells.get(index).copied()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

/// Loaded program, in whichever form it arrived
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeMemory {
    /// Bit-packed bytes; pc is a byte offset
    Binary(Vec<u8>),
    /// Unpacked records; pc is a record index
    Intermediate(Vec<Instruction>),
}

impl CodeMemory {
    /// Load a program. Binary code longer than `code_size` is cut to fit.
    pub fn load(program: Program, code_size: usize) -> Self {
        match program {
            Program::Binary(mut bytes) => {
                if bytes.len() > code_size {
                    warn!(
                        len = bytes.len(),
                        code_size,
                        "program larger than code memory, truncating"
                    );
                    bytes.truncate(code_size);
                }
                CodeMemory::Binary(bytes)
            }
            Program::Intermediate(doc) => CodeMemory::Intermediate(doc.program),
        }
    }

    /// Length in pc units
    pub fn len(&self) -> usize {
        match self {
            CodeMemory::Binary(bytes) => bytes.len(),
            CodeMemory::Intermediate(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch the instruction at `pc` and its length in pc units.
    ///
    /// Every failure is a halt condition, never an error.
    pub fn fetch(&self, pc: usize) -> Result<(Instruction, usize), HaltReason> {
        if pc >= self.len() {
            return Err(HaltReason::EndOfProgram);
        }
        match self {
            CodeMemory::Binary(bytes) => decode(bytes, pc).map_err(|e| match e {
                DisassemblerError::UnknownOpcode { offset, bits } => {
                    HaltReason::UnknownOpcode { pc: offset, bits }
                }
                DisassemblerError::TruncatedInstruction { offset, .. } => {
                    HaltReason::TruncatedInstruction { pc: offset }
                }
            }),
            CodeMemory::Intermediate(records) => Ok((records[pc], 1)),
        }
    }
}
