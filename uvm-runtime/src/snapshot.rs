//! Memory snapshot
//!
//! A point-in-time read view of a data memory range plus the machine
//! registers, in the document shape external tools consume:
//!
//! ```text
//! {
//!   "memory_dump": {"90": 0, "91": 0, ...},
//!   "range": "90-209",
//!   "total_memory_size": 1024,
//!   "stack": [128],
//!   "instructions_executed": 4,
//!   "program_counter": 14
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use serde::{Deserialize, Serialize};
use uvm_spec::{Word, DEFAULT_DUMP_SPAN};
use crate::error::Result;
use crate::memory::DataMemory;
use crate::state::VMState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    /// Address to cell value; keys serialize as decimal strings in address order
    pub memory_dump: BTreeMap<usize, u8>,

    /// `"<start>-<end-1>"`
    pub range: String,

    pub total_memory_size: usize,
    pub stack: Vec<Word>,
    pub instructions_executed: u64,
    pub program_counter: usize,
}

impl MemorySnapshot {
    /// Capture `[start, end)`.
    ///
    /// Without `end` the range spans [`DEFAULT_DUMP_SPAN`] cells. The end is
    /// always clamped to the memory size; a start past the end gives an
    /// empty dump.
    pub fn capture(state: &VMState, memory: &DataMemory, start: usize, end: Option<usize>) -> Self {
        let size = memory.size();
        let end = end
            .unwrap_or_else(|| start.saturating_add(DEFAULT_DUMP_SPAN))
            .min(size);

        let memory_dump = (start..end)
            .filter_map(|addr| memory.get(addr).map(|value| (addr, value)))
            .collect();

        // Signed so that an empty range at 0 reads "0--1"
        let range = format!("{}-{}", start, end as i128 - 1);

        MemorySnapshot {
            memory_dump,
            range,
            total_memory_size: size,
            stack: state.stack.clone(),
            instructions_executed: state.steps,
            program_counter: state.pc,
        }
    }

    /// Pretty-printed document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Write the pretty-printed document to `path`
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.memory_dump.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory_dump.is_empty()
    }
}
