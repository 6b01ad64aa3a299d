//! Program and snapshot file handling
//!
//! The only blocking calls in the runtime. They run strictly before or
//! after execution, never inside the fetch-execute loop.

use std::path::Path;
use tracing::debug;
use uvm_spec::{Program, ProgramFormat};
use crate::error::Result;
use crate::snapshot::MemorySnapshot;

/// Read a program file in the given format
pub fn load_program(path: impl AsRef<Path>, format: ProgramFormat) -> Result<Program> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), len = bytes.len(), ?format, "loading program");
    Ok(Program::from_bytes(format, &bytes)?)
}

/// Read a program file, picking the format from its extension
pub fn load_program_auto(path: impl AsRef<Path>) -> Result<Program> {
    let format = ProgramFormat::from_path(path.as_ref());
    load_program(path, format)
}

/// Write a program in its own format
pub fn write_program(path: impl AsRef<Path>, program: &Program) -> Result<()> {
    std::fs::write(path, program.to_bytes()?)?;
    Ok(())
}

/// Write a snapshot as a pretty-printed document
pub fn write_snapshot(path: impl AsRef<Path>, snapshot: &MemorySnapshot) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), range = %snapshot.range, "writing snapshot");
    snapshot.write_to(path)
}
