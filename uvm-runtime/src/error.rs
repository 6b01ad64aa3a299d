//! Runtime error types for UVM
//!
//! Nothing that happens inside the fetch-execute loop is an error: decode
//! failures become a [`HaltReason`](crate::HaltReason) and memory or stack
//! anomalies are absorbed. These variants only cover the file boundaries.

use thiserror::Error;
use uvm_spec::SpecError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Spec error: {0}")]
    SpecError(#[from] SpecError),

    #[error("Snapshot document error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
