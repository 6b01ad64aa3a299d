//! # Error Types for UVM program documents

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    // Document errors
    #[error("Invalid program document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("Metadata mismatch: instruction_count is {declared}, program has {actual}")]
    InstructionCountMismatch { declared: usize, actual: usize },

    // I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SpecError>;
