//! Assembler errors

use thiserror::Error;
use uvm_spec::SpecError;

#[derive(Debug, Error)]
pub enum AssemblerError {
    #[error("Syntax error at line {line}, column {column}: {message}")]
    SyntaxError {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Unsupported opcode: {0}")]
    UnsupportedOpcode(String),

    #[error("Missing operand: instruction {index} ({op}) requires '{field}'")]
    MissingOperand {
        index: usize,
        op: &'static str,
        field: &'static str,
    },

    #[error("Invalid immediate value: {0}")]
    InvalidImmediate(String),

    #[error("Spec error: {0}")]
    SpecError(#[from] SpecError),
}

pub type Result<T> = std::result::Result<T, AssemblerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_opcode_display() {
        let err = AssemblerError::UnsupportedOpcode("HALT".to_string());
        assert_eq!(err.to_string(), "Unsupported opcode: HALT");
    }

    #[test]
    fn test_missing_operand_display() {
        let err = AssemblerError::MissingOperand {
            index: 2,
            op: "LOAD_CONST",
            field: "value",
        };
        assert_eq!(
            err.to_string(),
            "Missing operand: instruction 2 (LOAD_CONST) requires 'value'"
        );
    }

    #[test]
    fn test_syntax_error_display() {
        let err = AssemblerError::SyntaxError {
            line: 3,
            column: 12,
            message: "Unexpected token".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Syntax error at line 3, column 12: Unexpected token"
        );
    }

    #[test]
    fn test_spec_error_from() {
        let spec_err = SpecError::InstructionCountMismatch { declared: 1, actual: 0 };
        let err: AssemblerError = spec_err.into();
        assert!(err.to_string().contains("Metadata mismatch"));
    }
}
