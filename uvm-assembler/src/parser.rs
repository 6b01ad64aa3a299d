//! Source record validation and text parsing

use logos::Logos;
use uvm_spec::{Instruction, Opcode, SourceProgram, SourceRecord, Word};
use crate::error::{AssemblerError, Result};
use crate::lexer::{integer_value, Token};

/// Validate one source record and turn it into an instruction.
///
/// `index` is the record's position in the source list and only feeds
/// error messages. Operand fields an operation does not use are ignored.
pub fn parse_record(index: usize, record: &SourceRecord) -> Result<Instruction> {
    let opcode = Opcode::from_mnemonic(&record.op)
        .ok_or_else(|| AssemblerError::UnsupportedOpcode(record.op.clone()))?;

    let instr = match opcode {
        Opcode::ReadMem => Instruction::ReadMem,
        Opcode::BinaryOp => Instruction::BinaryOp {
            address: required(index, opcode, "address", record.address)?,
        },
        Opcode::WriteMem => Instruction::WriteMem {
            address: required(index, opcode, "address", record.address)?,
        },
        Opcode::LoadConst => Instruction::LoadConst {
            value: required(index, opcode, "value", record.value)?,
        },
    };

    Ok(instr)
}

/// Validate every record of a source list, stopping at the first failure
pub fn parse_program(source: &SourceProgram) -> Result<Vec<Instruction>> {
    source
        .instructions
        .iter()
        .enumerate()
        .map(|(index, record)| parse_record(index, record))
        .collect()
}

fn required(index: usize, opcode: Opcode, field: &'static str, operand: Option<Word>) -> Result<Word> {
    operand.ok_or(AssemblerError::MissingOperand {
        index,
        op: opcode.mnemonic(),
        field,
    })
}

// ============================================================================
// Text Syntax
// ============================================================================

/// Parse line-oriented assembly text into source records.
///
/// One instruction per line, mnemonic first, at most one integer operand:
///
/// ```text
/// LOAD_CONST 128   # push
/// WRITE_MEM 0x40
/// READ_MEM
/// ```
pub fn parse_source(text: &str) -> Result<SourceProgram> {
    let mut records = Vec::new();
    let mut pending: Vec<(Token, usize)> = Vec::new();
    let mut line = 1;
    let mut line_start = 0;

    let mut lex = Token::lexer(text);
    while let Some(token) = lex.next() {
        let span = lex.span();
        let column = span.start - line_start + 1;

        let token = token.map_err(|_| AssemblerError::SyntaxError {
            line,
            column,
            message: format!("Unexpected input '{}'", lex.slice()),
        })?;

        if token == Token::Newline {
            if let Some(record) = parse_line(&pending, line)? {
                records.push(record);
            }
            pending.clear();
            line += 1;
            line_start = span.end;
            continue;
        }

        pending.push((token, column));
    }

    if let Some(record) = parse_line(&pending, line)? {
        records.push(record);
    }

    Ok(SourceProgram::new(records))
}

fn parse_line(tokens: &[(Token, usize)], line: usize) -> Result<Option<SourceRecord>> {
    let Some(((first, column), operands)) = tokens.split_first() else {
        return Ok(None);
    };

    let Token::Identifier(name) = first else {
        return Err(AssemblerError::SyntaxError {
            line,
            column: *column,
            message: "Expected instruction mnemonic".to_string(),
        });
    };

    let opcode =
        Opcode::from_mnemonic(name).ok_or_else(|| AssemblerError::UnsupportedOpcode(name.clone()))?;

    let operand = match operands {
        [] => None,
        [(token, column)] => Some(parse_integer(token, line, *column)?),
        [_, (_, column), ..] => {
            return Err(AssemblerError::SyntaxError {
                line,
                column: *column,
                message: format!("{} takes at most one operand", opcode),
            });
        }
    };

    let record = SourceRecord::new(opcode.mnemonic());
    let record = match (opcode, operand) {
        (Opcode::ReadMem, Some(_)) => {
            return Err(AssemblerError::SyntaxError {
                line,
                column: operands[0].1,
                message: "READ_MEM takes no operand".to_string(),
            });
        }
        (_, None) => record,
        (Opcode::LoadConst, Some(value)) => record.with_value(value),
        (_, Some(address)) => record.with_address(address),
    };

    Ok(Some(record))
}

fn parse_integer(token: &Token, line: usize, column: usize) -> Result<Word> {
    match token {
        Token::Integer(literal) => {
            integer_value(literal).ok_or_else(|| AssemblerError::InvalidImmediate(literal.clone()))
        }
        other => Err(AssemblerError::SyntaxError {
            line,
            column,
            message: format!("Expected integer operand, found {:?}", other),
        }),
    }
}
