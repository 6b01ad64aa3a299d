//! # Lexer for the UVM text syntax

use logos::Logos;
use uvm_spec::Word;

/// Tokens for UVM assembly text
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")] // Skip whitespace (not newlines)
#[logos(skip r"[#;][^\n]*")] // Skip comments
pub enum Token {
    /// Instruction mnemonic
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// Integer literal: decimal, `0x` hex or `0b` binary, optional sign and
    /// `_` separators. The value is checked by [`integer_value`].
    #[regex(r"-?[0-9][0-9_]*", |lex| lex.slice().to_string())]
    #[regex(r"-?0[xX][0-9a-fA-F][0-9a-fA-F_]*", |lex| lex.slice().to_string())]
    #[regex(r"-?0[bB][01][01_]*", |lex| lex.slice().to_string())]
    Integer(String),

    /// Newline
    #[regex(r"\n")]
    Newline,
}

/// Value of an integer literal, `None` if it does not fit a machine word
pub fn integer_value(literal: &str) -> Option<Word> {
    let (negative, unsigned) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };
    let digits = unsigned.replace('_', "");

    let (radix, body) = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        (16, hex)
    } else if let Some(bin) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
        (2, bin)
    } else {
        (10, digits.as_str())
    };

    let magnitude = i128::from_str_radix(body, radix).ok()?;
    Word::try_from(if negative { -magnitude } else { magnitude }).ok()
}
