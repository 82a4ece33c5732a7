//! Errors produced by the answer-expression parser.
//!
//! These never reach a caller of the grading API; the equivalence checker
//! collapses every parse failure to a "not equivalent" verdict. They exist
//! so the collapse point is explicit and testable.

use crate::scanner::types::Token;

use core::fmt;
use std::error::Error;

/// A failure to parse an answer expression.
#[derive(PartialEq, Clone, Debug)]
pub enum ParseError {
    /// A token that cannot appear where it did.
    UnexpectedToken(Token),
    /// The input ended where an expression or closing delimiter was
    /// expected.
    UnexpectedEof,
    /// The input contained a character with no meaning in an expression.
    InvalidToken(char),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseError::*;
        match self {
            UnexpectedToken(tok) => write!(f, r#"Unexpected token "{}""#, tok),
            UnexpectedEof => write!(f, "Unexpected end of expression"),
            InvalidToken(c) => write!(f, r#"Invalid character "{}""#, c),
        }
    }
}

impl Error for ParseError {}
