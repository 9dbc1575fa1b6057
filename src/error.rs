//! Error types for the CLR(1) parser.

use crate::token::TokenKind;
use thiserror::Error;

/// Errors surfaced while driving the parse table against a token stream.
///
/// The parser halts at the first unrecognized (state, symbol) pair; no
/// recovery or resynchronization is attempted and partial trees are dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected token `{lexeme}` ({kind:?}) at {line}:{column} in state {state}")]
    UnexpectedToken {
        kind: TokenKind,
        lexeme: String,
        line: usize,
        column: usize,
        state: usize,
    },

    #[error("unexpected end of input in state {state}")]
    UnexpectedEof { state: usize },
}

/// Type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, ParseError>;
