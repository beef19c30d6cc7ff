//! JSON parser error type.

use thiserror::Error;

/// What went wrong while parsing JSON text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unexpected character `{0}`")]
    UnexpectedToken(char),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("invalid number")]
    InvalidNumber,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("invalid unicode escape")]
    InvalidUnicodeEscape,
    #[error("control character in string")]
    ControlCharacter,
    #[error("duplicate key `{0}`")]
    DuplicateKey(String),
    #[error("nesting depth exceeds {0}")]
    DepthLimitExceeded(usize),
    #[error("trailing characters")]
    TrailingCharacters,
}

/// A parse failure together with the byte offset it was detected at.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid JSON at byte {offset}: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}
