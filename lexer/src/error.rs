use std::fmt;

/// Errors raised while scanning source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// No rule matches at `position`.
    UnexpectedCharacter {
        character: char,
        /// Byte offset from the start of input, 0-indexed.
        position: usize,
        line: usize,
        column: usize,
    },
    /// An integer literal does not fit in 64 bits.
    IntegerOutOfRange {
        text: String,
        position: usize,
        line: usize,
        column: usize,
    },
}

impl LexError {
    pub fn position(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { position, .. } | Self::IntegerOutOfRange { position, .. } => {
                *position
            }
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter { character, position, line, column } => write!(
                f,
                "Illegal character '{character}' at position {position} (line {line}, column {column})"
            ),
            Self::IntegerOutOfRange { text, position, line, column } => write!(
                f,
                "Integer literal {text} at position {position} (line {line}, column {column}) is out of range"
            ),
        }
    }
}

impl std::error::Error for LexError {}
