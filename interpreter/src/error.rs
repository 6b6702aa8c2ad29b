use std::fmt;
use std::io;

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// A variable was read before anything was assigned to it.
    UnboundVariable { name: String },
    /// `call` named something that was never bound.
    UndefinedFunction { name: String },
    /// `call` named a binding that is not a function.
    NotCallable { name: String, found: &'static str },
    /// An operator was applied to operands it does not support.
    TypeMismatch {
        operator: &'static str,
        left: &'static str,
        right: &'static str,
    },
    /// A loop bound evaluated to something other than an integer.
    ExpectedInteger { context: &'static str, found: &'static str },
    DivisionByZero,
    /// Integer arithmetic overflowed 64 bits.
    Overflow { operator: &'static str },
    /// `input` found no more lines to read.
    EndOfInput { name: String },
    /// Reading input or writing output failed.
    Io { message: String },
    /// A function was called after its environment was dropped.
    EnvironmentDropped { name: String },
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundVariable { name } => write!(f, "Variable not defined: {name}"),
            Self::UndefinedFunction { name } => write!(f, "Function not defined: {name}"),
            Self::NotCallable { name, found } => {
                write!(f, "'{name}' is a {found}, not a function")
            }
            Self::TypeMismatch { operator, left, right } => {
                write!(f, "Unsupported operand types for '{operator}': {left} and {right}")
            }
            Self::ExpectedInteger { context, found } => {
                write!(f, "Expected an integer for {context}, found {found}")
            }
            Self::DivisionByZero => write!(f, "Division by zero"),
            Self::Overflow { operator } => write!(f, "Integer overflow in '{operator}'"),
            Self::EndOfInput { name } => write!(f, "No input left to read into '{name}'"),
            Self::Io { message } => write!(f, "I/O error: {message}"),
            Self::EnvironmentDropped { name } => {
                write!(f, "Function '{name}' outlived its environment")
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<io::Error> for RuntimeError {
    fn from(err: io::Error) -> Self {
        Self::Io { message: err.to_string() }
    }
}
