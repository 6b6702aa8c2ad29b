mod error;
pub mod literals;
mod rules;
mod scanner;

pub use error::LexError;

use model::Token;
use scanner::Scanner;

/// Main lexer entry point: scan `input` with the ordered rule table
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    let mut scanner = Scanner::new(input);
    scanner.tokenize()
}
