// Parser module: Converts a list of tokens into an abstract syntax tree (AST)
//
// Module organization:
// - state.rs: Parse state, results and the furthest-failure error
// - combinators.rs: Generic combinators (sequence, choice, map, repetition, ...)
// - expressions.rs: Expression grammar with precedence climbing
// - statements.rs: Statement grammar (assign, if, while, for, func, ...)

pub mod combinators;
mod expressions;
mod state;
mod statements;
mod utils;

pub use combinators::{BoxedParser, Parser};
pub use expressions::precedence;
pub use state::{NoMatch, ParseError, ParseResult, ParseState, Parsed};
pub use utils::Operator;

use combinators::phrase;
use model::{Stmt, Token};
use statements::stmt_list;

/// The top-level grammar: a statement list that must consume every token
pub fn program() -> BoxedParser<Stmt> {
    phrase(stmt_list())
}

/// Parse a list of tokens into a single statement tree
///
/// # Returns
/// * `Ok(Stmt)` - The program, `;`-separated statements folded into Compound nodes
/// * `Err(ParseError)` - Where parsing got furthest and what it expected there
pub fn parse_tokens(tokens: &[Token]) -> Result<Stmt, ParseError> {
    let state = ParseState::new(tokens.to_vec());
    match program().parse(&state, 0) {
        Ok(parsed) => Ok(parsed.value),
        Err(NoMatch) => Err(state.error()),
    }
}
