use lexer::literals::parse_int_literal;
use model::{BinaryOp, LogicOp, RelOp, Tag};

use crate::combinators::{BoxedParser, reserved, tag};
use crate::state::{ParseState, Parsed};

/// An operator the grammar can match by its reserved symbol
pub trait Operator: Copy + 'static {
    fn symbol(self) -> &'static str;
}

impl Operator for BinaryOp {
    fn symbol(self) -> &'static str {
        BinaryOp::symbol(self)
    }
}

impl Operator for RelOp {
    fn symbol(self) -> &'static str {
        RelOp::symbol(self)
    }
}

impl Operator for LogicOp {
    fn symbol(self) -> &'static str {
        LogicOp::symbol(self)
    }
}

pub(crate) fn keyword(text: &str) -> BoxedParser<String> {
    reserved(text, Tag::Reserved)
}

pub(crate) fn identifier() -> BoxedParser<String> {
    tag(Tag::Id)
}

/// An INT token, converted to its value
pub(crate) fn integer() -> BoxedParser<i64> {
    BoxedParser::new(|state: &ParseState, pos: usize| match state.token(pos) {
        Some(token) if token.tag == Tag::Int => match parse_int_literal(&token.text) {
            Ok(value) => Ok(Parsed::new(value, pos + 1)),
            Err(_) => Err(state.fail(pos, "integer")),
        },
        _ => Err(state.fail(pos, "integer")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::Parser;
    use crate::state::NoMatch;
    use model::Token;

    #[test]
    fn keyword_ignores_identifiers_with_same_text() {
        let state = ParseState::new(vec![Token::id("end")]);
        assert_eq!(keyword("end").parse(&state, 0), Err(NoMatch));
    }

    #[test]
    fn integer_converts_text() {
        let state = ParseState::new(vec![Token::int("042")]);
        assert_eq!(integer().parse(&state, 0), Ok(Parsed::new(42, 1)));
    }

    #[test]
    fn integer_out_of_range_does_not_match() {
        let state = ParseState::new(vec![Token::int("99999999999999999999")]);
        assert_eq!(integer().parse(&state, 0), Err(NoMatch));
    }
}
