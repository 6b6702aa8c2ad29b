use std::cell::RefCell;
use std::fmt;

use model::Token;

/// A successful parse: the value and the position of the next unread token
#[derive(Debug, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub next: usize,
}

impl<T> Parsed<T> {
    pub fn new(value: T, next: usize) -> Self {
        Self { value, next }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed::new(f(self.value), self.next)
    }
}

/// A parser did not match at the requested position.
/// Details of the failure live in the `ParseState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoMatch;

pub type ParseResult<T> = Result<Parsed<T>, NoMatch>;

#[derive(Debug, Default)]
struct Furthest {
    position: usize,
    expected: Vec<String>,
}

/// The token sequence being parsed plus the furthest failure seen so far.
/// Parsers never change the tokens; positions are passed explicitly.
pub struct ParseState {
    tokens: Vec<Token>,
    furthest: RefCell<Furthest>,
}

impl ParseState {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            furthest: RefCell::default(),
        }
    }

    pub fn token(&self, pos: usize) -> Option<&Token> {
        self.tokens.get(pos)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Record that `expected` was wanted at `pos` and report no match
    pub fn fail(&self, pos: usize, expected: &str) -> NoMatch {
        let mut furthest = self.furthest.borrow_mut();
        if pos > furthest.position {
            furthest.position = pos;
            furthest.expected.clear();
        }
        if pos == furthest.position && !furthest.expected.iter().any(|e| e == expected) {
            furthest.expected.push(expected.to_string());
        }
        NoMatch
    }

    /// Build an error describing the furthest failure
    pub fn error(&self) -> ParseError {
        let furthest = self.furthest.borrow();
        ParseError {
            position: furthest.position,
            found: self.token(furthest.position).cloned(),
            expected: furthest.expected.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Index of the offending token
    pub position: usize,
    /// `None` at end of input
    pub found: Option<Token>,
    pub expected: Vec<String>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error at token {}: ", self.position)?;
        match self.expected.as_slice() {
            [] => {}
            [only] => write!(f, "expected {only}, ")?,
            many => write!(f, "expected one of {}, ", many.join(", "))?,
        }
        match &self.found {
            Some(token) => write!(f, "found {token}"),
            None => write!(f, "found end of input"),
        }
    }
}

impl std::error::Error for ParseError {}
