//! Generic parsing combinators over a token sequence and a position.
//!
//! Every combinator is an ordinary function returning a `BoxedParser`; a
//! grammar is assembled by composing them. Failure never moves the
//! position: alternation and optionality retry from where they started.

use std::cell::OnceCell;
use std::rc::Rc;

use model::Tag;

use crate::state::{NoMatch, ParseResult, ParseState, Parsed};

/// The single capability every parser has
pub trait Parser<T> {
    fn parse(&self, state: &ParseState, pos: usize) -> ParseResult<T>;
}

impl<T, F: Fn(&ParseState, usize) -> ParseResult<T>> Parser<T> for F {
    fn parse(&self, state: &ParseState, pos: usize) -> ParseResult<T> {
        self(state, pos)
    }
}

/// A separator's parsed value: how to join the items on either side of it
pub type Combine<T> = Box<dyn Fn(T, T) -> T>;

type ParserFn<T> = Rc<dyn Fn(&ParseState, usize) -> ParseResult<T>>;

// === Boxed Parser for type erasure ===

pub struct BoxedParser<T> {
    parser: ParserFn<T>,
}

impl<T> Clone for BoxedParser<T> {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Rc::clone(&self.parser),
        }
    }
}

impl<T: 'static> BoxedParser<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ParseState, usize) -> ParseResult<T> + 'static,
    {
        BoxedParser { parser: Rc::new(f) }
    }

    pub fn from_parser<P: Parser<T> + 'static>(parser: P) -> Self {
        BoxedParser::new(move |state: &ParseState, pos: usize| parser.parse(state, pos))
    }
}

impl<T> Parser<T> for BoxedParser<T> {
    fn parse(&self, state: &ParseState, pos: usize) -> ParseResult<T> {
        (self.parser)(state, pos)
    }
}

// === Method forms ===

impl<T: 'static> BoxedParser<T> {
    /// Sequence: parse self then other, return (T, U)
    pub fn then<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<(T, U)> {
        concat(self, other)
    }

    /// Keep left: parse self then other, discard other's result
    pub fn skip<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<T> {
        concat(self, other).map(|(a, _)| a)
    }

    /// Keep right: parse self then other, discard self's result
    pub fn skip_left<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<U> {
        concat(self, other).map(|(_, b)| b)
    }

    pub fn map<U: 'static, F: Fn(T) -> U + 'static>(self, f: F) -> BoxedParser<U> {
        map(self, f)
    }

    pub fn or(self, other: BoxedParser<T>) -> BoxedParser<T> {
        alt(self, other)
    }
}

// === Primitive Parsers ===

fn describe(tag: Tag) -> &'static str {
    match tag {
        Tag::Reserved => "reserved word",
        Tag::Int => "integer",
        Tag::String => "string literal",
        Tag::Id => "identifier",
    }
}

/// Matches a token with exactly this text and tag
pub fn reserved(text: impl Into<String>, tag: Tag) -> BoxedParser<String> {
    let text = text.into();
    let expected = format!("'{text}'");
    BoxedParser::new(move |state: &ParseState, pos: usize| match state.token(pos) {
        Some(token) if token.tag == tag && token.text == text => {
            Ok(Parsed::new(token.text.clone(), pos + 1))
        }
        _ => Err(state.fail(pos, &expected)),
    })
}

/// Matches any token of `tag` and yields its text
pub fn tag(tag: Tag) -> BoxedParser<String> {
    BoxedParser::new(move |state: &ParseState, pos: usize| match state.token(pos) {
        Some(token) if token.tag == tag => Ok(Parsed::new(token.text.clone(), pos + 1)),
        _ => Err(state.fail(pos, describe(tag))),
    })
}

/// Matches a quoted string token; the quotes are kept in the yielded text
pub fn string(string_tag: Tag) -> BoxedParser<String> {
    tag(string_tag)
}

// === Combinators ===

pub fn concat<A: 'static, B: 'static>(a: BoxedParser<A>, b: BoxedParser<B>) -> BoxedParser<(A, B)> {
    BoxedParser::new(move |state: &ParseState, pos: usize| {
        let left = a.parse(state, pos)?;
        let right = b.parse(state, left.next)?;
        Ok(Parsed::new((left.value, right.value), right.next))
    })
}

/// First alternative that matches wins; `b` starts from the original position
pub fn alt<T: 'static>(a: BoxedParser<T>, b: BoxedParser<T>) -> BoxedParser<T> {
    BoxedParser::new(move |state: &ParseState, pos: usize| {
        a.parse(state, pos).or_else(|NoMatch| b.parse(state, pos))
    })
}

/// Alternation over a list, tried in order
pub fn any_of<T: 'static>(parsers: Vec<BoxedParser<T>>) -> BoxedParser<T> {
    BoxedParser::new(move |state: &ParseState, pos: usize| {
        for parser in &parsers {
            if let Ok(parsed) = parser.parse(state, pos) {
                return Ok(parsed);
            }
        }
        Err(NoMatch)
    })
}

pub fn map<T: 'static, U: 'static, F>(parser: BoxedParser<T>, f: F) -> BoxedParser<U>
where
    F: Fn(T) -> U + 'static,
{
    BoxedParser::new(move |state: &ParseState, pos: usize| {
        parser.parse(state, pos).map(|parsed| parsed.map(&f))
    })
}

/// One or more `item`s separated by `separator`, folded left with the
/// function each separator yields. A trailing separator is left unread.
pub fn exp<T: 'static>(item: BoxedParser<T>, separator: BoxedParser<Combine<T>>) -> BoxedParser<T> {
    BoxedParser::new(move |state: &ParseState, pos: usize| {
        let mut acc = item.parse(state, pos)?;
        loop {
            let Ok(sep) = separator.parse(state, acc.next) else {
                return Ok(acc);
            };
            let Ok(right) = item.parse(state, sep.next) else {
                return Ok(acc);
            };
            acc = Parsed::new((sep.value)(acc.value, right.value), right.next);
        }
    })
}

/// Zero or one; never fails
pub fn opt<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Option<T>> {
    BoxedParser::new(move |state: &ParseState, pos: usize| {
        Ok(parser
            .parse(state, pos)
            .map_or(Parsed::new(None, pos), |parsed| parsed.map(Some)))
    })
}

/// Builds its parser on first use, so grammar rules can refer to themselves
struct Lazy<T> {
    thunk: fn() -> BoxedParser<T>,
    parser: OnceCell<BoxedParser<T>>,
}

impl<T> Parser<T> for Lazy<T> {
    fn parse(&self, state: &ParseState, pos: usize) -> ParseResult<T> {
        self.parser.get_or_init(self.thunk).parse(state, pos)
    }
}

pub fn lazy<T: 'static>(thunk: fn() -> BoxedParser<T>) -> BoxedParser<T> {
    BoxedParser::from_parser(Lazy {
        thunk,
        parser: OnceCell::new(),
    })
}

/// Succeeds only if `parser` consumes every remaining token
pub fn phrase<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<T> {
    BoxedParser::new(move |state: &ParseState, pos: usize| {
        let parsed = parser.parse(state, pos)?;
        if parsed.next == state.len() {
            Ok(parsed)
        } else {
            Err(state.fail(parsed.next, "end of input"))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::Token;

    fn state(tokens: Vec<Token>) -> ParseState {
        ParseState::new(tokens)
    }

    fn int() -> BoxedParser<i64> {
        tag(Tag::Int).map(|text| text.parse().unwrap())
    }

    fn plus() -> BoxedParser<Combine<i64>> {
        reserved("+", Tag::Reserved).map(|_| Box::new(|l: i64, r: i64| l + r) as Combine<i64>)
    }

    fn minus() -> BoxedParser<Combine<i64>> {
        reserved("-", Tag::Reserved).map(|_| Box::new(|l: i64, r: i64| l - r) as Combine<i64>)
    }

    // ─── Primitive tests ────────────────────────────────────────
    #[test]
    fn reserved_requires_text_and_tag() {
        let s = state(vec![Token::reserved("if"), Token::id("if")]);
        let p = reserved("if", Tag::Reserved);
        assert_eq!(p.parse(&s, 0), Ok(Parsed::new("if".to_string(), 1)));
        assert_eq!(p.parse(&s, 1), Err(NoMatch));
        assert_eq!(p.parse(&s, 2), Err(NoMatch));
    }

    #[test]
    fn tag_yields_text() {
        let s = state(vec![Token::id("foo")]);
        assert_eq!(tag(Tag::Id).parse(&s, 0), Ok(Parsed::new("foo".to_string(), 1)));
        assert_eq!(tag(Tag::Int).parse(&s, 0), Err(NoMatch));
    }

    #[test]
    fn string_keeps_quotes() {
        let s = state(vec![Token::string("\"hi\"")]);
        assert_eq!(string(Tag::String).parse(&s, 0).unwrap().value, "\"hi\"");
    }

    // ─── Combinator tests ───────────────────────────────────────
    #[test]
    fn concat_pairs_values() {
        let s = state(vec![Token::id("x"), Token::reserved("=")]);
        let p = tag(Tag::Id).then(reserved("=", Tag::Reserved));
        assert_eq!(p.parse(&s, 0), Ok(Parsed::new(("x".to_string(), "=".to_string()), 2)));
    }

    #[test]
    fn concat_fails_if_second_fails() {
        let s = state(vec![Token::id("x"), Token::id("y")]);
        let p = tag(Tag::Id).then(reserved("=", Tag::Reserved));
        assert_eq!(p.parse(&s, 0), Err(NoMatch));
    }

    #[test]
    fn alt_retries_from_original_position() {
        let s = state(vec![Token::id("x"), Token::int("1")]);
        let first = tag(Tag::Id).then(tag(Tag::Id)).map(|_| 1);
        let second = tag(Tag::Id).then(tag(Tag::Int)).map(|_| 2);
        assert_eq!(alt(first, second).parse(&s, 0), Ok(Parsed::new(2, 2)));
    }

    #[test]
    fn alt_prefers_first_match() {
        let s = state(vec![Token::id("x"), Token::id("y")]);
        let short = tag(Tag::Id).map(|_| "short");
        let long = tag(Tag::Id).then(tag(Tag::Id)).map(|_| "long");
        assert_eq!(short.or(long).parse(&s, 0), Ok(Parsed::new("short", 1)));
    }

    #[test]
    fn opt_never_fails() {
        let s = state(vec![Token::int("7")]);
        assert_eq!(opt(int()).parse(&s, 0), Ok(Parsed::new(Some(7), 1)));
        assert_eq!(opt(tag(Tag::Id)).parse(&s, 0), Ok(Parsed::new(None, 0)));
    }

    #[test]
    fn exp_folds_left() {
        // 10 - 3 - 2 must be (10 - 3) - 2
        let s = state(vec![
            Token::int("10"),
            Token::reserved("-"),
            Token::int("3"),
            Token::reserved("-"),
            Token::int("2"),
        ]);
        assert_eq!(exp(int(), minus()).parse(&s, 0), Ok(Parsed::new(5, 5)));
    }

    #[test]
    fn exp_leaves_dangling_separator() {
        let s = state(vec![Token::int("1"), Token::reserved("+"), Token::int("2"), Token::reserved("+")]);
        assert_eq!(exp(int(), plus()).parse(&s, 0), Ok(Parsed::new(3, 3)));
    }

    #[test]
    fn phrase_requires_all_input() {
        let s = state(vec![Token::int("1"), Token::int("2")]);
        assert_eq!(phrase(int()).parse(&s, 0), Err(NoMatch));
        assert_eq!(s.error().expected, vec!["end of input".to_string()]);
        assert_eq!(phrase(int()).parse(&s, 1), Ok(Parsed::new(2, 2)));
    }

    fn nested() -> BoxedParser<usize> {
        // nested := '(' nested ')' | INT
        reserved("(", Tag::Reserved)
            .skip_left(lazy(nested))
            .skip(reserved(")", Tag::Reserved))
            .map(|depth| depth + 1)
            .or(tag(Tag::Int).map(|_| 0))
    }

    #[test]
    fn lazy_allows_recursive_rules() {
        let s = state(vec![
            Token::reserved("("),
            Token::reserved("("),
            Token::int("1"),
            Token::reserved(")"),
            Token::reserved(")"),
        ]);
        assert_eq!(nested().parse(&s, 0), Ok(Parsed::new(2, 5)));
    }
}
