use model::{Tag, Token};

use crate::error::LexError;
use crate::literals::parse_int_literal;
use crate::rules::match_rule;

pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while self.pos < self.input.len() {
            match self.lex_next_token()? {
                Some(token) => tokens.push(token),
                None => continue, // Whitespace or comment consumed
            }
        }

        Ok(tokens)
    }

    fn lex_next_token(&mut self) -> Result<Option<Token>, LexError> {
        let rest = &self.input[self.pos..];
        let Some((rule, len)) = match_rule(rest) else {
            let (line, column) = self.line_and_column();
            return Err(LexError::UnexpectedCharacter {
                character: rest.chars().next().unwrap_or_default(),
                position: self.pos,
                line,
                column,
            });
        };

        let start = self.pos;
        let text = &rest[..len];
        let token = match rule.tag {
            Some(Tag::Int) if parse_int_literal(text).is_err() => {
                let (line, column) = self.line_and_column();
                return Err(LexError::IntegerOutOfRange {
                    text: text.to_string(),
                    position: start,
                    line,
                    column,
                });
            }
            Some(tag) => Some(Token::new(text, tag)),
            None => None,
        };

        self.pos += len;
        Ok(token)
    }

    /// 1-based line and column of the current position
    fn line_and_column(&self) -> (usize, usize) {
        let before = &self.input[..self.pos];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}
