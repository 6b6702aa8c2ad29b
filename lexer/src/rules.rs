use std::sync::LazyLock;

use model::Tag;
use regex_lite::Regex;

/// A lexing rule. Rules without a tag consume input but emit no token.
pub struct Rule {
    pub pattern: Regex,
    pub tag: Option<Tag>,
}

const KEYWORDS: [&str; 17] = [
    "and", "or", "not", "if", "then", "else", "while", "do", "for", "to", "func", "call", "end",
    "print", "input", "true", "false",
];

// Two-character operators come before their one-character prefixes.
const OPERATORS: [&str; 14] = [
    r"==", r"\(", r"\)", r";", r"\+", r"-", r"\*", r"/", r"<=", r"<", r">=", r">", r"!=", r"=",
];

/// The rule table in priority order. The first rule that matches at the
/// current position wins, so overlapping rules must be ordered by hand.
pub static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let mut rules = vec![rule(r"[ \t\r\n]+", None), rule(r"#[^\n]*", None)];
    rules.extend(OPERATORS.iter().map(|op| rule(op, Some(Tag::Reserved))));
    rules.push(rule(r#""[^"\n]*""#, Some(Tag::String)));
    rules.extend(
        KEYWORDS
            .iter()
            .map(|kw| rule(&format!(r"{kw}\b"), Some(Tag::Reserved))),
    );
    rules.push(rule(r"[0-9]+", Some(Tag::Int)));
    rules.push(rule(r"[A-Za-z][A-Za-z0-9_]*", Some(Tag::Id)));
    rules
});

fn rule(pattern: &str, tag: Option<Tag>) -> Rule {
    Rule {
        pattern: Regex::new(&format!("^(?:{pattern})")).expect("lexer rule pattern should compile"),
        tag,
    }
}

/// Find the first rule matching at the start of `rest`, with the match length
pub fn match_rule(rest: &str) -> Option<(&'static Rule, usize)> {
    RULES
        .iter()
        .find_map(|rule| rule.pattern.find(rest).map(|m| (rule, m.end())))
}
