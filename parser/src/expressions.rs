// Expression grammar: arithmetic (aexp), string and boolean (bexp) expressions.
// Binary operators are handled by precedence climbing, tightest level first.

use model::{BinaryOp, BoolExpr, Expr, LogicOp, RelOp, Tag};

use crate::combinators::{BoxedParser, Combine, any_of, exp as fold_separated, lazy, string};
use crate::utils::{Operator, identifier, integer, keyword};

const AEXP_LEVELS: [&[BinaryOp]; 2] = [&[BinaryOp::Mul, BinaryOp::Div], &[BinaryOp::Add, BinaryOp::Sub]];

const BEXP_LEVELS: [&[LogicOp]; 2] = [&[LogicOp::And], &[LogicOp::Or]];

/// Build a left-associative binary-expression parser. Each level parses
/// `term (op term)*` over the previous level, so earlier levels bind tighter.
pub fn precedence<T: 'static, O: Operator>(
    term: BoxedParser<T>,
    levels: &[&[O]],
    combine: fn(O, T, T) -> T,
) -> BoxedParser<T> {
    levels.iter().fold(term, |parser, level| {
        let ops = level.iter().map(|&op| operator(op, combine)).collect();
        fold_separated(parser, any_of(ops))
    })
}

fn operator<T: 'static, O: Operator>(op: O, combine: fn(O, T, T) -> T) -> BoxedParser<Combine<T>> {
    keyword(op.symbol()).map(move |_| Box::new(move |left, right| combine(op, left, right)) as Combine<T>)
}

/// Any one of the given operators, yielding which one matched
fn any_operator<O: Operator>(ops: &[O]) -> BoxedParser<O> {
    any_of(ops.iter().map(|&op| keyword(op.symbol()).map(move |_| op)).collect())
}

/// exp := string_literal | aexp
pub fn exp() -> BoxedParser<Expr> {
    string(Tag::String).map(Expr::Str).or(aexp())
}

// === Arithmetic expressions ===

pub fn aexp() -> BoxedParser<Expr> {
    precedence(aexp_term(), &AEXP_LEVELS, Expr::binary)
}

fn aexp_term() -> BoxedParser<Expr> {
    aexp_value().or(aexp_group())
}

fn aexp_value() -> BoxedParser<Expr> {
    integer().map(Expr::Int).or(identifier().map(Expr::Var))
}

fn aexp_group() -> BoxedParser<Expr> {
    keyword("(").skip_left(lazy(aexp)).skip(keyword(")"))
}

// === Boolean expressions ===

pub fn bexp() -> BoxedParser<BoolExpr> {
    precedence(bexp_term(), &BEXP_LEVELS, BoolExpr::logic)
}

fn bexp_term() -> BoxedParser<BoolExpr> {
    any_of(vec![bexp_not(), bexp_literal(), bexp_relop(), bexp_group()])
}

fn bexp_not() -> BoxedParser<BoolExpr> {
    keyword("not")
        .skip_left(lazy(bexp_term))
        .map(|inner| BoolExpr::Not(Box::new(inner)))
}

fn bexp_literal() -> BoxedParser<BoolExpr> {
    keyword("true")
        .map(|_| BoolExpr::Literal(true))
        .or(keyword("false").map(|_| BoolExpr::Literal(false)))
}

fn bexp_relop() -> BoxedParser<BoolExpr> {
    exp()
        .then(any_operator(&RelOp::ALL))
        .then(exp())
        .map(|((left, op), right)| BoolExpr::Relop { op, left, right })
}

fn bexp_group() -> BoxedParser<BoolExpr> {
    keyword("(").skip_left(lazy(bexp)).skip(keyword(")"))
}
