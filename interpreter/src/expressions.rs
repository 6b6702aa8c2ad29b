use std::cmp::Ordering;
use std::io::{BufRead, Write};

use model::{BinaryOp, BoolExpr, Expr, LogicOp, RelOp};

use crate::{Environment, Interpreter, RuntimeError, Value};

impl<W: Write, R: BufRead> Interpreter<W, R> {
    /// Evaluate an arithmetic or string expression
    pub fn evaluate(&self, expr: &Expr, env: &Environment) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Int(i) => Ok(Value::Integer(*i)),
            Expr::Str(text) => Ok(Value::String(text.trim_matches('"').to_string())),
            Expr::Var(name) => env
                .get(name)
                .ok_or_else(|| RuntimeError::UnboundVariable { name: name.clone() }),
            Expr::Binary { op, left, right } => {
                let left = self.evaluate(left, env)?;
                let right = self.evaluate(right, env)?;
                apply_binary(*op, left, right)
            }
        }
    }

    /// Evaluate a boolean expression to a `Value::Boolean`
    pub fn evaluate_bool(&self, expr: &BoolExpr, env: &Environment) -> Result<Value, RuntimeError> {
        let result = match expr {
            BoolExpr::Literal(b) => *b,
            BoolExpr::Relop { op, left, right } => {
                let left = self.evaluate(left, env)?;
                let right = self.evaluate(right, env)?;
                compare(*op, &left, &right)?
            }
            // Both sides are always evaluated
            BoolExpr::Logic { op, left, right } => {
                let left = self.evaluate_bool(left, env)?.is_truthy();
                let right = self.evaluate_bool(right, env)?.is_truthy();
                match op {
                    LogicOp::And => left && right,
                    LogicOp::Or => left || right,
                }
            }
            BoolExpr::Not(inner) => !self.evaluate_bool(inner, env)?.is_truthy(),
        };
        Ok(Value::Boolean(result))
    }
}

fn apply_binary(op: BinaryOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => integer_op(op, l, r).map(Value::Integer),
        (Value::String(l), Value::String(r)) if op == BinaryOp::Add => Ok(Value::String(l + &r)),
        (l, r) => Err(RuntimeError::TypeMismatch {
            operator: op.symbol(),
            left: l.kind(),
            right: r.kind(),
        }),
    }
}

/// Checked 64-bit arithmetic; division truncates toward zero
fn integer_op(op: BinaryOp, l: i64, r: i64) -> Result<i64, RuntimeError> {
    let result = match op {
        BinaryOp::Add => l.checked_add(r),
        BinaryOp::Sub => l.checked_sub(r),
        BinaryOp::Mul => l.checked_mul(r),
        BinaryOp::Div if r == 0 => return Err(RuntimeError::DivisionByZero),
        BinaryOp::Div => l.checked_div(r),
    };
    result.ok_or(RuntimeError::Overflow { operator: op.symbol() })
}

fn compare(op: RelOp, left: &Value, right: &Value) -> Result<bool, RuntimeError> {
    let result = match op {
        RelOp::EqualEqual => left == right,
        RelOp::NotEqual => left != right,
        RelOp::Less => ordering(op, left, right)?.is_lt(),
        RelOp::LessEqual => ordering(op, left, right)?.is_le(),
        RelOp::Greater => ordering(op, left, right)?.is_gt(),
        RelOp::GreaterEqual => ordering(op, left, right)?.is_ge(),
    };
    Ok(result)
}

/// Integers order numerically, strings lexicographically; nothing else orders
fn ordering(op: RelOp, left: &Value, right: &Value) -> Result<Ordering, RuntimeError> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => Ok(l.cmp(r)),
        (Value::String(l), Value::String(r)) => Ok(l.cmp(r)),
        _ => Err(RuntimeError::TypeMismatch {
            operator: op.symbol(),
            left: left.kind(),
            right: right.kind(),
        }),
    }
}
