use std::io::{BufRead, Write};

use model::{Expr, Stmt};

use crate::value::Function;
use crate::{Environment, Interpreter, RuntimeError, Value};

impl<W: Write, R: BufRead> Interpreter<W, R> {
    pub fn execute(&mut self, stmt: &Stmt, env: &Environment) -> Result<(), RuntimeError> {
        match stmt {
            Stmt::Assign { name, value } => {
                let value = self.evaluate(value, env)?;
                env.set(name, value);
            }
            // Sequences nest one level per `;`, so walk them with an explicit stack
            Stmt::Compound { .. } => {
                let mut pending = vec![stmt];
                while let Some(next) = pending.pop() {
                    match next {
                        Stmt::Compound { first, second } => {
                            pending.push(second);
                            pending.push(first);
                        }
                        single => self.execute(single, env)?,
                    }
                }
            }
            Stmt::Print(expr) => {
                let value = self.evaluate(expr, env)?;
                writeln!(self.output, "{value}")?;
            }
            Stmt::Input(name) => {
                let value = self.read_input(name)?;
                env.set(name, value);
            }
            Stmt::If { cond, then_branch, else_branch } => {
                if self.evaluate_bool(cond, env)?.is_truthy() {
                    self.execute(then_branch, env)?;
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch, env)?;
                }
            }
            Stmt::While { cond, body } => {
                while self.evaluate_bool(cond, env)?.is_truthy() {
                    self.execute(body, env)?;
                }
            }
            Stmt::For { name, start, end, body } => {
                let start = self.loop_bound(start, env, "for loop start")?;
                let end = self.loop_bound(end, env, "for loop end")?;
                for i in start..end {
                    env.set(name, Value::Integer(i));
                    self.execute(body, env)?;
                }
            }
            Stmt::FunctionDecl { name, body } => {
                let function = Function::new(name, body.clone(), env);
                env.set(name, Value::Callable(function));
            }
            Stmt::FunctionCall(name) => match env.get(name) {
                Some(Value::Callable(function)) => self.call(&function)?,
                Some(other) => {
                    return Err(RuntimeError::NotCallable {
                        name: name.clone(),
                        found: other.kind(),
                    });
                }
                None => return Err(RuntimeError::UndefinedFunction { name: name.clone() }),
            },
        }
        Ok(())
    }

    /// Run a function body against the environment it was declared in
    pub fn call(&mut self, function: &Function) -> Result<(), RuntimeError> {
        let env = function
            .environment()
            .ok_or_else(|| RuntimeError::EnvironmentDropped { name: function.name().to_string() })?;
        self.execute(function.body(), &env)
    }

    fn loop_bound(&self, expr: &Expr, env: &Environment, context: &'static str) -> Result<i64, RuntimeError> {
        match self.evaluate(expr, env)? {
            Value::Integer(i) => Ok(i),
            other => Err(RuntimeError::ExpectedInteger { context, found: other.kind() }),
        }
    }

    /// One line of input: an integer if it parses as one, otherwise the raw line
    fn read_input(&mut self, name: &str) -> Result<Value, RuntimeError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(RuntimeError::EndOfInput { name: name.to_string() });
        }
        let line = line.strip_suffix('\n').unwrap_or(&line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Ok(match line.trim().parse::<i64>() {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::String(line.to_string()),
        })
    }
}
