// Tree-walking evaluator.
//
// - environment.rs: The shared name -> value mapping of a run
// - value.rs: Runtime values and callables
// - statements.rs: Statement execution
// - expressions.rs: Arithmetic, string and boolean evaluation

mod environment;
mod error;
mod expressions;
mod statements;
mod value;

pub use environment::Environment;
pub use error::RuntimeError;
pub use value::{Function, Value};

use std::io::{BufRead, Write};

use model::Stmt;

/// Evaluates programs, printing to `output` and reading `input` line by line
pub struct Interpreter<W: Write, R: BufRead> {
    output: W,
    input: R,
}

impl<W: Write, R: BufRead> Interpreter<W, R> {
    pub fn new(output: W, input: R) -> Self {
        Self { output, input }
    }

    /// Execute `program` against a fresh environment and hand that environment back
    pub fn run(&mut self, program: &Stmt) -> Result<Environment, RuntimeError> {
        let env = Environment::new();
        self.execute(program, &env)?;
        self.output.flush()?;
        Ok(env)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
