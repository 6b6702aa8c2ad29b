// Pipeline entry points: source text -> tokens -> AST -> evaluated environment.

use std::fmt;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

pub use interpreter::{Environment, Function, RuntimeError, Value};
pub use lexer::LexError;
pub use parser::ParseError;

use interpreter::Interpreter;

/// Everything that can end a run early, by stage
#[derive(Debug)]
pub enum RunError {
    Io(io::Error),
    Lex(LexError),
    Parse(ParseError),
    Runtime(RuntimeError),
}

impl RunError {
    /// Process exit status for this kind of failure. Output and input
    /// failures during evaluation count as I/O errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Io(_) | RunError::Runtime(RuntimeError::Io { .. }) => 1,
            RunError::Lex(_) => 2,
            RunError::Parse(_) => 3,
            RunError::Runtime(_) => 4,
        }
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Io(err) => write!(f, "{err}"),
            RunError::Lex(err) => write!(f, "{err}"),
            RunError::Parse(err) => write!(f, "{err}"),
            RunError::Runtime(err) => write!(f, "Runtime error: {err}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<io::Error> for RunError {
    fn from(err: io::Error) -> Self {
        RunError::Io(err)
    }
}

impl From<LexError> for RunError {
    fn from(err: LexError) -> Self {
        RunError::Lex(err)
    }
}

impl From<ParseError> for RunError {
    fn from(err: ParseError) -> Self {
        RunError::Parse(err)
    }
}

impl From<RuntimeError> for RunError {
    fn from(err: RuntimeError) -> Self {
        RunError::Runtime(err)
    }
}

/// Run the program stored at `path` against stdin/stdout and return its final environment
pub fn run(path: impl AsRef<Path>) -> Result<Environment, RunError> {
    let source = fs::read_to_string(path)?;
    run_source(&source, io::stdout().lock(), io::stdin().lock())
}

/// Lex, parse and evaluate `source`. Nothing is evaluated unless the whole
/// source lexes and parses.
pub fn run_source<W: Write, R: BufRead>(source: &str, output: W, input: R) -> Result<Environment, RunError> {
    let tokens = lexer::lex(source)?;
    let program = parser::parse_tokens(&tokens)?;
    let mut interpreter = Interpreter::new(output, input);
    Ok(interpreter.run(&program)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_str(source: &str) -> (Result<Environment, RunError>, String) {
        let mut output = Vec::new();
        let result = run_source(source, &mut output, io::empty());
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn while_program() {
        let (env, output) = run_str("x = 1; while x < 5 do print x; x = x + 1 end");
        assert_eq!(output, "1\n2\n3\n4\n");
        assert_eq!(env.unwrap().get("x"), Some(Value::Integer(5)));
    }

    #[test]
    fn lex_failure_kind() {
        let (result, output) = run_str("print 1; x = @");
        let err = result.unwrap_err();
        assert!(matches!(err, RunError::Lex(LexError::UnexpectedCharacter { character: '@', .. })));
        assert_eq!(err.exit_code(), 2);
        assert!(output.is_empty());
    }

    #[test]
    fn parse_failure_kind() {
        let (result, output) = run_str("print 1; if true then end");
        assert!(matches!(result, Err(RunError::Parse(_))));
        // nothing is evaluated when parsing fails
        assert!(output.is_empty());
    }

    #[test]
    fn runtime_failure_kind() {
        let (result, _) = run_str("print y");
        let err = result.unwrap_err();
        assert!(matches!(err, RunError::Runtime(RuntimeError::UnboundVariable { .. })));
        assert_eq!(err.to_string(), "Runtime error: Variable not defined: y");
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_print_exits_as_io_error() {
        let err = run_source("print 1", ClosedPipe, io::empty()).unwrap_err();
        assert!(matches!(err, RunError::Runtime(RuntimeError::Io { .. })));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = run("definitely/not/here.cam").unwrap_err();
        assert!(matches!(err, RunError::Io(_)));
        assert_eq!(err.exit_code(), 1);
    }
}
