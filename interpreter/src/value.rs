use std::fmt;
use std::rc::Rc;

use model::Stmt;

use crate::environment::{Environment, WeakEnvironment};

/// Runtime value representation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    String(String),
    Boolean(bool),
    Callable(Function),
}

impl Value {
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Integer(i) => *i != 0,
            Value::String(s) => !s.is_empty(),
            Value::Boolean(b) => *b,
            Value::Callable(_) => true,
        }
    }

    /// Name of the value's kind, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Callable(_) => "function",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::String(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Callable(function) => write!(f, "<func {}>", function.name),
        }
    }
}

/// A zero-argument function: its body plus the environment it runs against
#[derive(Clone)]
pub struct Function {
    name: String,
    body: Rc<Stmt>,
    env: WeakEnvironment,
}

impl Function {
    pub(crate) fn new(name: impl Into<String>, body: Rc<Stmt>, env: &Environment) -> Self {
        Self {
            name: name.into(),
            body,
            env: env.downgrade(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &Stmt {
        &self.body
    }

    /// The environment the body runs against, if it is still alive
    pub fn environment(&self) -> Option<Environment> {
        self.env.upgrade()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Rc::ptr_eq(&self.body, &other.body) && self.env.ptr_eq(&other.env)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function").field("name", &self.name).finish_non_exhaustive()
    }
}
