use std::fmt;
use std::rc::Rc;

/// Coarse category of a lexed token
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Tag {
    Reserved,
    Int,
    String,
    Id,
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Token {
    pub text: String,
    pub tag: Tag,
}

impl Token {
    pub fn new(text: impl Into<String>, tag: Tag) -> Self {
        Token { text: text.into(), tag }
    }

    pub fn reserved(text: impl Into<String>) -> Self {
        Token::new(text, Tag::Reserved)
    }

    pub fn int(text: impl Into<String>) -> Self {
        Token::new(text, Tag::Int)
    }

    pub fn string(text: impl Into<String>) -> Self {
        Token::new(text, Tag::String)
    }

    pub fn id(text: impl Into<String>) -> Self {
        Token::new(text, Tag::Id)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            Tag::Reserved => write!(f, "'{}'", self.text),
            Tag::Int => write!(f, "integer {}", self.text),
            Tag::String => write!(f, "string {}", self.text),
            Tag::Id => write!(f, "identifier `{}`", self.text),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Stmt {
    Assign {
        name: String,
        value: Expr,
    },
    Compound {
        first: Box<Stmt>,
        second: Box<Stmt>,
    },
    Print(Expr),
    Input(String),
    If {
        cond: BoolExpr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: BoolExpr,
        body: Box<Stmt>,
    },
    For {
        name: String,
        start: Expr,
        end: Expr,
        body: Box<Stmt>,
    },
    // The body is shared with the callable bound at declaration time
    FunctionDecl {
        name: String,
        body: Rc<Stmt>,
    },
    FunctionCall(String),
}

impl Stmt {
    pub fn compound(first: Stmt, second: Stmt) -> Self {
        Stmt::Compound {
            first: Box::new(first),
            second: Box::new(second),
        }
    }
}

/// Arithmetic and string expressions
#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    Int(i64),
    /// Raw string token text, quotes included
    Str(String),
    Var(String),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Boolean expressions
#[derive(Debug, PartialEq, Clone)]
pub enum BoolExpr {
    Literal(bool),
    Relop {
        op: RelOp,
        left: Expr,
        right: Expr,
    },
    Logic {
        op: LogicOp,
        left: Box<BoolExpr>,
        right: Box<BoolExpr>,
    },
    Not(Box<BoolExpr>),
}

impl BoolExpr {
    pub fn logic(op: LogicOp, left: BoolExpr, right: BoolExpr) -> Self {
        BoolExpr::Logic {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 4] = [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div];

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RelOp {
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    EqualEqual,
    NotEqual,
}

impl RelOp {
    pub const ALL: [RelOp; 6] = [
        RelOp::Less,
        RelOp::LessEqual,
        RelOp::Greater,
        RelOp::GreaterEqual,
        RelOp::EqualEqual,
        RelOp::NotEqual,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            RelOp::Less => "<",
            RelOp::LessEqual => "<=",
            RelOp::Greater => ">",
            RelOp::GreaterEqual => ">=",
            RelOp::EqualEqual => "==",
            RelOp::NotEqual => "!=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    pub const ALL: [LogicOp; 2] = [LogicOp::And, LogicOp::Or];

    pub fn symbol(self) -> &'static str {
        match self {
            LogicOp::And => "and",
            LogicOp::Or => "or",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}
