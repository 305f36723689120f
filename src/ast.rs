use std::fmt;

use crate::token::{Location, Token};

/// One AST node: a variant plus the token that introduced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub token: Token,
}

impl Node {
    pub fn new(kind: NodeKind, token: Token) -> Self {
        Self { kind, token }
    }

    pub fn location(&self) -> &Location {
        &self.token.location
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Pos,
    Neg,
    Not,
    BitNot,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            UnaryOp::Pos => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "^",
        };
        f.write_str(symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEq => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
        };
        f.write_str(symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    Unpack,
}

impl AssignOp {
    /// The binary operator applied by a compound assignment, if any.
    pub fn binary_op(self) -> Option<BinaryOp> {
        let op = match self {
            AssignOp::Add => BinaryOp::Add,
            AssignOp::Sub => BinaryOp::Sub,
            AssignOp::Mul => BinaryOp::Mul,
            AssignOp::Div => BinaryOp::Div,
            AssignOp::Mod => BinaryOp::Mod,
            AssignOp::BitAnd => BinaryOp::BitAnd,
            AssignOp::BitOr => BinaryOp::BitOr,
            AssignOp::BitXor => BinaryOp::BitXor,
            AssignOp::Assign | AssignOp::Unpack => return None,
        };
        Some(op)
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            AssignOp::Assign => "=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Mod => "%=",
            AssignOp::BitAnd => "&=",
            AssignOp::BitOr => "|=",
            AssignOp::BitXor => "^=",
            AssignOp::Unpack => ":=",
        };
        f.write_str(symbol)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    List(Vec<Node>),
    /// Parallel key and value expression lists.
    Dict(Vec<Node>, Vec<Node>),
    Ident(String),
    Index {
        target: Box<Node>,
        index: Box<Node>,
    },
    Slice {
        target: Box<Node>,
        start: Box<Node>,
        end: Box<Node>,
    },
    Selector {
        target: Box<Node>,
        name: String,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Node>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// Multi-target assignment; `targets` and `values` are the comma lists on
    /// either side of the operator.
    Assign {
        op: AssignOp,
        targets: Vec<Node>,
        values: Vec<Node>,
    },
    /// Parallel condition and block lists; `else_block` is the trailing slot.
    If {
        conds: Vec<Node>,
        blocks: Vec<Vec<Node>>,
        else_block: Option<Vec<Node>>,
    },
    /// `for counter, element in target { body }`
    For {
        target: Box<Node>,
        counter: String,
        element: String,
        body: Vec<Node>,
    },
    /// `for cond { body }`, the conditional loop.
    Loop {
        cond: Box<Node>,
        body: Vec<Node>,
    },
    FunctionDef {
        name: String,
        params: Vec<String>,
        body: Vec<Node>,
    },
    StructDef {
        name: String,
        fields: Vec<String>,
        methods: Vec<Node>,
    },
    StructInit {
        type_name: String,
        fields: Vec<(String, Node)>,
    },
    Call {
        callee: Box<Node>,
        args: Vec<Node>,
    },
    Return(Option<Box<Node>>),
    Break,
    Continue,
    Import {
        target: String,
    },
    Comment(String),
    Eof,
}

impl NodeKind {
    /// Short tag used by debug tracing.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Int(_) => "int",
            NodeKind::Float(_) => "float",
            NodeKind::Str(_) => "string",
            NodeKind::Bool(_) => "bool",
            NodeKind::List(_) => "list",
            NodeKind::Dict(..) => "dict",
            NodeKind::Ident(_) => "ident",
            NodeKind::Index { .. } => "index",
            NodeKind::Slice { .. } => "slice",
            NodeKind::Selector { .. } => "selector",
            NodeKind::Unary { .. } => "unary",
            NodeKind::Binary { .. } => "binary",
            NodeKind::Assign { .. } => "assign",
            NodeKind::If { .. } => "if",
            NodeKind::For { .. } => "for",
            NodeKind::Loop { .. } => "loop",
            NodeKind::FunctionDef { .. } => "def",
            NodeKind::StructDef { .. } => "struct",
            NodeKind::StructInit { .. } => "struct_init",
            NodeKind::Call { .. } => "call",
            NodeKind::Return(_) => "return",
            NodeKind::Break => "break",
            NodeKind::Continue => "continue",
            NodeKind::Import { .. } => "import",
            NodeKind::Comment(_) => "comment",
            NodeKind::Eof => "eof",
        }
    }
}
