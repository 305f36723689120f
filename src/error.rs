use thiserror::Error;

use crate::token::Location;

/// Error taxonomy shared by the tokenizer, parser, and evaluator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ErrorKind {
    #[error("{0}")]
    Tokenize(String),
    #[error("{0}")]
    Parse(String),
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("undefined identifier '{name}'")]
    UndefinedIdent { name: String },
    #[error("key {key} not found")]
    DictKeyNotFound { key: String },
    #[error("expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },
    #[error("index {index} out of range for length {length}")]
    InvalidIndex { index: i64, length: usize },
    #[error("invalid operation: {op} on {lhs} and {rhs}")]
    InvalidBinaryOp {
        op: String,
        lhs: &'static str,
        rhs: &'static str,
    },
    #[error("invalid operation: {op} on {operand}")]
    InvalidUnaryOp {
        op: String,
        operand: &'static str,
    },
    #[error("invalid assignment: {op} on {lhs} and {rhs}")]
    InvalidAssignOp {
        op: String,
        lhs: &'static str,
        rhs: &'static str,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("{keyword} outside loop")]
    ControlFlow { keyword: &'static str },
    #[error("host function failed: {0}")]
    Host(String),
    #[error("cannot import '{name}'")]
    Import { name: String },
    #[error("internal error: {0}")]
    Internal(String),
}

/// An error kind plus the location that produced it.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{location}: {kind}")]
pub struct ShibaError {
    pub kind: ErrorKind,
    pub location: Location,
}

impl ShibaError {
    pub fn new(kind: ErrorKind, location: Location) -> Self {
        Self { kind, location }
    }

    /// True for parse errors caused by running out of input. The REPL keeps
    /// buffering lines on these instead of reporting them.
    pub fn is_unexpected_eof(&self) -> bool {
        matches!(self.kind, ErrorKind::UnexpectedEof)
    }
}

pub type Result<T> = std::result::Result<T, ShibaError>;
