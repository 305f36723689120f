use std::fmt;
use std::sync::Arc;

/// Position of a token or AST node inside a module.
///
/// Every user-visible diagnostic carries one of these, rendered as
/// `module:line:column`. The module name is shared, not copied, into every
/// token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub module: Arc<str>,
    pub line: usize,
    pub column: usize,
    pub position: usize,
}

impl Location {
    pub fn new(module: Arc<str>, line: usize, column: usize, position: usize) -> Self {
        Self {
            module,
            line,
            column,
            position,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.module, self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Two-character punctuators (matched longest-prefix first)
    AndAnd,    // &&
    OrOr,      // ||
    EqEq,      // ==
    NotEq,     // !=
    LessEq,    // <=
    GreaterEq, // >=
    PlusEq,    // +=
    MinusEq,   // -=
    StarEq,    // *=
    SlashEq,   // /=
    PercentEq, // %=
    AmpEq,     // &=
    PipeEq,    // |=
    CaretEq,   // ^=
    ColonEq,   // :=
    Shl,       // <<
    Shr,       // >>

    // Single-character punctuators
    Less,
    Greater,
    Dot,
    Colon,
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Amp,
    Pipe,
    Caret,
    Bang,
    NewLine,

    // Keywords
    True,
    False,
    If,
    Elif,
    Else,
    For,
    In,
    Def,
    Continue,
    Break,
    Return,
    Import,
    Struct,

    // Everything else
    Ident,
    Str,
    Number,
    Comment,
    Eof,
}

impl TokenKind {
    /// Maps a scanned identifier to its reserved-word kind, if any.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        let kind = match ident {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "if" => TokenKind::If,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "in" => TokenKind::In,
            "def" => TokenKind::Def,
            "continue" => TokenKind::Continue,
            "break" => TokenKind::Break,
            "return" => TokenKind::Return,
            "import" => TokenKind::Import,
            "struct" => TokenKind::Struct,
            _ => return None,
        };
        Some(kind)
    }
}

/// A scanned token: kind, literal text, and where it starts.
///
/// For identifiers, strings, numbers, and comments the literal carries the
/// scanned content; for punctuators it carries the lexeme itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, location: Location) -> Self {
        Self {
            kind,
            literal: literal.into(),
            location,
        }
    }
}
