//! Recursive-descent parser with limited backtracking.
//!
//! One call to [`Parser::parse_statement`] consumes one top-level statement
//! from the token stream and yields its AST node; the driver keeps calling
//! until it sees the `Eof` node. Backtracking goes through the tokenizer's
//! `mark`/`reset` pair, which captures the whole parser state because the
//! parser itself keeps no token buffer.

use crate::ast::{AssignOp, BinaryOp, Node, NodeKind, UnaryOp};
use crate::error::{ErrorKind, Result, ShibaError};
use crate::lexer::Tokenizer;
use crate::token::{Token, TokenKind};

/// Binary operator tiers, lowest precedence first. Each tier is
/// left-associative.
const BINARY_LEVELS: &[&[(TokenKind, BinaryOp)]] = &[
    &[(TokenKind::OrOr, BinaryOp::Or)],
    &[(TokenKind::AndAnd, BinaryOp::And)],
    &[(TokenKind::EqEq, BinaryOp::Eq), (TokenKind::NotEq, BinaryOp::NotEq)],
    &[
        (TokenKind::Less, BinaryOp::Less),
        (TokenKind::LessEq, BinaryOp::LessEq),
        (TokenKind::Greater, BinaryOp::Greater),
        (TokenKind::GreaterEq, BinaryOp::GreaterEq),
    ],
    &[(TokenKind::Pipe, BinaryOp::BitOr)],
    &[(TokenKind::Caret, BinaryOp::BitXor)],
    &[(TokenKind::Amp, BinaryOp::BitAnd)],
    &[(TokenKind::Shl, BinaryOp::Shl), (TokenKind::Shr, BinaryOp::Shr)],
    &[(TokenKind::Plus, BinaryOp::Add), (TokenKind::Minus, BinaryOp::Sub)],
    &[
        (TokenKind::Star, BinaryOp::Mul),
        (TokenKind::Slash, BinaryOp::Div),
        (TokenKind::Percent, BinaryOp::Mod),
    ],
];

pub struct Parser {
    tokens: Tokenizer,
    // Struct initializers are disabled while parsing `if`/`for` headers so
    // that `if x {` reads as a condition plus block, not `x{...}`. Re-enabled
    // inside any parenthesized or bracketed group.
    struct_literal_ok: bool,
}

impl Parser {
    pub fn new(tokens: Tokenizer) -> Self {
        Self {
            tokens,
            struct_literal_ok: true,
        }
    }

    /// Parses the next top-level statement, skipping blank lines before it.
    pub fn parse_statement(&mut self) -> Result<Node> {
        self.skip_newlines()?;
        self.statement()
    }

    fn statement(&mut self) -> Result<Node> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::Eof => {
                let token = self.next()?;
                Ok(Node::new(NodeKind::Eof, token))
            }
            TokenKind::Comment => {
                let token = self.next()?;
                let literal = token.literal.clone();
                Ok(Node::new(NodeKind::Comment(literal), token))
            }
            TokenKind::Import => self.import_statement(),
            TokenKind::Def => self.function_def(),
            TokenKind::Struct => self.struct_def(),
            TokenKind::If => self.if_statement(),
            TokenKind::For => self.for_statement(),
            TokenKind::Return => self.return_statement(),
            TokenKind::Break => {
                let token = self.next()?;
                Ok(Node::new(NodeKind::Break, token))
            }
            TokenKind::Continue => {
                let token = self.next()?;
                Ok(Node::new(NodeKind::Continue, token))
            }
            _ => self.expression_statement(),
        }
    }

    fn import_statement(&mut self) -> Result<Node> {
        let token = self.next()?;
        let mut target = self.expect(TokenKind::Ident, "module name")?.literal;
        while self.peek()?.kind == TokenKind::Slash {
            self.next()?;
            let segment = self.expect(TokenKind::Ident, "module name")?;
            target.push('/');
            target.push_str(&segment.literal);
        }
        Ok(Node::new(NodeKind::Import { target }, token))
    }

    fn function_def(&mut self) -> Result<Node> {
        let token = self.next()?;
        let name = self.expect(TokenKind::Ident, "function name")?.literal;
        let params = self.param_list()?;
        let body = self.block()?;
        Ok(Node::new(NodeKind::FunctionDef { name, params, body }, token))
    }

    fn param_list(&mut self) -> Result<Vec<String>> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut params = Vec::new();
        loop {
            self.skip_newlines()?;
            let token = self.peek()?;
            match token.kind {
                TokenKind::RParen => {
                    self.next()?;
                    break;
                }
                TokenKind::Ident => {
                    self.next()?;
                    params.push(token.literal);
                    self.skip_newlines()?;
                    let after = self.peek()?;
                    match after.kind {
                        TokenKind::Comma => {
                            self.next()?;
                        }
                        TokenKind::RParen => {}
                        _ => return Err(self.unexpected(&after, "',' or ')'")),
                    }
                }
                _ => return Err(self.unexpected(&token, "parameter name")),
            }
        }
        Ok(params)
    }

    fn struct_def(&mut self) -> Result<Node> {
        let token = self.next()?;
        let name = self.expect(TokenKind::Ident, "struct name")?.literal;
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut fields = Vec::new();
        let mut methods = Vec::new();
        loop {
            self.skip_newlines()?;
            let inner = self.peek()?;
            match inner.kind {
                TokenKind::RBrace => {
                    self.next()?;
                    break;
                }
                TokenKind::Def => methods.push(self.function_def()?),
                TokenKind::Ident => {
                    self.next()?;
                    fields.push(inner.literal);
                }
                TokenKind::Comment => {
                    self.next()?;
                }
                _ => return Err(self.unexpected(&inner, "field or method")),
            }
        }
        Ok(Node::new(
            NodeKind::StructDef {
                name,
                fields,
                methods,
            },
            token,
        ))
    }

    fn if_statement(&mut self) -> Result<Node> {
        let token = self.next()?;
        let mut conds = vec![self.condition()?];
        let mut blocks = vec![self.block()?];
        let mut else_block = None;
        loop {
            let state = self.tokens.mark();
            self.skip_newlines()?;
            let next = self.peek()?;
            match next.kind {
                TokenKind::Elif => {
                    self.next()?;
                    conds.push(self.condition()?);
                    blocks.push(self.block()?);
                }
                TokenKind::Else => {
                    self.next()?;
                    else_block = Some(self.block()?);
                    break;
                }
                _ => {
                    self.tokens.reset(state);
                    break;
                }
            }
        }
        Ok(Node::new(
            NodeKind::If {
                conds,
                blocks,
                else_block,
            },
            token,
        ))
    }

    fn for_statement(&mut self) -> Result<Node> {
        let token = self.next()?;
        if let Some((counter, element)) = self.try_for_bindings()? {
            let target = self.condition()?;
            let body = self.block()?;
            return Ok(Node::new(
                NodeKind::For {
                    target: Box::new(target),
                    counter,
                    element,
                    body,
                },
                token,
            ));
        }
        let cond = self.condition()?;
        let body = self.block()?;
        Ok(Node::new(
            NodeKind::Loop {
                cond: Box::new(cond),
                body,
            },
            token,
        ))
    }

    /// Looks for the `counter, element in` prefix of a sequence loop. Resets
    /// the token stream and returns `None` when the loop is a conditional one.
    fn try_for_bindings(&mut self) -> Result<Option<(String, String)>> {
        let state = self.tokens.mark();
        if self.peek()?.kind == TokenKind::Ident {
            let counter = self.next()?;
            if self.peek()?.kind == TokenKind::Comma {
                self.next()?;
                if self.peek()?.kind == TokenKind::Ident {
                    let element = self.next()?;
                    if self.peek()?.kind == TokenKind::In {
                        self.next()?;
                        return Ok(Some((counter.literal, element.literal)));
                    }
                }
            }
        }
        self.tokens.reset(state);
        Ok(None)
    }

    fn return_statement(&mut self) -> Result<Node> {
        let token = self.next()?;
        let next = self.peek()?;
        let value = match next.kind {
            TokenKind::NewLine | TokenKind::RBrace | TokenKind::Eof | TokenKind::Comment => None,
            _ => Some(Box::new(self.expression()?)),
        };
        Ok(Node::new(NodeKind::Return(value), token))
    }

    fn expression_statement(&mut self) -> Result<Node> {
        let mut targets = self.expression_list()?;
        let token = self.peek()?;
        let Some(op) = assign_op_for(token.kind) else {
            if targets.len() == 1 {
                return Ok(targets.remove(0));
            }
            return Err(self.unexpected(&token, "assignment operator"));
        };

        let op_token = self.next()?;
        let values = self.expression_list()?;
        match op {
            AssignOp::Assign => {
                if targets.len() != values.len() {
                    return Err(ShibaError::new(
                        ErrorKind::Parse(format!(
                            "assignment count mismatch: {} targets, {} values",
                            targets.len(),
                            values.len()
                        )),
                        op_token.location,
                    ));
                }
            }
            AssignOp::Unpack => {
                if values.len() != 1 {
                    return Err(ShibaError::new(
                        ErrorKind::Parse("unpack assignment takes a single value".to_string()),
                        op_token.location,
                    ));
                }
            }
            _ => {
                if targets.len() != 1 || values.len() != 1 {
                    return Err(ShibaError::new(
                        ErrorKind::Parse(
                            "compound assignment takes a single target and value".to_string(),
                        ),
                        op_token.location,
                    ));
                }
            }
        }
        Ok(Node::new(
            NodeKind::Assign {
                op,
                targets,
                values,
            },
            op_token,
        ))
    }

    /// Comma-separated expressions; a trailing comma is permitted.
    fn expression_list(&mut self) -> Result<Vec<Node>> {
        let mut exprs = vec![self.expression()?];
        loop {
            if self.peek()?.kind != TokenKind::Comma {
                break;
            }
            self.next()?;
            let state = self.tokens.mark();
            match self.expression() {
                Ok(expr) => exprs.push(expr),
                Err(_) => {
                    self.tokens.reset(state);
                    break;
                }
            }
        }
        Ok(exprs)
    }

    /// `{ ... }` block body; newlines separate statements inside it.
    fn block(&mut self) -> Result<Vec<Node>> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut statements = Vec::new();
        loop {
            self.skip_newlines()?;
            let token = self.peek()?;
            match token.kind {
                TokenKind::RBrace => {
                    self.next()?;
                    break;
                }
                TokenKind::Eof => return Err(self.unexpected(&token, "'}'")),
                _ => statements.push(self.statement()?),
            }
        }
        Ok(statements)
    }

    /// Control-flow condition: a plain expression with struct initializers
    /// disabled so the following `{` opens the block.
    fn condition(&mut self) -> Result<Node> {
        let prev = std::mem::replace(&mut self.struct_literal_ok, false);
        let result = self.expression();
        self.struct_literal_ok = prev;
        result
    }

    fn with_struct_literals<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let prev = std::mem::replace(&mut self.struct_literal_ok, true);
        let result = f(self);
        self.struct_literal_ok = prev;
        result
    }

    fn expression(&mut self) -> Result<Node> {
        self.binary_expression(0)
    }

    fn binary_expression(&mut self, level: usize) -> Result<Node> {
        if level == BINARY_LEVELS.len() {
            return self.unary_expression();
        }
        let mut left = self.binary_expression(level + 1)?;
        loop {
            let token = self.peek()?;
            let Some(&(_, op)) = BINARY_LEVELS[level]
                .iter()
                .find(|(kind, _)| *kind == token.kind)
            else {
                break;
            };
            self.next()?;
            let right = self.binary_expression(level + 1)?;
            left = Node::new(
                NodeKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                token,
            );
        }
        Ok(left)
    }

    fn unary_expression(&mut self) -> Result<Node> {
        let token = self.peek()?;
        let op = match token.kind {
            TokenKind::Plus => UnaryOp::Pos,
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Caret => UnaryOp::BitNot,
            _ => return self.postfix_expression(),
        };
        self.next()?;
        let operand = self.unary_expression()?;
        Ok(Node::new(
            NodeKind::Unary {
                op,
                operand: Box::new(operand),
            },
            token,
        ))
    }

    fn postfix_expression(&mut self) -> Result<Node> {
        let mut node = self.primary_expression()?;
        loop {
            let token = self.peek()?;
            match token.kind {
                TokenKind::LParen => {
                    self.next()?;
                    let args = self.call_args()?;
                    node = Node::new(
                        NodeKind::Call {
                            callee: Box::new(node),
                            args,
                        },
                        token,
                    );
                }
                TokenKind::LBracket => {
                    self.next()?;
                    let first = self.with_struct_literals(|p| p.expression())?;
                    if self.peek()?.kind == TokenKind::Colon {
                        self.next()?;
                        let end = self.with_struct_literals(|p| p.expression())?;
                        self.expect(TokenKind::RBracket, "']'")?;
                        node = Node::new(
                            NodeKind::Slice {
                                target: Box::new(node),
                                start: Box::new(first),
                                end: Box::new(end),
                            },
                            token,
                        );
                    } else {
                        self.expect(TokenKind::RBracket, "']'")?;
                        node = Node::new(
                            NodeKind::Index {
                                target: Box::new(node),
                                index: Box::new(first),
                            },
                            token,
                        );
                    }
                }
                TokenKind::Dot => {
                    self.next()?;
                    let name = self.expect(TokenKind::Ident, "selector name")?;
                    node = Node::new(
                        NodeKind::Selector {
                            target: Box::new(node),
                            name: name.literal,
                        },
                        token,
                    );
                }
                _ => break,
            }
        }
        Ok(node)
    }

    fn call_args(&mut self) -> Result<Vec<Node>> {
        let mut args = Vec::new();
        loop {
            self.skip_newlines()?;
            if self.peek()?.kind == TokenKind::RParen {
                self.next()?;
                break;
            }
            args.push(self.with_struct_literals(|p| p.expression())?);
            self.skip_newlines()?;
            let token = self.peek()?;
            match token.kind {
                TokenKind::Comma => {
                    self.next()?;
                }
                TokenKind::RParen => {}
                _ => return Err(self.unexpected(&token, "',' or ')'")),
            }
        }
        Ok(args)
    }

    fn primary_expression(&mut self) -> Result<Node> {
        let token = self.next()?;
        match token.kind {
            TokenKind::Number => self.number_literal(token),
            TokenKind::Str => {
                let literal = token.literal.clone();
                Ok(Node::new(NodeKind::Str(literal), token))
            }
            TokenKind::True => Ok(Node::new(NodeKind::Bool(true), token)),
            TokenKind::False => Ok(Node::new(NodeKind::Bool(false), token)),
            TokenKind::Ident => {
                if self.struct_literal_ok && self.peek()?.kind == TokenKind::LBrace {
                    if let Some(node) = self.try_struct_init(&token)? {
                        return Ok(node);
                    }
                }
                let name = token.literal.clone();
                Ok(Node::new(NodeKind::Ident(name), token))
            }
            TokenKind::LParen => {
                let expr = self.with_struct_literals(|p| {
                    p.skip_newlines()?;
                    let expr = p.expression()?;
                    p.skip_newlines()?;
                    Ok(expr)
                })?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(expr)
            }
            TokenKind::LBracket => self.list_literal(token),
            TokenKind::LBrace => self.dict_literal(token),
            _ => Err(self.unexpected(&token, "expression")),
        }
    }

    /// Numeric literals keep their text in the token; a single embedded dot
    /// makes the node a float.
    fn number_literal(&self, token: Token) -> Result<Node> {
        if token.literal.contains('.') {
            match token.literal.parse::<f64>() {
                Ok(value) => Ok(Node::new(NodeKind::Float(value), token)),
                Err(_) => Err(ShibaError::new(
                    ErrorKind::Parse(format!("invalid float literal '{}'", token.literal)),
                    token.location,
                )),
            }
        } else {
            match token.literal.parse::<i64>() {
                Ok(value) => Ok(Node::new(NodeKind::Int(value), token)),
                Err(_) => Err(ShibaError::new(
                    ErrorKind::Parse(format!("invalid integer literal '{}'", token.literal)),
                    token.location,
                )),
            }
        }
    }

    fn list_literal(&mut self, token: Token) -> Result<Node> {
        let mut elements = Vec::new();
        loop {
            self.skip_newlines()?;
            if self.peek()?.kind == TokenKind::RBracket {
                self.next()?;
                break;
            }
            elements.push(self.with_struct_literals(|p| p.expression())?);
            self.skip_newlines()?;
            let next = self.peek()?;
            match next.kind {
                TokenKind::Comma => {
                    self.next()?;
                }
                TokenKind::RBracket => {}
                _ => return Err(self.unexpected(&next, "',' or ']'")),
            }
        }
        Ok(Node::new(NodeKind::List(elements), token))
    }

    fn dict_literal(&mut self, token: Token) -> Result<Node> {
        let mut keys = Vec::new();
        let mut values = Vec::new();
        loop {
            self.skip_newlines()?;
            if self.peek()?.kind == TokenKind::RBrace {
                self.next()?;
                break;
            }
            keys.push(self.with_struct_literals(|p| p.expression())?);
            self.expect(TokenKind::Colon, "':'")?;
            self.skip_newlines()?;
            values.push(self.with_struct_literals(|p| p.expression())?);
            self.skip_newlines()?;
            let next = self.peek()?;
            match next.kind {
                TokenKind::Comma => {
                    self.next()?;
                }
                TokenKind::RBrace => {}
                _ => return Err(self.unexpected(&next, "',' or '}'")),
            }
        }
        Ok(Node::new(NodeKind::Dict(keys, values), token))
    }

    /// Attempts `Name{field: value, ...}` after an identifier. Resets and
    /// returns `None` when the braces do not look like an initializer.
    fn try_struct_init(&mut self, name_token: &Token) -> Result<Option<Node>> {
        let state = self.tokens.mark();
        self.next()?; // '{'
        self.skip_newlines()?;
        let first = self.peek()?;

        if first.kind == TokenKind::RBrace {
            self.next()?;
            return Ok(Some(Node::new(
                NodeKind::StructInit {
                    type_name: name_token.literal.clone(),
                    fields: Vec::new(),
                },
                name_token.clone(),
            )));
        }

        let looks_like_initializer = first.kind == TokenKind::Ident && {
            let probe = self.tokens.mark();
            self.next()?;
            let colon = self.peek()?.kind == TokenKind::Colon;
            self.tokens.reset(probe);
            colon
        };
        if !looks_like_initializer {
            self.tokens.reset(state);
            return Ok(None);
        }

        let mut fields = Vec::new();
        loop {
            self.skip_newlines()?;
            if self.peek()?.kind == TokenKind::RBrace {
                self.next()?;
                break;
            }
            let field = self.expect(TokenKind::Ident, "field name")?;
            self.expect(TokenKind::Colon, "':'")?;
            self.skip_newlines()?;
            let value = self.with_struct_literals(|p| p.expression())?;
            fields.push((field.literal, value));
            self.skip_newlines()?;
            let next = self.peek()?;
            match next.kind {
                TokenKind::Comma => {
                    self.next()?;
                }
                TokenKind::RBrace => {}
                _ => return Err(self.unexpected(&next, "',' or '}'")),
            }
        }
        Ok(Some(Node::new(
            NodeKind::StructInit {
                type_name: name_token.literal.clone(),
                fields,
            },
            name_token.clone(),
        )))
    }

    fn skip_newlines(&mut self) -> Result<()> {
        while self.peek()?.kind == TokenKind::NewLine {
            self.next()?;
        }
        Ok(())
    }

    fn next(&mut self) -> Result<Token> {
        self.tokens.next_token()
    }

    fn peek(&mut self) -> Result<Token> {
        self.tokens.peek_token()
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token> {
        let token = self.peek()?;
        if token.kind == kind {
            self.next()
        } else {
            Err(self.unexpected(&token, expected))
        }
    }

    fn unexpected(&self, token: &Token, expected: &str) -> ShibaError {
        if token.kind == TokenKind::Eof {
            return ShibaError::new(ErrorKind::UnexpectedEof, token.location.clone());
        }
        let got = match token.kind {
            TokenKind::NewLine => "newline".to_string(),
            TokenKind::Comment => "comment".to_string(),
            _ => format!("'{}'", token.literal),
        };
        ShibaError::new(
            ErrorKind::Parse(format!("expected {expected}, got {got}")),
            token.location.clone(),
        )
    }
}

fn assign_op_for(kind: TokenKind) -> Option<AssignOp> {
    let op = match kind {
        TokenKind::Assign => AssignOp::Assign,
        TokenKind::PlusEq => AssignOp::Add,
        TokenKind::MinusEq => AssignOp::Sub,
        TokenKind::StarEq => AssignOp::Mul,
        TokenKind::SlashEq => AssignOp::Div,
        TokenKind::PercentEq => AssignOp::Mod,
        TokenKind::AmpEq => AssignOp::BitAnd,
        TokenKind::PipeEq => AssignOp::BitOr,
        TokenKind::CaretEq => AssignOp::BitXor,
        TokenKind::ColonEq => AssignOp::Unpack,
        _ => return None,
    };
    Some(op)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn parser(source: &str) -> Parser {
        Parser::new(Tokenizer::new(Arc::from("test"), source))
    }

    fn parse_one(source: &str) -> Node {
        parser(source).parse_statement().expect("parse failed")
    }

    fn parse_all(source: &str) -> Vec<Node> {
        let mut p = parser(source);
        let mut nodes = Vec::new();
        loop {
            let node = p.parse_statement().expect("parse failed");
            if node.kind == NodeKind::Eof {
                break;
            }
            nodes.push(node);
        }
        nodes
    }

    fn parse_error(source: &str) -> ShibaError {
        let mut p = parser(source);
        loop {
            match p.parse_statement() {
                Ok(node) if node.kind == NodeKind::Eof => panic!("expected parse error"),
                Ok(_) => {}
                Err(error) => return error,
            }
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let node = parse_one("1 + 2 * 3");
        let NodeKind::Binary { op, right, .. } = &node.kind else {
            panic!("expected binary node, got {:?}", node.kind);
        };
        assert_eq!(*op, BinaryOp::Add);
        let NodeKind::Binary { op, .. } = &right.kind else {
            panic!("expected nested binary node");
        };
        assert_eq!(*op, BinaryOp::Mul);
    }

    #[test]
    fn comparison_binds_tighter_than_logic() {
        let node = parse_one("1 < 2 && 3 < 4");
        let NodeKind::Binary { op, left, right } = &node.kind else {
            panic!("expected binary node");
        };
        assert_eq!(*op, BinaryOp::And);
        assert!(matches!(
            left.kind,
            NodeKind::Binary {
                op: BinaryOp::Less,
                ..
            }
        ));
        assert!(matches!(
            right.kind,
            NodeKind::Binary {
                op: BinaryOp::Less,
                ..
            }
        ));
    }

    #[test]
    fn shift_binds_looser_than_addition() {
        let node = parse_one("1 << 2 + 3");
        let NodeKind::Binary { op, right, .. } = &node.kind else {
            panic!("expected binary node");
        };
        assert_eq!(*op, BinaryOp::Shl);
        assert!(matches!(
            right.kind,
            NodeKind::Binary {
                op: BinaryOp::Add,
                ..
            }
        ));
    }

    #[test]
    fn additive_chain_is_left_associative() {
        let node = parse_one("1 - 2 - 3");
        let NodeKind::Binary { op, left, .. } = &node.kind else {
            panic!("expected binary node");
        };
        assert_eq!(*op, BinaryOp::Sub);
        assert!(matches!(
            left.kind,
            NodeKind::Binary {
                op: BinaryOp::Sub,
                ..
            }
        ));
    }

    #[test]
    fn parses_unary_prefixes() {
        let node = parse_one("-x");
        assert!(matches!(
            node.kind,
            NodeKind::Unary {
                op: UnaryOp::Neg,
                ..
            }
        ));
        let node = parse_one("!ok");
        assert!(matches!(
            node.kind,
            NodeKind::Unary {
                op: UnaryOp::Not,
                ..
            }
        ));
        let node = parse_one("^bits");
        assert!(matches!(
            node.kind,
            NodeKind::Unary {
                op: UnaryOp::BitNot,
                ..
            }
        ));
    }

    #[test]
    fn parses_postfix_chain() {
        let node = parse_one("a.b[0](1, 2)");
        let NodeKind::Call { callee, args } = &node.kind else {
            panic!("expected call node");
        };
        assert_eq!(args.len(), 2);
        let NodeKind::Index { target, .. } = &callee.kind else {
            panic!("expected index node");
        };
        assert!(matches!(&target.kind, NodeKind::Selector { name, .. } if name == "b"));
    }

    #[test]
    fn parses_slice() {
        let node = parse_one("xs[1:3]");
        assert!(matches!(node.kind, NodeKind::Slice { .. }));
    }

    #[test]
    fn parses_number_literals() {
        assert_eq!(parse_one("42").kind, NodeKind::Int(42));
        assert_eq!(parse_one("3.5").kind, NodeKind::Float(3.5));
    }

    #[test]
    fn parses_collection_literals_with_newlines_and_trailing_commas() {
        let node = parse_one("[\n  1,\n  2,\n]");
        let NodeKind::List(elements) = &node.kind else {
            panic!("expected list node");
        };
        assert_eq!(elements.len(), 2);

        let node = parse_one("{\n  \"a\": 1,\n  \"b\": 2,\n}");
        let NodeKind::Dict(keys, values) = &node.kind else {
            panic!("expected dict node");
        };
        assert_eq!(keys.len(), 2);
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn parses_plain_assignment() {
        let node = parse_one("a = 1");
        let NodeKind::Assign {
            op,
            targets,
            values,
        } = &node.kind
        else {
            panic!("expected assign node");
        };
        assert_eq!(*op, AssignOp::Assign);
        assert_eq!(targets.len(), 1);
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn parses_multi_assignment() {
        let node = parse_one("a, b, c = 1, 2, 3");
        let NodeKind::Assign {
            targets, values, ..
        } = &node.kind
        else {
            panic!("expected assign node");
        };
        assert_eq!(targets.len(), 3);
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn parses_compound_and_unpack_assignment() {
        let node = parse_one("a += 1");
        assert!(matches!(
            node.kind,
            NodeKind::Assign {
                op: AssignOp::Add,
                ..
            }
        ));

        let node = parse_one("a, b := pair");
        let NodeKind::Assign {
            op,
            targets,
            values,
        } = &node.kind
        else {
            panic!("expected assign node");
        };
        assert_eq!(*op, AssignOp::Unpack);
        assert_eq!(targets.len(), 2);
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn rejects_assignment_count_mismatch() {
        let error = parse_error("a, b = 1");
        assert!(matches!(error.kind, ErrorKind::Parse(_)));
        let error = parse_error("a += 1, 2");
        assert!(matches!(error.kind, ErrorKind::Parse(_)));
        let error = parse_error("a, b := 1, 2");
        assert!(matches!(error.kind, ErrorKind::Parse(_)));
    }

    #[test]
    fn parses_index_and_selector_assignment_targets() {
        let node = parse_one("d[\"k\"] = 1");
        let NodeKind::Assign { targets, .. } = &node.kind else {
            panic!("expected assign node");
        };
        assert!(matches!(targets[0].kind, NodeKind::Index { .. }));

        let node = parse_one("p.x = 1");
        let NodeKind::Assign { targets, .. } = &node.kind else {
            panic!("expected assign node");
        };
        assert!(matches!(targets[0].kind, NodeKind::Selector { .. }));
    }

    #[test]
    fn parses_if_elif_else() {
        let node = parse_one("if a { 1 } elif b { 2 } else { 3 }");
        let NodeKind::If {
            conds,
            blocks,
            else_block,
        } = &node.kind
        else {
            panic!("expected if node");
        };
        assert_eq!(conds.len(), 2);
        assert_eq!(blocks.len(), 2);
        assert!(else_block.is_some());
    }

    #[test]
    fn if_condition_does_not_eat_the_block_as_struct_init() {
        let node = parse_one("if x { y = 1 }");
        let NodeKind::If { conds, blocks, .. } = &node.kind else {
            panic!("expected if node");
        };
        assert!(matches!(&conds[0].kind, NodeKind::Ident(name) if name == "x"));
        assert_eq!(blocks[0].len(), 1);
    }

    #[test]
    fn parses_sequence_loop() {
        let node = parse_one("for i, e in xs { print(i) }");
        let NodeKind::For {
            counter,
            element,
            body,
            ..
        } = &node.kind
        else {
            panic!("expected for node");
        };
        assert_eq!(counter, "i");
        assert_eq!(element, "e");
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn parses_conditional_loop() {
        let node = parse_one("for n < 3 { n += 1 }");
        let NodeKind::Loop { cond, body } = &node.kind else {
            panic!("expected loop node");
        };
        assert!(matches!(
            cond.kind,
            NodeKind::Binary {
                op: BinaryOp::Less,
                ..
            }
        ));
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn parses_function_def() {
        let node = parse_one("def add(x, y,) { return x + y }");
        let NodeKind::FunctionDef { name, params, body } = &node.kind else {
            panic!("expected def node");
        };
        assert_eq!(name, "add");
        assert_eq!(params, &["x".to_string(), "y".to_string()]);
        assert_eq!(body.len(), 1);
        assert!(matches!(body[0].kind, NodeKind::Return(Some(_))));
    }

    #[test]
    fn parses_struct_def_with_fields_and_method() {
        let node = parse_one("struct P { x y\n  def sum() { return x + y } }");
        let NodeKind::StructDef {
            name,
            fields,
            methods,
        } = &node.kind
        else {
            panic!("expected struct node");
        };
        assert_eq!(name, "P");
        assert_eq!(fields, &["x".to_string(), "y".to_string()]);
        assert_eq!(methods.len(), 1);
    }

    #[test]
    fn parses_struct_initializer() {
        let node = parse_one("P{x: 4, y: 5}");
        let NodeKind::StructInit { type_name, fields } = &node.kind else {
            panic!("expected struct init node, got {:?}", node.kind);
        };
        assert_eq!(type_name, "P");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].0, "x");

        let node = parse_one("P{}");
        assert!(matches!(node.kind, NodeKind::StructInit { .. }));
    }

    #[test]
    fn braces_without_field_colon_are_not_a_struct_initializer() {
        // `x` followed by a dict literal in the next statement position.
        let nodes = parse_all("x\n{1: 2}\n");
        assert_eq!(nodes.len(), 2);
        assert!(matches!(&nodes[0].kind, NodeKind::Ident(name) if name == "x"));
        assert!(matches!(nodes[1].kind, NodeKind::Dict(..)));
    }

    #[test]
    fn parses_import_with_path() {
        let node = parse_one("import a/b");
        assert_eq!(
            node.kind,
            NodeKind::Import {
                target: "a/b".to_string()
            }
        );
    }

    #[test]
    fn parses_control_statements() {
        let nodes = parse_all("break\ncontinue\nreturn\nreturn 1\n");
        assert!(matches!(nodes[0].kind, NodeKind::Break));
        assert!(matches!(nodes[1].kind, NodeKind::Continue));
        assert!(matches!(nodes[2].kind, NodeKind::Return(None)));
        assert!(matches!(nodes[3].kind, NodeKind::Return(Some(_))));
    }

    #[test]
    fn comment_becomes_a_statement() {
        let nodes = parse_all("# hello\na = 1\n");
        assert!(matches!(&nodes[0].kind, NodeKind::Comment(text) if text == " hello"));
        assert!(matches!(nodes[1].kind, NodeKind::Assign { .. }));
    }

    #[test]
    fn newlines_inside_parens_do_not_end_the_statement() {
        let node = parse_one("(1 +\n 2)");
        assert!(matches!(
            node.kind,
            NodeKind::Binary {
                op: BinaryOp::Add,
                ..
            }
        ));
    }

    #[test]
    fn newline_ends_an_expression_statement() {
        let nodes = parse_all("a\n(1)\n");
        assert_eq!(nodes.len(), 2);
        assert!(matches!(nodes[0].kind, NodeKind::Ident(_)));
        assert!(matches!(nodes[1].kind, NodeKind::Int(1)));
    }

    #[test]
    fn statements_may_share_a_line() {
        let nodes = parse_all("print(1) print(2)\n");
        assert_eq!(nodes.len(), 2);
        assert!(matches!(nodes[0].kind, NodeKind::Call { .. }));
        assert!(matches!(nodes[1].kind, NodeKind::Call { .. }));
    }

    #[test]
    fn node_locations_match_their_introducing_tokens() {
        let node = parse_one("a = 1 + 2");
        // The assign node is introduced by the '=' token.
        assert_eq!((node.location().line, node.location().column), (1, 3));
        let NodeKind::Assign {
            targets, values, ..
        } = &node.kind
        else {
            panic!("expected assign node");
        };
        assert_eq!(
            (targets[0].location().line, targets[0].location().column),
            (1, 1)
        );
        // The binary node is introduced by the '+' token.
        assert_eq!(
            (values[0].location().line, values[0].location().column),
            (1, 7)
        );
    }

    #[test]
    fn unterminated_block_reports_unexpected_eof() {
        let error = parse_error("def f() {\n  return 1\n");
        assert_eq!(error.kind, ErrorKind::UnexpectedEof);
    }

    #[test]
    fn unexpected_token_reports_parse_error_with_location() {
        let error = parse_error("a = )");
        assert!(matches!(error.kind, ErrorKind::Parse(_)));
        assert_eq!((error.location.line, error.location.column), (1, 5));
    }
}
