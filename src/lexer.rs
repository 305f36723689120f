//! Streaming tokenizer over a module's character sequence.
//!
//! The tokenizer is lazy: tokens are produced on demand, and the parser can
//! `mark()` the scan position and `reset()` to it for backtracking. Past the
//! end of input it keeps returning `Eof` tokens.

use std::sync::Arc;

use crate::error::{ErrorKind, Result, ShibaError};
use crate::token::{Location, Token, TokenKind};

pub struct Tokenizer {
    module: Arc<str>,
    content: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

/// Scan position snapshot for `mark`/`reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerState {
    pos: usize,
    line: usize,
    column: usize,
}

impl Tokenizer {
    pub fn new(module: Arc<str>, source: &str) -> Self {
        Self {
            module,
            content: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn module(&self) -> Arc<str> {
        self.module.clone()
    }

    pub fn mark(&self) -> TokenizerState {
        TokenizerState {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    pub fn reset(&mut self, state: TokenizerState) {
        self.pos = state.pos;
        self.line = state.line;
        self.column = state.column;
    }

    /// Returns the next token without consuming it.
    pub fn peek_token(&mut self) -> Result<Token> {
        let state = self.mark();
        let token = self.next_token();
        self.reset(state);
        token
    }

    /// Scans and consumes the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_blanks();
        let location = self.location();

        let Some(ch) = self.peek_char() else {
            return Ok(Token::new(TokenKind::Eof, "", location));
        };

        match ch {
            '\n' => {
                self.advance();
                Ok(Token::new(TokenKind::NewLine, "\n", location))
            }
            '#' => {
                self.advance();
                let mut literal = String::new();
                while let Some(ch) = self.peek_char() {
                    if ch == '\n' {
                        break;
                    }
                    literal.push(ch);
                    self.advance();
                }
                Ok(Token::new(TokenKind::Comment, literal, location))
            }
            '"' => self.scan_string(location),
            '0'..='9' => self.scan_number(location),
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.scan_identifier(location)),
            _ => self.scan_punctuator(ch, location),
        }
    }

    fn skip_blanks(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn scan_string(&mut self, location: Location) -> Result<Token> {
        self.advance(); // opening quote
        let mut literal = String::new();
        loop {
            let Some(ch) = self.peek_char() else {
                return Err(ShibaError::new(
                    ErrorKind::Tokenize("unterminated string literal".to_string()),
                    location,
                ));
            };
            self.advance();
            match ch {
                '"' => return Ok(Token::new(TokenKind::Str, literal, location)),
                '\\' => {
                    let Some(escaped) = self.peek_char() else {
                        return Err(ShibaError::new(
                            ErrorKind::Tokenize("unterminated string literal".to_string()),
                            location,
                        ));
                    };
                    self.advance();
                    match escaped {
                        '"' => literal.push('"'),
                        '\\' => literal.push('\\'),
                        'n' => literal.push('\n'),
                        't' => literal.push('\t'),
                        other => {
                            return Err(ShibaError::new(
                                ErrorKind::Tokenize(format!("unknown escape '\\{other}'")),
                                location,
                            ));
                        }
                    }
                }
                other => literal.push(other),
            }
        }
    }

    fn scan_number(&mut self, location: Location) -> Result<Token> {
        let mut literal = String::new();
        let mut dots = 0;
        while let Some(ch) = self.peek_char() {
            match ch {
                '0'..='9' => literal.push(ch),
                '.' => {
                    dots += 1;
                    literal.push(ch);
                }
                _ => break,
            }
            self.advance();
        }
        if dots > 1 {
            return Err(ShibaError::new(
                ErrorKind::Tokenize(format!("invalid number literal '{literal}'")),
                location,
            ));
        }
        Ok(Token::new(TokenKind::Number, literal, location))
    }

    fn scan_identifier(&mut self, location: Location) -> Token {
        let mut literal = String::new();
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                literal.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        match TokenKind::keyword(&literal) {
            Some(kind) => Token::new(kind, literal, location),
            None => Token::new(TokenKind::Ident, literal, location),
        }
    }

    fn scan_punctuator(&mut self, first: char, location: Location) -> Result<Token> {
        // Longest prefix wins: try the two-character table before the
        // single-character one.
        let second = self.peek_char_at(1);

        if let Some(second) = second {
            let pair: String = [first, second].iter().collect();
            if let Some(kind) = two_char_punctuator(&pair) {
                self.advance();
                self.advance();
                return Ok(Token::new(kind, pair, location));
            }
        }

        if let Some(kind) = one_char_punctuator(first) {
            self.advance();
            return Ok(Token::new(kind, first.to_string(), location));
        }

        Err(ShibaError::new(
            ErrorKind::Tokenize(format!("unknown character '{first}'")),
            location,
        ))
    }

    fn location(&self) -> Location {
        Location::new(self.module.clone(), self.line, self.column, self.pos)
    }

    fn peek_char(&self) -> Option<char> {
        self.content.get(self.pos).copied()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.content.get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.pos += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}

fn two_char_punctuator(pair: &str) -> Option<TokenKind> {
    let kind = match pair {
        "&&" => TokenKind::AndAnd,
        "||" => TokenKind::OrOr,
        "==" => TokenKind::EqEq,
        "!=" => TokenKind::NotEq,
        "<=" => TokenKind::LessEq,
        ">=" => TokenKind::GreaterEq,
        "+=" => TokenKind::PlusEq,
        "-=" => TokenKind::MinusEq,
        "*=" => TokenKind::StarEq,
        "/=" => TokenKind::SlashEq,
        "%=" => TokenKind::PercentEq,
        "&=" => TokenKind::AmpEq,
        "|=" => TokenKind::PipeEq,
        "^=" => TokenKind::CaretEq,
        ":=" => TokenKind::ColonEq,
        "<<" => TokenKind::Shl,
        ">>" => TokenKind::Shr,
        _ => return None,
    };
    Some(kind)
}

fn one_char_punctuator(ch: char) -> Option<TokenKind> {
    let kind = match ch {
        '<' => TokenKind::Less,
        '>' => TokenKind::Greater,
        '.' => TokenKind::Dot,
        ':' => TokenKind::Colon,
        '=' => TokenKind::Assign,
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Star,
        '/' => TokenKind::Slash,
        '%' => TokenKind::Percent,
        ',' => TokenKind::Comma,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '[' => TokenKind::LBracket,
        ']' => TokenKind::RBracket,
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        '&' => TokenKind::Amp,
        '|' => TokenKind::Pipe,
        '^' => TokenKind::Caret,
        '!' => TokenKind::Bang,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer(source: &str) -> Tokenizer {
        Tokenizer::new(Arc::from("test"), source)
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = tokenizer(source);
        let mut kinds = Vec::new();
        loop {
            let token = lexer.next_token().expect("tokenize should succeed");
            let is_eof = token.kind == TokenKind::Eof;
            kinds.push(token.kind);
            if is_eof {
                break;
            }
        }
        kinds
    }

    #[test]
    fn scans_fixed_tokens() {
        assert_eq!(
            kinds("+ - * / % ( ) [ ] { } , . : ! & | ^ < >"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Colon,
                TokenKind::Bang,
                TokenKind::Amp,
                TokenKind::Pipe,
                TokenKind::Caret,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn longest_prefix_wins_for_punctuators() {
        assert_eq!(
            kinds(":= : == = <= << < && & |= ||"),
            vec![
                TokenKind::ColonEq,
                TokenKind::Colon,
                TokenKind::EqEq,
                TokenKind::Assign,
                TokenKind::LessEq,
                TokenKind::Shl,
                TokenKind::Less,
                TokenKind::AndAnd,
                TokenKind::Amp,
                TokenKind::PipeEq,
                TokenKind::OrOr,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn compound_assign_without_spaces() {
        assert_eq!(
            kinds("a+=1"),
            vec![
                TokenKind::Ident,
                TokenKind::PlusEq,
                TokenKind::Number,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn scans_keywords_and_identifiers() {
        let mut lexer =
            tokenizer("true false if elif else for in def continue break return import struct x");
        let expected = [
            TokenKind::True,
            TokenKind::False,
            TokenKind::If,
            TokenKind::Elif,
            TokenKind::Else,
            TokenKind::For,
            TokenKind::In,
            TokenKind::Def,
            TokenKind::Continue,
            TokenKind::Break,
            TokenKind::Return,
            TokenKind::Import,
            TokenKind::Struct,
            TokenKind::Ident,
        ];
        for kind in expected {
            assert_eq!(lexer.next_token().expect("token").kind, kind);
        }
    }

    #[test]
    fn keyword_prefix_is_still_an_identifier() {
        let mut lexer = tokenizer("iffy for_each");
        let token = lexer.next_token().expect("token");
        assert_eq!(token.kind, TokenKind::Ident);
        assert_eq!(token.literal, "iffy");
        let token = lexer.next_token().expect("token");
        assert_eq!(token.kind, TokenKind::Ident);
        assert_eq!(token.literal, "for_each");
    }

    #[test]
    fn scans_numbers() {
        let mut lexer = tokenizer("42 3.14");
        let token = lexer.next_token().expect("token");
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!(token.literal, "42");
        let token = lexer.next_token().expect("token");
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!(token.literal, "3.14");
    }

    #[test]
    fn rejects_number_with_two_dots() {
        let mut lexer = tokenizer("1.2.3");
        let error = lexer.next_token().expect_err("expected tokenize error");
        assert_eq!(
            error.kind,
            ErrorKind::Tokenize("invalid number literal '1.2.3'".to_string())
        );
    }

    #[test]
    fn scans_strings_with_escapes() {
        let mut lexer = tokenizer(r#""a\nb\t\"c\\d""#);
        let token = lexer.next_token().expect("token");
        assert_eq!(token.kind, TokenKind::Str);
        assert_eq!(token.literal, "a\nb\t\"c\\d");
    }

    #[test]
    fn rejects_unterminated_string() {
        let mut lexer = tokenizer("\"abc");
        let error = lexer.next_token().expect_err("expected tokenize error");
        assert_eq!(
            error.kind,
            ErrorKind::Tokenize("unterminated string literal".to_string())
        );
    }

    #[test]
    fn rejects_unknown_escape() {
        let mut lexer = tokenizer(r#""a\qb""#);
        let error = lexer.next_token().expect_err("expected tokenize error");
        assert_eq!(
            error.kind,
            ErrorKind::Tokenize("unknown escape '\\q'".to_string())
        );
    }

    #[test]
    fn comment_literal_excludes_hash_and_newline() {
        let mut lexer = tokenizer("# note\nx");
        let token = lexer.next_token().expect("token");
        assert_eq!(token.kind, TokenKind::Comment);
        assert_eq!(token.literal, " note");
        assert_eq!(lexer.next_token().expect("token").kind, TokenKind::NewLine);
        assert_eq!(lexer.next_token().expect("token").kind, TokenKind::Ident);
    }

    #[test]
    fn newlines_are_tokens_and_positions_track_lines() {
        let mut lexer = tokenizer("a\n  b");
        let token = lexer.next_token().expect("token");
        assert_eq!((token.location.line, token.location.column), (1, 1));
        let token = lexer.next_token().expect("token");
        assert_eq!(token.kind, TokenKind::NewLine);
        let token = lexer.next_token().expect("token");
        assert_eq!(token.literal, "b");
        assert_eq!((token.location.line, token.location.column), (2, 3));
    }

    #[test]
    fn eof_repeats_forever() {
        let mut lexer = tokenizer("");
        for _ in 0..3 {
            assert_eq!(lexer.next_token().expect("token").kind, TokenKind::Eof);
        }
    }

    #[test]
    fn peek_does_not_consume() {
        let mut lexer = tokenizer("a b");
        assert_eq!(lexer.peek_token().expect("peek").literal, "a");
        assert_eq!(lexer.next_token().expect("next").literal, "a");
        assert_eq!(lexer.next_token().expect("next").literal, "b");
    }

    #[test]
    fn mark_and_reset_restore_the_scan_position() {
        let mut lexer = tokenizer("a\nb c");
        lexer.next_token().expect("a");
        let state = lexer.mark();
        lexer.next_token().expect("newline");
        let token = lexer.next_token().expect("b");
        assert_eq!(token.literal, "b");
        lexer.reset(state);
        assert_eq!(lexer.next_token().expect("token").kind, TokenKind::NewLine);
        let token = lexer.next_token().expect("b again");
        assert_eq!(token.literal, "b");
        assert_eq!((token.location.line, token.location.column), (2, 1));
    }

    #[test]
    fn rejects_unknown_character() {
        let mut lexer = tokenizer("@");
        let error = lexer.next_token().expect_err("expected tokenize error");
        assert_eq!(
            error.kind,
            ErrorKind::Tokenize("unknown character '@'".to_string())
        );
    }
}
