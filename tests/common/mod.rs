#![allow(dead_code)]

use sigo::{LiteralInt, Node, Position, Scanner, Token, TokenKind, Value};

pub const TEST_SOURCE: &str = "(test)";

/// Scan `input` to completion, panicking on a lexical error.
pub fn scan(input: &str) -> Vec<Token> {
    Scanner::from_text(input, TEST_SOURCE)
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| panic!("scan failed: {e}\n--- input ---\n{input}"))
}

/// Kinds of every token in `input`, `Eof` included.
pub fn kinds(input: &str) -> Vec<TokenKind> {
    scan(input).into_iter().map(|t| t.kind).collect()
}

pub fn token(kind: TokenKind, value: Value, line: usize, column: usize) -> Token {
    Token::new(kind, value, Position::new(line, column))
}

pub fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

pub fn newline(line: usize, column: usize) -> Token {
    token(TokenKind::Newline, text("\n"), line, column)
}

pub fn eof(line: usize, column: usize) -> Token {
    token(TokenKind::Eof, Value::None, line, column)
}

pub fn int(line: usize, column: usize, value: i64) -> Node {
    Node::LiteralInt(LiteralInt {
        position: Position::new(line, column),
        value,
    })
}
