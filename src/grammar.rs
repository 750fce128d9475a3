//! Built-in statement grammar.
//!
//! A recursive-descent engine with one token of lookahead:
//!
//! ```text
//! program    := stmts EOF
//! stmts      := { NL | ";" } { stmt { NL | ";" } }
//! stmt       := while | if | block | expr terminator
//! while      := "while" expr block terminator
//! if         := "if" expr block { "elsif" expr block } [ "else" block ] terminator
//! block      := "{" stmts "}"
//! expr       := INT | FLOAT | STRING | SYMBOL | "(" expr ")"
//! terminator := NL | ";" | <before "}" or EOF>
//! ```

use crate::ast::{self, Branch, If, LiteralFloat, LiteralInt, LiteralString, Node, Symbol, While};
use crate::parser::{Abort, GrammarEngine, TokenStream};
use crate::token::{Token, TokenKind, Value};

/// Statement grammar covering blocks, `while`, `if`, and literal
/// expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementGrammar;

impl GrammarEngine for StatementGrammar {
    fn run(&mut self, tokens: &mut dyn TokenStream) -> Result<Option<Node>, Abort> {
        let mut reducer = Reducer {
            tokens,
            lookahead: None,
        };
        let statements = reducer.statements()?;
        reducer.expect(TokenKind::Eof, "syntax error")?;
        Ok(ast::finish_block(statements))
    }
}

struct Reducer<'t> {
    tokens: &'t mut dyn TokenStream,
    lookahead: Option<Token>,
}

impl Reducer<'_> {
    fn statements(&mut self) -> Result<Vec<Node>, Abort> {
        let mut statements = Vec::new();
        loop {
            match self.peek()? {
                TokenKind::Newline | TokenKind::Semicolon => {
                    self.advance()?;
                }
                TokenKind::RBrace | TokenKind::Eof => return Ok(statements),
                _ => {
                    let statement = self.statement()?;
                    ast::append_statement(&mut statements, statement);
                }
            }
        }
    }

    fn statement(&mut self) -> Result<Option<Node>, Abort> {
        let node = match self.peek()? {
            TokenKind::While => Some(self.while_statement()?),
            TokenKind::If => Some(self.if_statement()?),
            TokenKind::LBrace => self.block()?,
            _ => Some(self.expression()?),
        };
        self.terminator()?;
        Ok(node)
    }

    fn while_statement(&mut self) -> Result<Node, Abort> {
        let keyword = self.advance()?;
        let condition = self.expression()?;
        let body = self.block()?;
        Ok(Node::While(While {
            position: keyword.position,
            condition: Box::new(condition),
            body: body.map(Box::new),
        }))
    }

    fn if_statement(&mut self) -> Result<Node, Abort> {
        let keyword = self.advance()?;
        let mut branches = vec![self.branch()?];
        let mut otherwise = None;
        loop {
            match self.peek()? {
                TokenKind::Elsif => {
                    self.advance()?;
                    branches.push(self.branch()?);
                }
                TokenKind::Else => {
                    self.advance()?;
                    otherwise = self.block()?.map(Box::new);
                    break;
                }
                _ => break,
            }
        }
        Ok(Node::If(If {
            position: keyword.position,
            branches,
            otherwise,
        }))
    }

    fn branch(&mut self) -> Result<Branch, Abort> {
        let condition = self.expression()?;
        let body = self.block()?;
        Ok(Branch { condition, body })
    }

    fn block(&mut self) -> Result<Option<Node>, Abort> {
        self.expect(TokenKind::LBrace, "expected '{'")?;
        let statements = self.statements()?;
        self.expect(TokenKind::RBrace, "expected '}'")?;
        Ok(ast::finish_block(statements))
    }

    fn expression(&mut self) -> Result<Node, Abort> {
        let token = self.advance()?;
        let position = token.position;
        match (token.kind, token.value) {
            (TokenKind::Int, Value::Int(value)) => {
                Ok(Node::LiteralInt(LiteralInt { position, value }))
            }
            (TokenKind::Float, Value::Float(value)) => {
                Ok(Node::LiteralFloat(LiteralFloat { position, value }))
            }
            (TokenKind::Str, Value::Text(value)) => {
                Ok(Node::LiteralString(LiteralString { position, value }))
            }
            (TokenKind::Symbol, Value::Text(name)) => Ok(Node::Symbol(Symbol { position, name })),
            (TokenKind::LParen, _) => {
                let inner = self.expression()?;
                self.expect(TokenKind::RParen, "expected ')'")?;
                Ok(inner)
            }
            _ => Err(self.tokens.error("syntax error")),
        }
    }

    fn terminator(&mut self) -> Result<(), Abort> {
        match self.peek()? {
            TokenKind::Newline | TokenKind::Semicolon => {
                self.advance()?;
                Ok(())
            }
            TokenKind::RBrace | TokenKind::Eof => Ok(()),
            _ => Err(self.tokens.error("syntax error")),
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, Abort> {
        if self.peek()? == kind {
            self.advance()
        } else {
            Err(self.tokens.error(message))
        }
    }

    fn peek(&mut self) -> Result<TokenKind, Abort> {
        if let Some(tok) = &self.lookahead {
            return Ok(tok.kind);
        }
        let tok = self.tokens.next_token()?;
        let kind = tok.kind;
        self.lookahead = Some(tok);
        Ok(kind)
    }

    fn advance(&mut self) -> Result<Token, Abort> {
        match self.lookahead.take() {
            Some(tok) => Ok(tok),
            None => self.tokens.next_token(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Scanner;
    use crate::parser::{ParseError, parse};
    use crate::token::Position;

    fn parse_input(input: &str) -> Result<Option<Node>, ParseError> {
        parse(Scanner::from_text(input, "(test)"))
    }

    fn int(line: usize, column: usize, value: i64) -> Node {
        Node::LiteralInt(LiteralInt {
            position: Position::new(line, column),
            value,
        })
    }

    #[test]
    fn semicolons_separate_statements() {
        let tree = parse_input("1; 2;3\n").expect("parse failed");
        let Some(Node::Block(block)) = tree else {
            panic!("expected block");
        };
        assert_eq!(block.statements, vec![int(1, 1, 1), int(1, 4, 2), int(1, 6, 3)]);
    }

    #[test]
    fn parenthesised_expression_unwraps() {
        assert_eq!(parse_input("(7)\n"), Ok(Some(int(1, 2, 7))));
    }

    #[test]
    fn if_elsif_else() {
        let tree = parse_input("if a {\n  1\n} elsif b {\n} else {\n  3\n}\n")
            .expect("parse failed")
            .expect("non-empty");
        let Node::If(stmt) = tree else {
            panic!("expected if");
        };
        assert_eq!(stmt.position, Position::new(1, 1));
        assert_eq!(stmt.branches.len(), 2);
        assert_eq!(stmt.branches[0].body, Some(int(2, 3, 1)));
        assert_eq!(stmt.branches[1].body, None);
        assert_eq!(stmt.otherwise, Some(Box::new(int(5, 3, 3))));
    }

    #[test]
    fn two_expressions_on_one_line_is_rejected() {
        let err = parse_input("1 2\n").unwrap_err();
        assert_eq!(err.to_string(), "(test):1:3: syntax error - 2(LIT_INT)");
    }

    #[test]
    fn missing_close_brace() {
        let err = parse_input("{\n  1\n").unwrap_err();
        let ParseError::Syntax(err) = err else {
            panic!("expected syntax error");
        };
        assert_eq!(err.message, "expected '}'");
        assert_eq!(err.token, "nil(EOF)");
        assert_eq!(err.position, Position::new(3, 1));
    }
}
