//! Parser bridge and built-in grammar: tree shapes, block collapsing,
//! and error reporting.

mod common;

use common::{TEST_SOURCE, int};
use sigo::{
    Abort, Block, GrammarEngine, LexErrorKind, Node, ParseError, Position, Scanner, TokenKind,
    TokenStream, While, parse, parse_reader, parse_str, parse_with,
};

fn parse_input(input: &str) -> Result<Option<Node>, ParseError> {
    parse(Scanner::from_text(input, TEST_SOURCE))
}

fn block(statements: Vec<Node>) -> Node {
    Node::Block(Block { statements })
}

// -----------------------------------------------------------
// Tree shapes.
// -----------------------------------------------------------

#[test]
fn int_literal_statement() {
    assert_eq!(parse_input("123\n"), Ok(Some(int(1, 1, 123))));
}

#[test]
fn several_statements() {
    assert_eq!(
        parse_input("123\n456\n"),
        Ok(Some(block(vec![int(1, 1, 123), int(2, 1, 456)])))
    );
}

#[test]
fn empty_source() {
    assert_eq!(parse_input("\n"), Ok(None));
    assert_eq!(parse_input(""), Ok(None));
    assert_eq!(parse_input("# only a comment\n"), Ok(None));
}

#[test]
fn empty_block_one_line() {
    assert_eq!(parse_input("{}\n"), Ok(None));
}

#[test]
fn empty_block_two_lines() {
    assert_eq!(parse_input("{\n}\n"), Ok(None));
}

#[test]
fn one_line_block_is_unwrapped() {
    assert_eq!(parse_input("{ 123 }\n"), Ok(Some(int(1, 3, 123))));
}

#[test]
fn block_of_several_statements() {
    let src = "\n{\n  123\n  456\n}\n";
    assert_eq!(
        parse_input(src),
        Ok(Some(block(vec![int(3, 3, 123), int(4, 3, 456)])))
    );
}

#[test]
fn block_with_statements_on_brace_lines() {
    let src = "\n{ 123\n  456 }\n";
    assert_eq!(
        parse_input(src),
        Ok(Some(block(vec![int(2, 3, 123), int(3, 3, 456)])))
    );
}

#[test]
fn nested_empty_blocks_vanish() {
    assert_eq!(parse_input("{ {} }\n1\n{\n{\n}\n}\n"), Ok(Some(int(2, 1, 1))));
}

#[test]
fn while_statement() {
    let src = "\nwhile 100 {\n  200\n}\n";
    assert_eq!(
        parse_input(src),
        Ok(Some(Node::While(While {
            position: Position::new(2, 1),
            condition: Box::new(int(2, 7, 100)),
            body: Some(Box::new(int(3, 3, 200))),
        })))
    );
}

#[test]
fn while_with_empty_body() {
    let Ok(Some(Node::While(w))) = parse_input("while x {\n}\n") else {
        panic!("expected while");
    };
    assert_eq!(w.body, None);
}

#[test]
fn while_body_with_two_statements() {
    let Ok(Some(Node::While(w))) = parse_input("while 1 {\n  2\n  3\n}\n") else {
        panic!("expected while");
    };
    assert_eq!(
        w.body,
        Some(Box::new(block(vec![int(2, 3, 2), int(3, 3, 3)])))
    );
}

#[test]
fn parse_str_uses_default_name() {
    let err = parse_str("1 1").unwrap_err();
    assert!(err.to_string().starts_with("<input>:1:3:"));
}

#[test]
fn parse_reader_names_source() {
    let err = parse_reader("{\n".as_bytes(), "prog.sg").unwrap_err();
    assert_eq!(err.source_name(), "prog.sg");
    assert_eq!(err.position(), Position::new(2, 1));
}

// -----------------------------------------------------------
// Errors.
// -----------------------------------------------------------

#[test]
fn syntax_error_reports_last_consumed_token() {
    let err = parse_input("while 1 2\n").unwrap_err();
    let ParseError::Syntax(err) = err else {
        panic!("expected syntax error, got {err:?}");
    };
    assert_eq!(err.message, "expected '{'");
    assert_eq!(err.position, Position::new(1, 9));
    assert_eq!(err.token, "2(LIT_INT)");
    assert_eq!(
        err.to_string(),
        "(test):1:9: expected '{' - 2(LIT_INT)"
    );
}

#[test]
fn stray_close_brace() {
    let err = parse_input("1\n}\n").unwrap_err();
    let ParseError::Syntax(err) = err else {
        panic!("expected syntax error");
    };
    assert_eq!(err.position, Position::new(2, 1));
    assert_eq!(err.token, "\"}\"(RC)");
}

#[test]
fn lex_error_wins() {
    let err = parse_input("1\n\"unterminated\n").unwrap_err();
    let ParseError::Lex(err) = err else {
        panic!("expected lex error");
    };
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.position, Position::new(2, 1));
}

#[test]
fn lex_error_mid_expression() {
    let err = parse_input("while 01 {}\n").unwrap_err();
    assert!(matches!(err, ParseError::Lex(_)));
    assert_eq!(err.position(), Position::new(1, 7));
}

#[test]
fn trailing_comment_does_not_end_statement() {
    let err = parse_input("1 # c\n2\n").unwrap_err();
    let ParseError::Syntax(err) = err else {
        panic!("expected syntax error");
    };
    assert_eq!(err.position, Position::new(2, 1));
    assert_eq!(err.token, "2(LIT_INT)");
}

#[test]
fn keyword_in_expression_position() {
    let err = parse_input("while else {}\n").unwrap_err();
    assert!(err.to_string().ends_with("syntax error - \"else\"(KW_ELSE)"));
}

// -----------------------------------------------------------
// Custom engines through the bridge.
// -----------------------------------------------------------

/// Records every token kind it is given.
#[derive(Default)]
struct Recorder {
    seen: Vec<TokenKind>,
}

impl GrammarEngine for Recorder {
    fn run(&mut self, tokens: &mut dyn TokenStream) -> Result<Option<Node>, Abort> {
        loop {
            let tok = tokens.next_token()?;
            self.seen.push(tok.kind);
            if tok.kind == TokenKind::Eof {
                return Ok(None);
            }
        }
    }
}

#[test]
fn bridge_pulls_tokens_in_order() {
    let mut engine = Recorder::default();
    parse_with(Scanner::from_text("x = 1\n", TEST_SOURCE), &mut engine).expect("parse");
    assert_eq!(
        engine.seen,
        [
            TokenKind::Symbol,
            TokenKind::Assign,
            TokenKind::Int,
            TokenKind::Newline,
            TokenKind::Eof
        ]
    );
}

#[test]
fn bridge_stops_pulling_after_lex_error() {
    let mut engine = Recorder::default();
    let err = parse_with(Scanner::from_text("a b ~ c d\n", TEST_SOURCE), &mut engine)
        .unwrap_err();
    assert!(matches!(err, ParseError::Lex(_)));
    assert_eq!(engine.seen, [TokenKind::Symbol, TokenKind::Symbol]);
}

/// Keeps pulling after an abort and then reports its own error.
struct Stubborn {
    pulls_after_abort: usize,
}

impl GrammarEngine for Stubborn {
    fn run(&mut self, tokens: &mut dyn TokenStream) -> Result<Option<Node>, Abort> {
        while tokens.next_token().is_ok() {}
        for _ in 0..3 {
            if tokens.next_token().is_err() {
                self.pulls_after_abort += 1;
            }
        }
        Err(tokens.error("grammar complaint"))
    }
}

#[test]
fn lex_error_preempts_later_grammar_error() {
    let mut engine = Stubborn {
        pulls_after_abort: 0,
    };
    let err = parse_with(Scanner::from_text("1 `", TEST_SOURCE), &mut engine).unwrap_err();
    assert_eq!(engine.pulls_after_abort, 3);
    let ParseError::Lex(err) = err else {
        panic!("expected lex error");
    };
    assert_eq!(err.kind, LexErrorKind::InvalidCharacter('`'));
}

/// Accepts without pulling anything.
struct Lazy;

impl GrammarEngine for Lazy {
    fn run(&mut self, _tokens: &mut dyn TokenStream) -> Result<Option<Node>, Abort> {
        Ok(None)
    }
}

#[test]
fn engine_must_reach_eof() {
    assert_eq!(parse_with(Scanner::from_text("\n", TEST_SOURCE), &mut Lazy), Ok(None));

    let err = parse_with(Scanner::from_text("x\n", TEST_SOURCE), &mut Lazy).unwrap_err();
    let ParseError::Syntax(err) = err else {
        panic!("expected syntax error");
    };
    assert_eq!(err.message, "unexpected trailing input");
    assert_eq!(err.token, "\"x\"(SYMBOL)");
}
