//! Plug a custom grammar engine into the parser bridge.
//!
//! This engine accepts a flat list of integers separated by commas
//! and statement terminators, and returns them as one block.

use sigo::{
    Abort, Block, GrammarEngine, LiteralInt, Node, Scanner, TokenKind, TokenStream, Value,
    parse_with,
};

struct IntList;

impl GrammarEngine for IntList {
    fn run(&mut self, tokens: &mut dyn TokenStream) -> Result<Option<Node>, Abort> {
        let mut statements = Vec::new();
        loop {
            let tok = tokens.next_token()?;
            match (tok.kind, tok.value) {
                (TokenKind::Eof, _) => break,
                (TokenKind::Comma | TokenKind::Newline, _) => {}
                (TokenKind::Int, Value::Int(value)) => {
                    statements.push(Node::LiteralInt(LiteralInt {
                        position: tok.position,
                        value,
                    }));
                }
                _ => return Err(tokens.error("expected an integer")),
            }
        }
        Ok(Some(Node::Block(Block { statements })))
    }
}

fn main() {
    for source in ["1, 2,\n3\n", "1, x\n"] {
        match parse_with(Scanner::from_text(source, "list.sg"), &mut IntList) {
            Ok(tree) => print!("{}", sigo::format(tree.as_ref())),
            Err(e) => println!("{e}"),
        }
    }
}
