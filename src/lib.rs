//! Scanner and parser front end for the sigo scripting language.
//!
//! Source text is pulled one character at a time, classified into
//! tokens on demand, and fed to a grammar engine that builds the tree.
//! Newlines only terminate a statement after a token that could end
//! one, so expressions may continue across lines after an operator,
//! keyword, or opening delimiter.
//!
//! # Quick start
//!
//! ## Tokenize
//!
//! ```
//! use sigo::{TokenKind, tokenize};
//!
//! let tokens = tokenize("x += 1\n").unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [TokenKind::Symbol, TokenKind::AddAssign, TokenKind::Int, TokenKind::Newline, TokenKind::Eof]
//! );
//! ```
//!
//! ## Parse
//!
//! ```
//! use sigo::{Node, parse_str};
//!
//! let tree = parse_str("while running {\n\tstep\n}\n").unwrap();
//! assert!(matches!(tree, Some(Node::While(_))));
//!
//! // Empty blocks collapse to nothing.
//! assert_eq!(parse_str("{}\n").unwrap(), None);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod formatter;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod source;
pub mod token;

use std::io::Read;

pub use ast::{Block, Branch, If, LiteralFloat, LiteralInt, LiteralString, Node, Symbol, While};
pub use formatter::format;
pub use grammar::StatementGrammar;
pub use lexer::{DEFAULT_SOURCE_NAME, LexError, LexErrorKind, NumberError, Scanner, tokenize};
pub use parser::{
    Abort, GrammarEngine, ParseError, ParserBridge, SyntaxError, TokenStream, parse, parse_with,
};
pub use source::CharacterSource;
pub use token::{Position, Token, TokenKind, Value};

/// Scan and parse in-memory text in one step.
///
/// Returns `Ok(None)` when the text holds no statements.
pub fn parse_str(input: &str) -> Result<Option<Node>, ParseError> {
    parse(Scanner::from_text(input, DEFAULT_SOURCE_NAME))
}

/// Scan and parse a byte stream, naming it `source_name` in
/// diagnostics.
pub fn parse_reader<R: Read>(
    reader: R,
    source_name: impl Into<String>,
) -> Result<Option<Node>, ParseError> {
    parse(Scanner::new(reader, source_name))
}
