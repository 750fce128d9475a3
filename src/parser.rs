use std::io::Read;

use tracing::debug;

use crate::ast::Node;
use crate::grammar::StatementGrammar;
use crate::lexer::{LexError, Scanner};
use crate::token::{Position, Token, TokenKind};

/// Token sequence the grammar could not reduce.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{source_name}:{}:{}: {message} - {token}", position.line, position.column)]
pub struct SyntaxError {
    pub message: String,
    pub source_name: String,
    /// Position of the last token consumed before the error.
    pub position: Position,
    /// That token rendered as `value(KIND)`.
    pub token: String,
}

/// Outcome of a failed parse: exactly one located error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The scanner rejected the input.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// The grammar rejected the token sequence.
    #[error("{0}")]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Lex(e) => e.position,
            Self::Syntax(e) => e.position,
        }
    }

    #[must_use]
    pub fn source_name(&self) -> &str {
        match self {
            Self::Lex(e) => &e.source_name,
            Self::Syntax(e) => &e.source_name,
        }
    }
}

/// Marker that the current parse has been aborted.
///
/// Only a [`TokenStream`] can hand one out, and by then the error
/// has been recorded. Engines propagate it with `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Abort(());

/// Token supply handed to a grammar engine.
pub trait TokenStream {
    /// Pull the next terminal.
    ///
    /// # Errors
    ///
    /// Returns `Abort` once the scanner has failed or an error has
    /// been reported.
    fn next_token(&mut self) -> Result<Token, Abort>;

    /// Reject the most recently pulled token.
    fn error(&mut self, message: &str) -> Abort;
}

/// A reduction engine that turns terminals into a tree.
pub trait GrammarEngine {
    /// Consume tokens through `Eof` and reduce them to one tree, or
    /// `None` for input with no statements.
    ///
    /// # Errors
    ///
    /// Returns `Abort` obtained from `tokens`.
    fn run(&mut self, tokens: &mut dyn TokenStream) -> Result<Option<Node>, Abort>;
}

/// Parse with the built-in statement grammar.
///
/// # Errors
///
/// Returns the first lexical or syntax error.
pub fn parse<R: Read>(scanner: Scanner<R>) -> Result<Option<Node>, ParseError> {
    parse_with(scanner, &mut StatementGrammar)
}

/// Parse with a caller-supplied grammar engine.
///
/// # Errors
///
/// Returns the first lexical or syntax error.
pub fn parse_with<R: Read, G: GrammarEngine + ?Sized>(
    scanner: Scanner<R>,
    engine: &mut G,
) -> Result<Option<Node>, ParseError> {
    ParserBridge::new(scanner).parse(engine)
}

/// Feeds scanner output to a grammar engine and turns the first
/// failure into a single `ParseError`.
pub struct ParserBridge<R> {
    scanner: Scanner<R>,
    current: Option<Token>,
    error: Option<ParseError>,
}

impl<R: Read> ParserBridge<R> {
    #[must_use]
    pub const fn new(scanner: Scanner<R>) -> Self {
        Self {
            scanner,
            current: None,
            error: None,
        }
    }

    /// Run `engine` to completion over this bridge's tokens.
    ///
    /// # Errors
    ///
    /// Returns the first lexical or syntax error, or a syntax error if
    /// the engine stopped before `Eof`.
    pub fn parse<G: GrammarEngine + ?Sized>(
        mut self,
        engine: &mut G,
    ) -> Result<Option<Node>, ParseError> {
        debug!(source = %self.scanner.source_name(), "parse started");

        let tree = engine
            .run(&mut self)
            .and_then(|tree| self.expect_eof().map(|()| tree));

        match (tree, self.error.take()) {
            (_, Some(err)) => {
                debug!(%err, "parse aborted");
                Err(err)
            }
            (Ok(tree), None) => {
                debug!("parse finished");
                Ok(tree)
            }
            // An `Abort` that did not come from this bridge.
            (Err(_), None) => Err(self.syntax_error("parse aborted").into()),
        }
    }

    fn expect_eof(&mut self) -> Result<(), Abort> {
        if self.current.is_none() {
            self.next_token()?;
        }
        match &self.current {
            Some(tok) if tok.kind == TokenKind::Eof => Ok(()),
            _ => Err(self.error("unexpected trailing input")),
        }
    }

    fn syntax_error(&self, message: &str) -> SyntaxError {
        SyntaxError {
            message: message.to_string(),
            source_name: self.scanner.source_name().to_string(),
            position: self
                .current
                .as_ref()
                .map_or_else(Position::default, |t| t.position),
            token: self
                .current
                .as_ref()
                .map_or_else(|| "nil".to_string(), Token::describe),
        }
    }
}

impl<R: Read> TokenStream for ParserBridge<R> {
    fn next_token(&mut self) -> Result<Token, Abort> {
        if self.error.is_some() {
            return Err(Abort(()));
        }
        match self.scanner.next_token() {
            Ok(tok) => {
                self.current = Some(tok.clone());
                Ok(tok)
            }
            Err(err) => {
                self.error = Some(err.into());
                Err(Abort(()))
            }
        }
    }

    fn error(&mut self, message: &str) -> Abort {
        // A recorded scanner error wins over grammar feedback.
        if self.error.is_none() {
            self.error = Some(self.syntax_error(message).into());
        }
        Abort(())
    }
}
