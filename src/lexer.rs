use std::fmt;
use std::io::{self, Read};
use std::num::{ParseFloatError, ParseIntError};

use tracing::{debug, trace};

use crate::source::CharacterSource;
use crate::token::{Position, Token, TokenKind, Value};

/// Display name used when scanning in-memory text.
pub const DEFAULT_SOURCE_NAME: &str = "<input>";

/// Why a numeric literal could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumberError {
    /// A zero followed by further digits, such as `01`.
    #[error("leading zeros are not allowed")]
    LeadingZero,
    /// Integer parse failure, usually overflow.
    #[error("{0}")]
    Int(#[from] ParseIntError),
    /// Float parse failure.
    #[error("{0}")]
    Float(#[from] ParseFloatError),
}

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character that cannot start any token.
    InvalidCharacter(char),
    /// End of input before the closing `"`.
    UnterminatedString,
    /// Integer or float literal that fails to parse.
    MalformedNumber { text: String, source: NumberError },
    /// Read failure or invalid UTF-8 in the underlying stream.
    Io { kind: io::ErrorKind, message: String },
    /// Two pushbacks without a read in between.
    DoublePushback,
    /// Pushback of a character that was not the one just read.
    InvalidPushback(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter(ch) => {
                write!(f, "invalid character - '{ch}'")
            }
            Self::UnterminatedString => {
                write!(f, "unterminated string literal")
            }
            Self::MalformedNumber { text, source } => {
                write!(f, "invalid number literal {text:?}: {source}")
            }
            Self::Io { message, .. } => {
                write!(f, "read error: {message}")
            }
            Self::DoublePushback => {
                write!(f, "pushback slot already occupied")
            }
            Self::InvalidPushback(ch) => {
                write!(f, "pushback of {ch:?} does not follow its read")
            }
        }
    }
}

impl From<io::Error> for LexErrorKind {
    fn from(err: io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Error produced during scanning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{source_name}:{}:{}: {kind}", position.line, position.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub source_name: String,
    pub position: Position,
}

/// Scan in-memory text into tokens, ending with a single `Eof`.
///
/// # Errors
///
/// Returns the first `LexError` encountered.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Scanner::from_text(input, DEFAULT_SOURCE_NAME).collect()
}

/// Pull-based tokenizer over a character stream.
///
/// Tokens are produced one per `next_token()` call. Once `Eof` or an
/// error has been returned, every later call returns it again.
pub struct Scanner<R> {
    source: CharacterSource<R>,
    source_name: String,
    last_kind: Option<TokenKind>,
    // Second token of a `)` lookahead that did not form `)->`.
    pending: Option<Token>,
    done: Option<Result<Token, LexError>>,
    drained: bool,
}

impl<'a> Scanner<&'a [u8]> {
    /// Scanner over in-memory text.
    #[must_use]
    pub fn from_text(text: &'a str, source_name: impl Into<String>) -> Self {
        Self::new(text.as_bytes(), source_name)
    }
}

impl<R: Read> Scanner<R> {
    pub fn new(reader: R, source_name: impl Into<String>) -> Self {
        Self {
            source: CharacterSource::new(reader),
            source_name: source_name.into(),
            last_kind: None,
            pending: None,
            done: None,
            drained: false,
        }
    }

    /// Display name used in diagnostics.
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Produce the next token.
    ///
    /// # Errors
    ///
    /// Returns a `LexError` for malformed input or a failing reader.
    /// The error is terminal: later calls return it again.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if let Some(done) = &self.done {
            return done.clone();
        }

        let result = match self.pending.take() {
            Some(tok) => Ok(tok),
            None => self.scan(),
        };

        match &result {
            Ok(tok) => {
                trace!(
                    kind = %tok.kind,
                    line = tok.position.line,
                    column = tok.position.column,
                    "token"
                );
                self.last_kind = Some(tok.kind);
                if tok.kind == TokenKind::Eof {
                    self.done = Some(result.clone());
                }
            }
            Err(err) => {
                debug!(%err, "scan failed");
                self.done = Some(result.clone());
            }
        }
        result
    }

    fn scan(&mut self) -> Result<Token, LexError> {
        loop {
            let start = self.source.position();
            let Some(c) = self.next_char()? else {
                return Ok(Token::new(TokenKind::Eof, Value::None, start));
            };

            match c {
                '\n' => {
                    if let Some(tok) = self.newline(start) {
                        return Ok(tok);
                    }
                }
                '#' => self.comment()?,
                c if c.is_whitespace() => {}
                '"' => return self.string(start),
                '0' => return self.post_zero(start),
                c if c.is_ascii_digit() => return self.number(c, start),
                c if c == '_' || c.is_alphabetic() => return self.symbol(c, start),
                ')' => return self.close_paren(start),
                c => return self.operator(c, start),
            }
        }
    }

    fn newline(&self, at: Position) -> Option<Token> {
        self.last_kind
            .is_some_and(TokenKind::ends_statement)
            .then(|| Token::new(TokenKind::Newline, Value::Text("\n".to_string()), at))
    }

    /// Skip through the end of the line. The closing newline is
    /// consumed with the comment and never terminates a statement.
    fn comment(&mut self) -> Result<(), LexError> {
        while let Some(c) = self.next_char()? {
            if c == '\n' {
                break;
            }
        }
        Ok(())
    }

    fn string(&mut self, start: Position) -> Result<Token, LexError> {
        let mut text = String::new();
        loop {
            match self.next_char()? {
                Some('"') => return Ok(Token::new(TokenKind::Str, Value::Text(text), start)),
                Some('\\') => match self.next_char()? {
                    Some(c) => text.push(unescape(c)),
                    None => break,
                },
                Some(c) => text.push(c),
                None => break,
            }
        }
        Err(self.error(LexErrorKind::UnterminatedString, start))
    }

    fn post_zero(&mut self, start: Position) -> Result<Token, LexError> {
        match self.next_char()? {
            Some('.') => self.float(String::from("0"), start),
            Some(c) if c.is_ascii_digit() => {
                let mut text = String::from('0');
                text.push(c);
                self.digits(&mut text)?;
                Err(self.malformed(text, NumberError::LeadingZero, start))
            }
            Some(c) => {
                self.push_back(c)?;
                Ok(Token::new(TokenKind::Int, Value::Int(0), start))
            }
            None => Ok(Token::new(TokenKind::Int, Value::Int(0), start)),
        }
    }

    fn number(&mut self, first: char, start: Position) -> Result<Token, LexError> {
        let mut text = String::from(first);
        match self.digits(&mut text)? {
            Some('.') => return self.float(text, start),
            Some(c) => self.push_back(c)?,
            None => {}
        }
        match text.parse::<i64>() {
            Ok(v) => Ok(Token::new(TokenKind::Int, Value::Int(v), start)),
            Err(e) => Err(self.malformed(text, e.into(), start)),
        }
    }

    fn float(&mut self, mut text: String, start: Position) -> Result<Token, LexError> {
        text.push('.');
        if let Some(c) = self.digits(&mut text)? {
            self.push_back(c)?;
        }
        match text.parse::<f64>() {
            Ok(v) => Ok(Token::new(TokenKind::Float, Value::Float(v), start)),
            Err(e) => Err(self.malformed(text, e.into(), start)),
        }
    }

    /// Append consecutive ASCII digits to `text`. Returns the first
    /// character that was not a digit, already consumed.
    fn digits(&mut self, text: &mut String) -> Result<Option<char>, LexError> {
        loop {
            match self.next_char()? {
                Some(c) if c.is_ascii_digit() => text.push(c),
                other => return Ok(other),
            }
        }
    }

    fn symbol(&mut self, first: char, start: Position) -> Result<Token, LexError> {
        let mut text = String::from(first);
        loop {
            match self.next_char()? {
                Some(c) if c == '_' || c.is_alphanumeric() => text.push(c),
                Some(c) => {
                    self.push_back(c)?;
                    break;
                }
                None => break,
            }
        }
        let kind = keyword(&text).unwrap_or(TokenKind::Symbol);
        Ok(Token::new(kind, Value::Text(text), start))
    }

    /// `)` optionally fused with a following `->`.
    fn close_paren(&mut self, start: Position) -> Result<Token, LexError> {
        let paren = Token::new(TokenKind::RParen, Value::Text(")".to_string()), start);
        loop {
            let at = self.source.position();
            match self.next_char()? {
                Some(c) if c != '\n' && c.is_whitespace() => {}
                Some('-') => {
                    match self.next_char()? {
                        Some('>') => {
                            return Ok(Token::new(
                                TokenKind::RParenArrow,
                                Value::Text(")->".to_string()),
                                start,
                            ));
                        }
                        Some(c) => self.push_back(c)?,
                        None => {}
                    }
                    self.pending = Some(self.operator('-', at)?);
                    return Ok(paren);
                }
                Some(c) => {
                    self.push_back(c)?;
                    return Ok(paren);
                }
                None => return Ok(paren),
            }
        }
    }

    /// Longest match against the operator table.
    fn operator(&mut self, first: char, start: Position) -> Result<Token, LexError> {
        let mut text = String::from(first);
        while let Some(c) = self.next_char()? {
            text.push(c);
            if operator(&text).is_none() {
                text.pop();
                self.push_back(c)?;
                break;
            }
        }
        match operator(&text) {
            Some(kind) => Ok(Token::new(kind, Value::Text(text), start)),
            None => Err(self.error(LexErrorKind::InvalidCharacter(first), start)),
        }
    }

    fn next_char(&mut self) -> Result<Option<char>, LexError> {
        self.source
            .next_char()
            .map_err(|kind| self.error(kind, self.source.position()))
    }

    fn push_back(&mut self, c: char) -> Result<(), LexError> {
        self.source
            .push_back(c)
            .map_err(|kind| self.error(kind, self.source.position()))
    }

    fn malformed(&self, text: String, source: NumberError, at: Position) -> LexError {
        self.error(LexErrorKind::MalformedNumber { text, source }, at)
    }

    fn error(&self, kind: LexErrorKind, position: Position) -> LexError {
        LexError {
            kind,
            source_name: self.source_name.clone(),
            position,
        }
    }
}

impl<R: Read> Iterator for Scanner<R> {
    type Item = Result<Token, LexError>;

    /// Yields every token through `Eof` (or the first error), then
    /// `None`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.drained {
            return None;
        }
        let item = self.next_token();
        self.drained = self.done.is_some();
        Some(item)
    }
}

const fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        other => other,
    }
}

fn keyword(text: &str) -> Option<TokenKind> {
    match text {
        "if" => Some(TokenKind::If),
        "elsif" => Some(TokenKind::Elsif),
        "else" => Some(TokenKind::Else),
        "while" => Some(TokenKind::While),
        _ => None,
    }
}

fn operator(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "(" => TokenKind::LParen,
        ")" => TokenKind::RParen,
        "[" => TokenKind::LBracket,
        "]" => TokenKind::RBracket,
        "{" => TokenKind::LBrace,
        "}" => TokenKind::RBrace,
        "." => TokenKind::Dot,
        "," => TokenKind::Comma,
        "=" => TokenKind::Assign,
        ":" => TokenKind::Colon,
        ";" => TokenKind::Semicolon,
        "!" => TokenKind::Not,
        "+" => TokenKind::Add,
        "-" => TokenKind::Sub,
        "*" => TokenKind::Mul,
        "/" => TokenKind::Div,
        "%" => TokenKind::Mod,
        "==" => TokenKind::Eq,
        "!=" => TokenKind::Ne,
        ">" => TokenKind::Gt,
        ">=" => TokenKind::Ge,
        "<" => TokenKind::Lt,
        "<=" => TokenKind::Le,
        "+=" => TokenKind::AddAssign,
        "-=" => TokenKind::SubAssign,
        "*=" => TokenKind::MulAssign,
        "/=" => TokenKind::DivAssign,
        "%=" => TokenKind::ModAssign,
        "&&" => TokenKind::AndAnd,
        "||" => TokenKind::OrOr,
        "->" => TokenKind::Arrow,
        _ => return None,
    };
    Some(kind)
}
