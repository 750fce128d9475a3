use std::fmt;

/// Source location for error reporting.
///
/// Both fields are 1-based. The column counts characters since the
/// last newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Token kinds produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input. Repeats forever once reached.
    Eof,
    /// Significant newline acting as a statement terminator.
    Newline,
    /// Integer literal.
    Int,
    /// Float literal.
    Float,
    /// Double-quoted string literal.
    Str,
    /// Identifier that is not a keyword.
    Symbol,

    /// `if`
    If,
    /// `elsif`
    Elsif,
    /// `else`
    Else,
    /// `while`
    While,

    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `)` followed by `->`, possibly with blanks in between.
    RParenArrow,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `=`
    Assign,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `!`
    Not,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// `%=`
    ModAssign,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `->`
    Arrow,
}

impl TokenKind {
    /// Upper-case terminal name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::Newline => "NL",
            Self::Int => "LIT_INT",
            Self::Float => "LIT_FLOAT",
            Self::Str => "LIT_STRING",
            Self::Symbol => "SYMBOL",
            Self::If => "KW_IF",
            Self::Elsif => "KW_ELSIF",
            Self::Else => "KW_ELSE",
            Self::While => "KW_WHILE",
            Self::LParen => "LP",
            Self::RParen => "RP",
            Self::RParenArrow => "RP_ARROW",
            Self::LBracket => "LB",
            Self::RBracket => "RB",
            Self::LBrace => "LC",
            Self::RBrace => "RC",
            Self::Dot => "DOT",
            Self::Comma => "COMMA",
            Self::Assign => "ASSIGN",
            Self::Colon => "COLON",
            Self::Semicolon => "SEMICOLON",
            Self::Not => "NOT",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Mod => "MOD",
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Gt => "GT",
            Self::Ge => "GE",
            Self::Lt => "LT",
            Self::Le => "LE",
            Self::AddAssign => "ADD_A",
            Self::SubAssign => "SUB_A",
            Self::MulAssign => "MUL_A",
            Self::DivAssign => "DIV_A",
            Self::ModAssign => "MOD_A",
            Self::AndAnd => "DAND",
            Self::OrOr => "DOR",
            Self::Arrow => "ARROW",
        }
    }

    /// Whether a newline right after a token of this kind ends the
    /// statement.
    #[must_use]
    pub const fn ends_statement(self) -> bool {
        matches!(
            self,
            Self::RParen
                | Self::RBracket
                | Self::RBrace
                | Self::Int
                | Self::Float
                | Self::Str
                | Self::Symbol
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic payload carried by a token.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No payload (end of input).
    None,
    /// Decoded integer literal.
    Int(i64),
    /// Decoded float literal.
    Float(f64),
    /// Identifier, keyword, operator, newline, or decoded string text.
    Text(String),
}

impl Value {
    /// Return the text payload, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("nil"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// A single token with its kind, value, and source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Value,
    pub position: Position,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, value: Value, position: Position) -> Self {
        Self {
            kind,
            value,
            position,
        }
    }

    /// Render as `value(KIND)` for diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{}({})", self.value, self.kind)
    }
}
