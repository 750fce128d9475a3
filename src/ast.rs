use crate::token::Position;

/// A syntax tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Block(Block),
    LiteralInt(LiteralInt),
    LiteralFloat(LiteralFloat),
    LiteralString(LiteralString),
    Symbol(Symbol),
    While(While),
    If(If),
}

/// Two or more statements in source order.
///
/// Built only through [`finish_block`], which never wraps a single
/// statement and never produces an empty block.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Node>,
}

/// Integer literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralInt {
    pub position: Position,
    pub value: i64,
}

/// Float literal.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralFloat {
    pub position: Position,
    pub value: f64,
}

/// String literal with escapes already decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralString {
    pub position: Position,
    pub value: String,
}

/// Identifier reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub position: Position,
    pub name: String,
}

/// `while condition { body }`. An empty body is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub position: Position,
    pub condition: Box<Node>,
    pub body: Option<Box<Node>>,
}

/// `if` with any number of `elsif` arms and an optional `else`.
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub position: Position,
    pub branches: Vec<Branch>,
    pub otherwise: Option<Box<Node>>,
}

/// One `if`/`elsif` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub condition: Node,
    pub body: Option<Node>,
}

impl Node {
    /// Position of the node's first token. A block takes the position
    /// of its first statement.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::Block(b) => b
                .statements
                .first()
                .map_or_else(Position::default, Self::position),
            Self::LiteralInt(n) => n.position,
            Self::LiteralFloat(n) => n.position,
            Self::LiteralString(n) => n.position,
            Self::Symbol(n) => n.position,
            Self::While(n) => n.position,
            Self::If(n) => n.position,
        }
    }
}

/// Append a statement to a statement list. Empty statements are
/// dropped.
pub fn append_statement(statements: &mut Vec<Node>, statement: Option<Node>) {
    statements.extend(statement);
}

/// Collapse a statement list: none becomes `None`, one stays
/// unwrapped, more become a `Block`.
#[must_use]
pub fn finish_block(mut statements: Vec<Node>) -> Option<Node> {
    match statements.len() {
        0 => None,
        1 => statements.pop(),
        _ => Some(Node::Block(Block { statements })),
    }
}
