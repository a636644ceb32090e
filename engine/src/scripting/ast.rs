//! Data model shared by the tokenizer, parser and interpreter

use std::fmt;

/// Classification of a lexical unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    /// Reserved word (only `fun` today)
    Keyword,
    /// Text between two `"`; the token text excludes the quotes
    StringLiteral,
    /// A `"` with no closing quote before end of input
    UnterminatedString,
    NumberLiteral,
    Dot,
    Assign,
    PlusAssign,
    Semicolon,
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    /// Any other single character, kept so the parser can point at it
    Unknown,
}

/// A classified lexical unit with its source line
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    /// True if this is an identifier spelled exactly `name`
    pub fn is_ident(&self, name: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == name
    }

    pub fn is_keyword(&self, name: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == name
    }
}

/// Bindable numeric host fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    PositionX,
    PositionY,
    PositionZ,
}

impl FieldPath {
    /// Resolve the component name that follows `Camera.position.`
    pub fn from_component(component: &str) -> Option<Self> {
        match component {
            "x" => Some(FieldPath::PositionX),
            "y" => Some(FieldPath::PositionY),
            "z" => Some(FieldPath::PositionZ),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldPath::PositionX => "position.x",
            FieldPath::PositionY => "position.y",
            FieldPath::PositionZ => "position.z",
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One executable statement of a lifecycle function
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `Debug.Log("message");`
    Log { message: String },
    /// `Camera.position.<c> = value;`
    FieldAssign { target: FieldPath, value: f32 },
    /// `Camera.position.<c> += value;`
    FieldIncrement { target: FieldPath, value: f32 },
}

/// Parsed body of a lifecycle function, statements in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionBlock {
    pub statements: Vec<Statement>,
}

impl FunctionBlock {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }
}

/// The two fixed script entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Start,
    Update,
}

impl Lifecycle {
    /// Function name as written in script source
    pub fn function_name(&self) -> &'static str {
        match self {
            Lifecycle::Start => "Start",
            Lifecycle::Update => "Update",
        }
    }

    /// Prefix for `Debug.Log` output emitted from this phase
    pub fn log_prefix(&self) -> &'static str {
        match self {
            Lifecycle::Start => "[Script] ",
            Lifecycle::Update => "[Script-Update] ",
        }
    }
}
