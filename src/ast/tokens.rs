use std::fmt;

use num_bigint::BigInt;

use crate::ast::{CommandKind, CompareOp};

/// A location in the query source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Byte offset, starting at 0
    pub offset: usize,
    /// Line number, starting at 1
    pub line: usize,
    /// Column number (in characters), starting at 1
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Position {
            offset,
            line,
            column,
        }
    }

    /// The position of the first character of any input.
    pub fn start() -> Self {
        Position::new(0, 1, 1)
    }

    /// The position just past the last character of `source`.
    pub fn end_of(source: &str) -> Self {
        let mut position = Position::start();
        position.advance_over(source);
        position
    }

    pub(crate) fn advance_over(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset += text.len();
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The class of a lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Command keyword at the start of a pipeline segment
    ///
    /// # Examples
    /// ```text
    /// search a=b
    /// ... | where x<2
    /// ```
    Command(CommandKind),

    /// Unquoted word: field names, values, free-text terms
    ///
    /// Logical keywords (`AND`, `or`, ...) are also words; whether they act as
    /// operators is decided by the parser from context.
    ///
    /// # Examples
    /// ```text
    /// host
    /// web-01
    /// $price
    /// ```
    Word(String),

    /// String enclosed in single or double quotes, delimiters removed
    ///
    /// # Examples
    /// ```text
    /// "hello world!"
    /// 'it "works"'
    /// ```
    Quoted { value: String, delimiter: char },

    /// Run of ASCII digits
    Number(BigInt),

    /// Comparison operator (`=`, `<`, `>`, `<=`, `>=`)
    Compare(CompareOp),

    /// Left parenthesis for grouping
    LParen,

    /// Right parenthesis
    RParen,

    /// Pipeline separator
    Pipe,

    /// Separator between eval bindings and stats aggregations
    Comma,

    /// Run of whitespace
    Whitespace,
}

/// A classified lexical unit with its literal source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }

    /// Byte offset just past the end of this token.
    pub fn end_offset(&self) -> usize {
        self.position.offset + self.text.len()
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace)
    }
}
