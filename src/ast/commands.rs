use serde::{Deserialize, Serialize};

use crate::ast::Expr;

/// Pipeline command.
///
/// A pipeline consists of a sequence of commands separated by `|`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum Command {
    /// Full-text search
    ///
    /// Each filter is an independent constraint; juxtaposition never means AND.
    ///
    /// # Example
    /// ```text
    /// search error host=web-01 NOT status=200
    /// ```
    Search { filters: Vec<Expr> },

    /// Computed condition
    ///
    /// # Example
    /// ```text
    /// where bytes > 1024 and status=500
    /// ```
    Where { condition: Expr },

    /// Aggregation
    ///
    /// The aggregation list is kept opaque; it may be empty.
    ///
    /// # Example
    /// ```text
    /// stats count, sum(bytes) by host
    /// ```
    Stats { aggregations: Vec<Aggregation> },

    /// Field assignment
    ///
    /// # Example
    /// ```text
    /// eval slow = duration > 500, label = "checked"
    /// ```
    Eval { bindings: Vec<Binding> },
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Search { .. } => CommandKind::Search,
            Command::Where { .. } => CommandKind::Where,
            Command::Stats { .. } => CommandKind::Stats,
            Command::Eval { .. } => CommandKind::Eval,
        }
    }
}

/// The keyword that introduces a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Search,
    Where,
    Stats,
    Eval,
}

impl CommandKind {
    /// Recognizes a command keyword, ignoring ASCII case.
    pub fn from_keyword(word: &str) -> Option<Self> {
        [
            CommandKind::Search,
            CommandKind::Where,
            CommandKind::Stats,
            CommandKind::Eval,
        ]
        .into_iter()
        .find(|kind| word.eq_ignore_ascii_case(kind.keyword()))
    }

    pub fn keyword(self) -> &'static str {
        match self {
            CommandKind::Search => "search",
            CommandKind::Where => "where",
            CommandKind::Stats => "stats",
            CommandKind::Eval => "eval",
        }
    }
}

/// One `name = expression` assignment of an eval command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub name: String,
    pub value: Expr,
}

impl Binding {
    pub fn new(name: impl Into<String>, value: Expr) -> Self {
        Binding {
            name: name.into(),
            value,
        }
    }
}

/// Opaque aggregation descriptor: the trimmed source text of one
/// comma-separated item after `stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregation {
    pub text: String,
}

impl Aggregation {
    pub fn new(text: impl Into<String>) -> Self {
        Aggregation { text: text.into() }
    }
}
