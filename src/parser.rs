//! Query parser.
//!
//! Text flows one way: [`tokenize`](crate::lexer::tokenize) produces tokens,
//! the command dispatcher splits them into pipeline segments and routes each
//! segment to its grammar, and the expression engine builds the filter and
//! condition trees.
//!
//! ```
//! use spl_lang::ast::{Command, CompareOp, Expr};
//! use spl_lang::parse_query;
//!
//! let query = parse_query("search a=b").unwrap();
//! assert_eq!(
//!     query.commands,
//!     vec![Command::Search {
//!         filters: vec![Expr::compare(CompareOp::Equal, Expr::bare("a"), Expr::bare("b"))],
//!     }]
//! );
//! ```

mod commands;
mod context;
mod expressions;

pub use context::ParseContext;
pub use expressions::{ExprMode, parse_expression};

use thiserror::Error;

use crate::{
    ast::{Expr, Position, Query},
    lexer::{LexError, tokenize_expression},
};

/// Default bound on nested parentheses and negations.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest allowed nesting of parenthesized groups and NOT chains
    pub max_depth: usize,
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Errors that stop a parse. No partial tree is returned alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("empty query")]
    EmptyQuery { position: Position },

    #[error("empty pipeline segment at {position}")]
    EmptySegment { position: Position },

    #[error("unknown command `{found}` at {position}")]
    UnknownCommand { found: String, position: Position },

    #[error("unexpected `{found}` at {position}")]
    UnexpectedToken { found: String, position: Position },

    #[error("unexpected end of input at {position}, expected {expected}")]
    UnexpectedEnd {
        expected: &'static str,
        position: Position,
    },

    #[error("expected {expected} at {position}, found `{found}`")]
    ExpectedToken {
        expected: &'static str,
        found: String,
        position: Position,
    },

    #[error("expected expression after `{after}` at {position}")]
    ExpectedExpression { after: String, position: Position },

    #[error("nesting deeper than {limit} levels at {position}")]
    NestingTooDeep { limit: usize, position: Position },
}

impl ParseError {
    /// Where parsing stopped.
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(e) => e.position(),
            ParseError::EmptyQuery { position }
            | ParseError::EmptySegment { position }
            | ParseError::UnknownCommand { position, .. }
            | ParseError::UnexpectedToken { position, .. }
            | ParseError::UnexpectedEnd { position, .. }
            | ParseError::ExpectedToken { position, .. }
            | ParseError::ExpectedExpression { position, .. }
            | ParseError::NestingTooDeep { position, .. } => *position,
        }
    }

    /// Formats the error followed by the offending source line and a caret.
    pub fn render(&self, source: &str) -> String {
        let position = self.position();
        let Some(line) = source.lines().nth(position.line.saturating_sub(1)) else {
            return self.to_string();
        };
        let pointer = " ".repeat(position.column.saturating_sub(1)) + "^";
        format!("{}\n{}\n{}", self, line, pointer)
    }
}

/// Parses query text with configurable options.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    source: &'a str,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Parser {
            source,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse a complete pipeline.
    pub fn parse_query(&self) -> Result<Query, ParseError> {
        commands::parse_pipeline(self.source, &self.options)
    }

    /// Parse the whole input as one standalone expression in `mode`.
    ///
    /// Pipes have no special meaning here and command keywords are plain
    /// words; anything left over after the expression is an error.
    pub fn parse_expression(&self, mode: ExprMode) -> Result<Expr, ParseError> {
        let tokens = tokenize_expression(self.source)?;
        let mut ctx = ParseContext::new(
            self.source,
            &tokens,
            Position::end_of(self.source),
            self.options.max_depth,
        );

        let Some(expr) = parse_expression(&mut ctx, mode)? else {
            ctx.skip_whitespace();
            return Err(ctx.expected("expression"));
        };

        ctx.skip_whitespace();
        match ctx.peek() {
            None => Ok(expr),
            Some(token) => Err(ParseError::UnexpectedToken {
                found: token.text.clone(),
                position: token.position,
            }),
        }
    }
}

/// Parses a complete query with default options.
pub fn parse_query(source: &str) -> Result<Query, ParseError> {
    Parser::new(source).parse_query()
}

/// Parses a complete query with the given options.
pub fn parse_query_with(source: &str, options: &ParseOptions) -> Result<Query, ParseError> {
    commands::parse_pipeline(source, options)
}
