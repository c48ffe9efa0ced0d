//! CLI support for spl-lang
//!
//! Provides programmatic access to the spl CLI functionality so other tools
//! can embed it without spawning the binary.

mod check;
mod docs;

pub use check::{CheckMode, CheckOptions, CheckResult, execute_check};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Parser error, with the rendered source pointer
    #[error("Parse error: {rendered}")]
    Parse {
        rendered: String,
        #[source]
        source: crate::ParseError,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No query provided
    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'spl docs' to see available categories.")]
    UnknownCategory(String),
}

impl CliError {
    pub fn parse(source: crate::ParseError, query: &str) -> Self {
        CliError::Parse {
            rendered: source.render(query),
            source,
        }
    }
}
