//! Parse, validate and format queries

use tracing::debug;

use super::CliError;
use crate::{ParseOptions, Parser, to_json, to_json_pretty};

/// What to produce from a successfully parsed query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckMode {
    /// JSON tree
    #[default]
    Tree,
    /// Only validate syntax
    SyntaxOnly,
    /// Canonical query text
    Format,
}

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query text
    pub query: String,
    /// What to output
    pub mode: CheckMode,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Parser configuration
    pub parse: ParseOptions,
}

/// Result of a check operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Serialized JSON tree
    Tree(String),
    /// Canonical query text
    Formatted(String),
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let query = Parser::new(&options.query)
        .with_options(options.parse)
        .parse_query()
        .map_err(|e| CliError::parse(e, &options.query))?;

    debug!(commands = query.commands.len(), mode = ?options.mode, "query parsed");

    match options.mode {
        CheckMode::SyntaxOnly => Ok(CheckResult::SyntaxValid),
        CheckMode::Format => Ok(CheckResult::Formatted(query.to_string())),
        CheckMode::Tree => {
            let json = if options.pretty {
                to_json_pretty(&query)
            } else {
                to_json(&query)
            }?;
            Ok(CheckResult::Tree(json))
        }
    }
}
