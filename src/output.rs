//! Rendering parsed queries back out.
//!
//! Two renderings are provided:
//!
//! - **Canonical text** via [`Display`](std::fmt::Display) on [`Query`],
//!   [`Command`] and [`Expr`]. Re-parsing the canonical text of any parsed
//!   query yields an equal tree. Redundant parentheses are dropped and
//!   implicit searches gain their `search` keyword.
//! - **JSON** via [`to_json()`] and [`to_json_pretty()`], the stable wire shape
//!   consumed by evaluators and tooling.
//!
//! # Examples
//!
//! ```
//! use spl_lang::parse_query;
//!
//! let query = parse_query("a<b   AND (c=d)").unwrap();
//! assert_eq!(query.to_string(), "search a<b AND c=d");
//! ```

use std::fmt;

use crate::ast::{Casing, Command, Expr, Keyword, Query};

// Binding strength used to decide where parentheses are required.
const OR: u8 = 1;
const AND: u8 = 2;
const NOT: u8 = 3;
const COMPARISON: u8 = 4;
const PRIMARY: u8 = 5;

impl Expr {
    fn binding_strength(&self) -> u8 {
        match self {
            Expr::String { .. } | Expr::Number { .. } => PRIMARY,
            Expr::Comparison { .. } => COMPARISON,
            Expr::Not { .. } | Expr::LowerNot { .. } => NOT,
            Expr::And { .. } | Expr::LowerAnd { .. } => AND,
            Expr::Or { .. } | Expr::LowerOr { .. } => OR,
        }
    }
}

/// Writes `expr`, parenthesized when it binds looser than `min`.
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, min: u8) -> fmt::Result {
    if expr.binding_strength() < min {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

fn write_binary(
    f: &mut fmt::Formatter<'_>,
    keyword: Keyword,
    casing: Casing,
    strength: u8,
    left: &Expr,
    right: &Expr,
) -> fmt::Result {
    write_operand(f, left, strength)?;
    write!(f, " {} ", keyword.spelling(casing))?;
    // Left-associative: an equal-strength right operand needs parentheses.
    write_operand(f, right, strength + 1)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::String {
                value,
                quoted: false,
            } => f.write_str(value),
            Expr::String {
                value,
                quoted: true,
            } => {
                // Contents are never escaped, so pick a delimiter they lack.
                let delimiter = if value.contains('"') { '\'' } else { '"' };
                write!(f, "{delimiter}{value}{delimiter}")
            }
            Expr::Number { value } => write!(f, "{}", value),
            Expr::Comparison { op, left, right } => {
                write_operand(f, left, PRIMARY)?;
                f.write_str(op.symbol())?;
                write_operand(f, right, PRIMARY)
            }
            Expr::And { left, right } => write_binary(f, Keyword::And, Casing::Upper, AND, left, right),
            Expr::Or { left, right } => write_binary(f, Keyword::Or, Casing::Upper, OR, left, right),
            Expr::LowerAnd { left, right } => {
                write_binary(f, Keyword::And, Casing::Lower, AND, left, right)
            }
            Expr::LowerOr { left, right } => {
                write_binary(f, Keyword::Or, Casing::Lower, OR, left, right)
            }
            Expr::Not { operand } => {
                write!(f, "{} ", Keyword::Not.spelling(Casing::Upper))?;
                write_operand(f, operand, NOT)
            }
            Expr::LowerNot { operand } => {
                write!(f, "{} ", Keyword::Not.spelling(Casing::Lower))?;
                write_operand(f, operand, NOT)
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().keyword())?;
        match self {
            Command::Search { filters } => {
                for filter in filters {
                    write!(f, " {}", filter)?;
                }
                Ok(())
            }
            Command::Where { condition } => write!(f, " {}", condition),
            Command::Stats { aggregations } => {
                for (index, aggregation) in aggregations.iter().enumerate() {
                    let separator = if index == 0 { " " } else { ", " };
                    write!(f, "{}{}", separator, aggregation.text)?;
                }
                Ok(())
            }
            Command::Eval { bindings } => {
                for (index, binding) in bindings.iter().enumerate() {
                    let separator = if index == 0 { " " } else { ", " };
                    write!(f, "{}{}={}", separator, binding.name, binding.value)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, command) in self.commands.iter().enumerate() {
            if index > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}

/// Serializes a query to compact JSON.
///
/// # Examples
///
/// ```
/// use spl_lang::{parse_query, to_json};
///
/// let query = parse_query("where 123").unwrap();
/// assert_eq!(
///     to_json(&query).unwrap(),
///     r#"{"commands":[{"command":"where","condition":{"type":"number","value":"123"}}]}"#
/// );
/// ```
pub fn to_json(query: &Query) -> Result<String, serde_json::Error> {
    serde_json::to_string(query)
}

/// Serializes a query to JSON with 2-space indentation.
pub fn to_json_pretty(query: &Query) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(query)
}
