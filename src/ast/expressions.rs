use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::ast::CompareOp;

/// Abstract Syntax Tree node representing a parsed expression.
///
/// Every node exclusively owns its children. Logical operators come in two
/// structurally distinct families: the uppercase ones built inside `search`
/// filter lists and the lowercase ones built in `where` and `eval`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    // Literals
    /// String literal, quoted or bare
    ///
    /// # Examples
    /// ```text
    /// host              // value "host", quoted: false
    /// "hello world!"    // value "hello world!", quoted: true
    /// ```
    #[serde(rename = "string")]
    String { value: String, quoted: bool },

    /// Integer literal of arbitrary precision
    ///
    /// # Example
    /// ```text
    /// 123
    /// ```
    #[serde(rename = "number")]
    Number {
        #[serde(with = "decimal_string")]
        value: BigInt,
    },

    /// Comparison between two operands
    ///
    /// # Examples
    /// ```text
    /// status=200
    /// bytes >= 1024
    /// ```
    #[serde(rename = "comparison")]
    Comparison {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    // Search filter-list logic
    /// `left AND right`
    #[serde(rename = "AND")]
    And { left: Box<Expr>, right: Box<Expr> },

    /// `left OR right`
    #[serde(rename = "OR")]
    Or { left: Box<Expr>, right: Box<Expr> },

    /// `NOT operand`
    #[serde(rename = "NOT")]
    Not { operand: Box<Expr> },

    // Computed-expression logic
    /// `left and right`
    #[serde(rename = "and")]
    LowerAnd { left: Box<Expr>, right: Box<Expr> },

    /// `left or right`
    #[serde(rename = "or")]
    LowerOr { left: Box<Expr>, right: Box<Expr> },

    /// `not operand`
    #[serde(rename = "not")]
    LowerNot { operand: Box<Expr> },
}

impl Expr {
    /// An unquoted string literal.
    pub fn bare(value: impl Into<String>) -> Self {
        Expr::String {
            value: value.into(),
            quoted: false,
        }
    }

    /// A quoted string literal.
    pub fn quoted(value: impl Into<String>) -> Self {
        Expr::String {
            value: value.into(),
            quoted: true,
        }
    }

    pub fn number(value: impl Into<BigInt>) -> Self {
        Expr::Number {
            value: value.into(),
        }
    }

    pub fn compare(op: CompareOp, left: Expr, right: Expr) -> Self {
        Expr::Comparison {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Serializes big integers as decimal strings so no consumer rounds them.
mod decimal_string {
    use num_bigint::BigInt;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}
