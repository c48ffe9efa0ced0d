use serde::{Deserialize, Serialize};

use crate::ast::Expr;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    /// Equal (`=`)
    #[serde(rename = "=")]
    Equal,
    /// Less than (`<`)
    #[serde(rename = "<")]
    LessThan,
    /// Greater than (`>`)
    #[serde(rename = ">")]
    GreaterThan,
    /// Less than or equal (`<=`)
    #[serde(rename = "<=")]
    LessEqual,
    /// Greater than or equal (`>=`)
    #[serde(rename = ">=")]
    GreaterEqual,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Equal => "=",
            CompareOp::LessThan => "<",
            CompareOp::GreaterThan => ">",
            CompareOp::LessEqual => "<=",
            CompareOp::GreaterEqual => ">=",
        }
    }
}

/// Logical keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    And,
    Or,
    Not,
}

impl Keyword {
    /// Matches the exact uppercase spelling used inside search filter lists.
    pub fn from_uppercase(word: &str) -> Option<Self> {
        match word {
            "AND" => Some(Keyword::And),
            "OR" => Some(Keyword::Or),
            "NOT" => Some(Keyword::Not),
            _ => None,
        }
    }

    /// Matches any spelling, ignoring ASCII case.
    pub fn from_any_case(word: &str) -> Option<Self> {
        [Keyword::And, Keyword::Or, Keyword::Not]
            .into_iter()
            .find(|keyword| word.eq_ignore_ascii_case(keyword.spelling(Casing::Lower)))
    }

    pub fn spelling(self, casing: Casing) -> &'static str {
        match (self, casing) {
            (Keyword::And, Casing::Upper) => "AND",
            (Keyword::Or, Casing::Upper) => "OR",
            (Keyword::Not, Casing::Upper) => "NOT",
            (Keyword::And, Casing::Lower) => "and",
            (Keyword::Or, Casing::Lower) => "or",
            (Keyword::Not, Casing::Lower) => "not",
        }
    }
}

/// Which family of logical node a keyword produces.
///
/// Search filter lists build [`Casing::Upper`] nodes; computed expressions
/// (where, eval) build [`Casing::Lower`] nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Casing {
    Upper,
    Lower,
}

impl Casing {
    pub fn and(self, left: Expr, right: Expr) -> Expr {
        let (left, right) = (Box::new(left), Box::new(right));
        match self {
            Casing::Upper => Expr::And { left, right },
            Casing::Lower => Expr::LowerAnd { left, right },
        }
    }

    pub fn or(self, left: Expr, right: Expr) -> Expr {
        let (left, right) = (Box::new(left), Box::new(right));
        match self {
            Casing::Upper => Expr::Or { left, right },
            Casing::Lower => Expr::LowerOr { left, right },
        }
    }

    pub fn not(self, operand: Expr) -> Expr {
        let operand = Box::new(operand);
        match self {
            Casing::Upper => Expr::Not { operand },
            Casing::Lower => Expr::LowerNot { operand },
        }
    }
}
