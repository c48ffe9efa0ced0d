//! # SPL Query Language - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for a small, pipelined,
//! search-oriented query language modelled on Splunk's SPL.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (literals, comparisons, logical operators)
//! - **[operators]** - Comparison operators and logical keyword casing
//! - **[commands]** - Pipeline commands (search, where, stats, eval)
//! - **[query]** - The complete pipeline
//!
//! ## Quick Start
//!
//! ```text
//! search status=200 host=web-01 | where bytes > 1024 | stats
//! ```
//!
//! This query keeps events matching two independent filter terms, narrows
//! them with a computed condition, and hands the result to an aggregation.
//!
//! ## Core Concepts
//!
//! ### Pipeline Structure
//!
//! A query is a sequence of commands separated by `|`. Input without a leading
//! command keyword is an implicit `search`:
//!
//! ```text
//! "hello world!"          // same as: search "hello world!"
//! a<b AND c=d             // same as: search a<b AND c=d
//! ```
//!
//! ### Two Surface Syntaxes for Logic
//!
//! - Inside a `search` filter list, juxtaposed terms are independent filters
//!   and only the uppercase words `AND`, `OR`, `NOT` combine them.
//! - Inside `where` and `eval`, `and`, `or`, `not` are boolean operators
//!   written in any case.
//!
//! The two families produce distinct node tags ([`Expr::And`] versus
//! [`Expr::LowerAnd`], and so on) so a consumer can tell them apart.
//!
//! ### Numbers
//!
//! Integer literals are arbitrary precision ([`num_bigint::BigInt`]), so
//! `where id=18446744073709551617` keeps every digit.
pub mod commands;
pub mod expressions;
pub mod operators;
pub mod query;
pub mod tokens;

pub use commands::{Aggregation, Binding, Command, CommandKind};
pub use expressions::Expr;
pub use operators::{Casing, CompareOp, Keyword};
pub use query::Query;
pub use tokens::{Position, Token, TokenKind};
