pub mod ast;
pub mod cli;
pub mod lexer;
pub mod output;
pub mod parser;

pub use ast::{Aggregation, Binding, Command, CompareOp, Expr, Query, Token};
pub use lexer::{LexError, Lexer, Position, tokenize, tokenize_expression};
pub use output::{to_json, to_json_pretty};
pub use parser::{ExprMode, ParseError, ParseOptions, Parser, parse_query, parse_query_with};
