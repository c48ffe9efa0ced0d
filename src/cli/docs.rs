//! Documentation content for the spl CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Commands,
    Operators,
    Output,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "literals" => Some(Self::Syntax),
            "commands" | "command" | "pipeline" => Some(Self::Commands),
            "operators" | "ops" | "logic" => Some(Self::Operators),
            "output" | "json" | "format" => Some(Self::Output),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"SPL QUERY DOCUMENTATION

A query is a pipeline of commands separated by '|'. Each command filters,
narrows, computes, or aggregates. This tool parses queries into a tree; it
never runs them.

DOCUMENTATION CATEGORIES

  syntax            Words, quoted strings, numbers, grouping
  commands          search, where, stats, eval and the implicit search
  operators         Comparisons and the two casings of AND/OR/NOT
  output            JSON tree shape and canonical text

QUICK REFERENCE

  search a=b c            Two independent filters
  a=1 AND b=2             Implicit search, one combined filter
  | where x<2 and y>=3    Computed condition
  | eval r = a=1 or not b Field assignment
  | stats count           Aggregation (kept opaque)

Run 'spl doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Commands) => Ok(COMMANDS_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Output) => Ok(OUTPUT_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX

WORDS
  Letters, digits, '_' and the symbols - $ . * ! : / @ # % + ? & [ ] { } ~ ^ \
  host    web-01    $price    user@example.com    error*

NUMBERS
  A word made only of digits is an integer of unlimited size.
  123    18446744073709551617

QUOTED STRINGS
  Single or double quotes; the content is taken literally, no escapes.
  "hello world!"    'say "hi"'

GROUPING
  Parentheses group an expression and reset precedence.
  search NOT (a=1 OR b=2)

WHITESPACE
  Separates filter terms. Optional around comparison operators.
"#;

const COMMANDS_DOC: &str = r#"COMMANDS

search <term> <term> ...
  Each term is an independent filter; placing terms side by side does not
  combine them. The list may be empty.
    search error host=web-01

  Without a leading command keyword, the first segment is a search:
    "hello world!"
    a<b AND c=d

where <expression>
  Exactly one expression.
    where bytes > 1024 and status=500

eval <name> = <expression>, ...
  One or more assignments, separated by commas or spaces.
    eval slow = duration > 500, label = "checked"

stats [<aggregation>, ...]
  Aggregations are kept as opaque text, one per comma-separated item.
    stats
    stats count, sum(bytes) by host

Commands are joined with '|'. Command keywords ignore case.
    search a=b | where a<2 | stats
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

COMPARISON
  =   <   >   <=   >=
  Operands are literals or parenthesized groups.

LOGIC IN SEARCH
  Only the uppercase words are operators:
    AND   OR   NOT
  Lowercase 'and'/'or'/'not' are ordinary search terms:
    search a=1 and b=2     -> three filters: a=1, "and", b=2
    search a=1 AND b=2     -> one filter: AND(a=1, b=2)

LOGIC IN WHERE AND EVAL
  and   or   not          (any case)
    where a=1 and b=2 or not c=3  -> or(and(a=1, b=2), not(c=3))

PRECEDENCE (tightest first)
  literal / ( group )
  comparison
  NOT
  AND
  OR                       AND and OR associate to the left
"#;

const OUTPUT_DOC: &str = r#"OUTPUT

JSON TREE  (spl parse)
  {"commands": [
    {"command": "search", "filters": [...]},
    {"command": "where", "condition": {...}},
    {"command": "stats", "aggregations": [{"text": "count"}]},
    {"command": "eval", "bindings": [{"name": "r", "value": {...}}]}
  ]}

  Expressions carry a "type" tag:
    {"type": "string", "value": "a", "quoted": false}
    {"type": "number", "value": "123"}          (decimal string, never rounded)
    {"type": "comparison", "op": "<", "left": ..., "right": ...}
    {"type": "AND", "left": ..., "right": ...}  (search)
    {"type": "and", "left": ..., "right": ...}  (where / eval)
    {"type": "NOT", "operand": ...}

CANONICAL TEXT  (spl fmt)
  Re-prints the query with an explicit 'search' keyword, single spaces and
  only the parentheses precedence requires. Parsing it again gives the same
  tree.
"#;
