// Language Reference Tests
//
// Each test pins one documented example query to the exact tree it must
// produce, plus the JSON shape downstream consumers read.

use num_bigint::BigInt;
use serde_json::json;
use spl_lang::ast::{Casing, Command, CompareOp, Expr};
use spl_lang::{Query, parse_query, to_json};

fn parse(input: &str) -> Query {
    parse_query(input).unwrap_or_else(|e| panic!("failed to parse {input:?}: {e}"))
}

fn cmp(op: CompareOp, left: Expr, right: Expr) -> Expr {
    Expr::compare(op, left, right)
}

fn eq(left: Expr, right: Expr) -> Expr {
    cmp(CompareOp::Equal, left, right)
}

fn bare(s: &str) -> Expr {
    Expr::bare(s)
}

fn num(n: i64) -> Expr {
    Expr::number(n)
}

// ============================================================================
// Section: Search Command
// ============================================================================

#[test]
fn reference_search_single_comparison() {
    assert_eq!(
        parse("search a=b").commands,
        vec![Command::Search {
            filters: vec![eq(bare("a"), bare("b"))],
        }]
    );
}

#[test]
fn reference_search_lowercase_connectors_are_terms() {
    assert_eq!(
        parse("search a=1 and b=2 or c=3").commands,
        vec![Command::Search {
            filters: vec![
                eq(bare("a"), num(1)),
                bare("and"),
                eq(bare("b"), num(2)),
                bare("or"),
                eq(bare("c"), num(3)),
            ],
        }]
    );
}

#[test]
fn reference_search_uppercase_connectors_build_one_tree() {
    let upper = Casing::Upper;
    assert_eq!(
        parse("search a=1 AND b=2 OR NOT c=3").commands,
        vec![Command::Search {
            filters: vec![upper.or(
                upper.and(eq(bare("a"), num(1)), eq(bare("b"), num(2))),
                upper.not(eq(bare("c"), num(3))),
            )],
        }]
    );
}

#[test]
fn reference_search_not_group() {
    assert_eq!(
        parse("search NOT (a=1)").commands,
        vec![Command::Search {
            filters: vec![Casing::Upper.not(eq(bare("a"), num(1)))],
        }]
    );
}

// ============================================================================
// Section: Eval Command
// ============================================================================

#[test]
fn reference_eval_lowercase_logic() {
    let lower = Casing::Lower;
    let query = parse("eval result = a=1 and b=2 or not c=3");
    let Command::Eval { bindings } = &query.commands[0] else {
        panic!("Expected Eval, got {:?}", query.commands[0]);
    };
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].name, "result");
    assert_eq!(
        bindings[0].value,
        lower.or(
            lower.and(eq(bare("a"), num(1)), eq(bare("b"), num(2))),
            lower.not(eq(bare("c"), num(3))),
        )
    );
}

// ============================================================================
// Section: Pipelines
// ============================================================================

#[test]
fn reference_three_command_pipeline() {
    assert_eq!(
        parse("search a=b | where a<2 | stats").commands,
        vec![
            Command::Search {
                filters: vec![eq(bare("a"), bare("b"))],
            },
            Command::Where {
                condition: cmp(CompareOp::LessThan, bare("a"), num(2)),
            },
            Command::Stats {
                aggregations: vec![],
            },
        ]
    );
}

#[test]
fn reference_where_number() {
    let query = parse("where 123");
    assert_eq!(query.commands, vec![Command::Where { condition: num(123) }]);
    assert!(matches!(
        &query.commands[0],
        Command::Where { condition: Expr::Number { value } } if *value == BigInt::from(123)
    ));
}

#[test]
fn reference_where_number_beyond_u64() {
    let digits = "340282366920938463463374607431768211457";
    let query = parse(&format!("where id={digits}"));
    let expected: BigInt = digits.parse().unwrap();
    assert_eq!(
        query.commands,
        vec![Command::Where {
            condition: eq(bare("id"), Expr::number(expected)),
        }]
    );
}

// ============================================================================
// Section: Implicit Search
// ============================================================================

#[test]
fn reference_implicit_search_quoted_string() {
    assert_eq!(
        parse("\"hello world!\"").commands,
        vec![Command::Search {
            filters: vec![Expr::quoted("hello world!")],
        }]
    );
}

#[test]
fn reference_implicit_search_bare_string() {
    assert_eq!(
        parse("hello").commands,
        vec![Command::Search {
            filters: vec![bare("hello")],
        }]
    );
}

#[test]
fn reference_implicit_search_boolean_expression() {
    assert_eq!(
        parse("a<b AND c=d").commands,
        vec![Command::Search {
            filters: vec![Casing::Upper.and(
                cmp(CompareOp::LessThan, bare("a"), bare("b")),
                eq(bare("c"), bare("d")),
            )],
        }]
    );
}

#[test]
fn reference_implicit_search_equals_explicit() {
    assert_eq!(parse("a<b AND c=d"), parse("search a<b AND c=d"));
}

#[test]
fn reference_parse_is_deterministic() {
    let input = "search x=1 AND (y=2 OR z) | eval r = not x | stats count";
    assert_eq!(parse(input), parse(input));
}

// ============================================================================
// Section: JSON Shape
// ============================================================================

#[test]
fn reference_json_shape() {
    let query = parse("search a=1 AND NOT 'x' | where b<=2 or c | eval r=d | stats count");
    let value: serde_json::Value = serde_json::from_str(&to_json(&query).unwrap()).unwrap();

    assert_eq!(
        value,
        json!({
            "commands": [
                {
                    "command": "search",
                    "filters": [{
                        "type": "AND",
                        "left": {
                            "type": "comparison",
                            "op": "=",
                            "left": {"type": "string", "value": "a", "quoted": false},
                            "right": {"type": "number", "value": "1"}
                        },
                        "right": {
                            "type": "NOT",
                            "operand": {"type": "string", "value": "x", "quoted": true}
                        }
                    }]
                },
                {
                    "command": "where",
                    "condition": {
                        "type": "or",
                        "left": {
                            "type": "comparison",
                            "op": "<=",
                            "left": {"type": "string", "value": "b", "quoted": false},
                            "right": {"type": "number", "value": "2"}
                        },
                        "right": {"type": "string", "value": "c", "quoted": false}
                    }
                },
                {
                    "command": "eval",
                    "bindings": [{
                        "name": "r",
                        "value": {"type": "string", "value": "d", "quoted": false}
                    }]
                },
                {
                    "command": "stats",
                    "aggregations": [{"text": "count"}]
                }
            ]
        })
    );
}

#[test]
fn reference_json_round_trips_through_serde() {
    let query = parse("search big=99999999999999999999999 | where not (a=1 or b)");
    let json = to_json(&query).unwrap();
    let back: Query = serde_json::from_str(&json).unwrap();
    assert_eq!(back, query);
}
