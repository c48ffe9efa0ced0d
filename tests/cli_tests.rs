// tests/cli_tests.rs

use spl_lang::ParseOptions;
use spl_lang::cli::{
    CheckMode, CheckOptions, CheckResult, CliError, DocCategory, execute_check, get_doc_category,
    get_docs_overview,
};

fn options(query: &str, mode: CheckMode) -> CheckOptions {
    CheckOptions {
        query: query.to_string(),
        mode,
        ..Default::default()
    }
}

#[test]
fn test_syntax_only() {
    let result = execute_check(&options("search a=b | stats", CheckMode::SyntaxOnly)).unwrap();
    assert_eq!(result, CheckResult::SyntaxValid);
}

#[test]
fn test_tree_output_is_json() {
    let result = execute_check(&options("where 123", CheckMode::Tree)).unwrap();
    assert_eq!(
        result,
        CheckResult::Tree(
            r#"{"commands":[{"command":"where","condition":{"type":"number","value":"123"}}]}"#
                .to_string()
        )
    );
}

#[test]
fn test_pretty_tree_output() {
    let mut opts = options("hello", CheckMode::Tree);
    opts.pretty = true;
    let CheckResult::Tree(json) = execute_check(&opts).unwrap() else {
        panic!("Expected tree output");
    };
    assert!(json.contains('\n'));
    assert!(json.contains("  \"commands\""));
}

#[test]
fn test_format_output() {
    let result = execute_check(&options("a<b   AND c=d|stats", CheckMode::Format)).unwrap();
    assert_eq!(
        result,
        CheckResult::Formatted("search a<b AND c=d | stats".to_string())
    );
}

#[test]
fn test_parse_error_is_rendered() {
    let err = execute_check(&options("where", CheckMode::SyntaxOnly)).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Parse error: expected expression after `where`"));
    assert!(message.ends_with("where\n     ^"));
}

#[test]
fn test_max_depth_is_honored() {
    let mut opts = options("where ((a))", CheckMode::SyntaxOnly);
    opts.parse = ParseOptions::default().with_max_depth(1);
    let err = execute_check(&opts).unwrap_err();
    assert!(matches!(
        err,
        CliError::Parse {
            source: spl_lang::ParseError::NestingTooDeep { limit: 1, .. },
            ..
        }
    ));
}

#[test]
fn test_docs_categories() {
    assert!(get_docs_overview().contains("commands"));
    assert_eq!(DocCategory::from_name("OPS"), Some(DocCategory::Operators));
    assert!(get_doc_category("commands").unwrap().contains("eval"));
    assert!(matches!(
        get_doc_category("nope"),
        Err(CliError::UnknownCategory(name)) if name == "nope"
    ));
}
