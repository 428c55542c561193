//! Integration tests for the stylesheet parser.

use monarch_css::{Declaration, Selector, parse_inline_style, parse_stylesheet};
use quickcheck_macros::quickcheck;

#[test]
fn test_parse_simple_rule() {
    let sheet = parse_stylesheet("p { color: red; font-size: 12px; }");
    assert_eq!(sheet.rules.len(), 1);
    let rule = &sheet.rules[0];
    assert_eq!(rule.selector, Selector::tag("p"));
    assert_eq!(
        rule.declarations,
        vec![
            Declaration::new("color", "red"),
            Declaration::new("font-size", "12px"),
        ]
    );
}

#[test]
fn test_rules_keep_source_order() {
    let sheet = parse_stylesheet("h1 { color: red }\ndiv p { color: blue }\nb{color:green}");
    let selectors: Vec<String> = sheet.rules.iter().map(|r| r.selector.to_string()).collect();
    assert_eq!(selectors, vec!["h1", "div p", "b"]);
}

#[test]
fn test_malformed_declaration_keeps_siblings() {
    let sheet = parse_stylesheet("p { color: red; font-size 12px; background-color: blue }");
    assert_eq!(sheet.rules.len(), 1);
    assert_eq!(
        sheet.rules[0].declarations,
        vec![
            Declaration::new("color", "red"),
            Declaration::new("background-color", "blue"),
        ]
    );
}

#[test]
fn test_missing_semicolon_drops_following_declaration() {
    let sheet = parse_stylesheet("p { color: red font-weight: bold } b { color: blue }");
    assert_eq!(sheet.rules.len(), 2);
    assert_eq!(
        sheet.rules[0].declarations,
        vec![Declaration::new("color", "red")]
    );
    assert_eq!(
        sheet.rules[1].declarations,
        vec![Declaration::new("color", "blue")]
    );
}

#[test]
fn test_malformed_rule_is_skipped() {
    let sheet = parse_stylesheet("p > a { color: red } div { color: blue }");
    assert_eq!(sheet.rules.len(), 1);
    assert_eq!(sheet.rules[0].selector, Selector::tag("div"));
}

#[test]
fn test_unterminated_rule_ends_parse() {
    let sheet = parse_stylesheet("p { color: red; } div { color: blue");
    assert_eq!(sheet.rules.len(), 1);
}

#[test]
fn test_property_names_are_lowercased() {
    let sheet = parse_stylesheet("P { COLOR: Red }");
    assert_eq!(sheet.rules[0].selector, Selector::tag("p"));
    assert_eq!(sheet.rules[0].declarations, vec![Declaration::new("color", "Red")]);
}

#[test]
fn test_inline_style() {
    let declarations = parse_inline_style("color: red; font-weight:bold");
    assert_eq!(
        declarations,
        vec![
            Declaration::new("color", "red"),
            Declaration::new("font-weight", "bold"),
        ]
    );
    assert!(parse_inline_style("").is_empty());
    assert!(parse_inline_style(";;;").is_empty());
}

#[quickcheck]
fn prop_parser_never_panics(source: String) -> bool {
    let sheet = parse_stylesheet(&source);
    sheet.rules.iter().all(|rule| rule.selector.priority() >= 1)
}

#[quickcheck]
fn prop_inline_parser_never_panics(source: String) -> bool {
    parse_inline_style(&source)
        .iter()
        .all(|declaration| !declaration.name.is_empty() && !declaration.value.is_empty())
}
