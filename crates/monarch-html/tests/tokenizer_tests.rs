//! Integration tests for the HTML tokenizer.

use monarch_html::{Attribute, HTMLTokenizer, Token};

fn tokenize(html: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(html.to_string());
    tokenizer.run();
    tokenizer.into_tokens()
}

fn start(name: &str, attributes: &[(&str, &str)]) -> Token {
    Token::StartTag {
        name: name.to_string(),
        attributes: attributes
            .iter()
            .map(|(k, v)| Attribute::new((*k).to_string(), (*v).to_string()))
            .collect(),
    }
}

fn end(name: &str) -> Token {
    Token::EndTag {
        name: name.to_string(),
    }
}

fn text(s: &str) -> Token {
    Token::Text(s.to_string())
}

#[test]
fn test_text_and_tags() {
    assert_eq!(
        tokenize("<p>Hello <b>world</b></p>"),
        vec![
            start("p", &[]),
            text("Hello "),
            start("b", &[]),
            text("world"),
            end("b"),
            end("p"),
        ]
    );
}

#[test]
fn test_tag_names_are_case_folded() {
    assert_eq!(tokenize("<DIV></Div>"), vec![start("div", &[]), end("div")]);
}

#[test]
fn test_attributes() {
    assert_eq!(
        tokenize(r#"<a HREF="/next" data-x='1' hidden>"#),
        vec![start("a", &[("href", "/next"), ("data-x", "1"), ("hidden", "")])]
    );
}

#[test]
fn test_attribute_values_keep_case() {
    assert_eq!(
        tokenize("<input Value=Hello>"),
        vec![start("input", &[("value", "Hello")])]
    );
}

#[test]
fn test_trailing_slash_is_stripped() {
    assert_eq!(tokenize("<br/>"), vec![start("br", &[])]);
    assert_eq!(
        tokenize("<img src=a.png />"),
        vec![start("img", &[("src", "a.png")])]
    );
}

#[test]
fn test_declarations() {
    let tokens = tokenize("<!doctype html><!-- note --><p>");
    assert!(tokens[0].is_declaration());
    assert!(tokens[1].is_declaration());
    assert_eq!(tokens[2], start("p", &[]));
}

#[test]
fn test_trailing_text_is_emitted() {
    assert_eq!(tokenize("<b>bold</b> tail"), vec![
        start("b", &[]),
        text("bold"),
        end("b"),
        text(" tail"),
    ]);
}

#[test]
fn test_unterminated_tag_is_dropped() {
    assert_eq!(tokenize("text<p class=x"), vec![text("text")]);
}

#[test]
fn test_close_bracket_outside_tag_is_text() {
    assert_eq!(tokenize("a > b"), vec![text("a > b")]);
}

#[test]
fn test_display() {
    assert_eq!(
        start("a", &[("href", "x"), ("hidden", "")]).to_string(),
        "<a href=\"x\" hidden>"
    );
    assert_eq!(end("p").to_string(), "</p>");
}

#[test]
fn test_bare_slash_is_end_tag() {
    assert_eq!(
        tokenize("<p>a</>b"),
        vec![start("p", &[]), text("a"), end(""), text("b")]
    );
    assert_eq!(tokenize("< />x"), vec![text("x")]);
}
