use strum_macros::Display;

use super::token::{Attribute, Token};

/// Where the scanner currently is relative to angle brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Outside any tag; characters accumulate into a text run.
    Data,
    /// Between `<` and `>`; characters accumulate into tag text.
    Tag,
}

/// Splits HTML source into text runs and tags.
///
/// The scanner is a two-state machine. There is no support for comments
/// containing `>`, quoted `>` in attribute values, character references, or
/// raw-text elements: `<` always opens a tag and `>` always closes one.
pub struct HTMLTokenizer {
    state: TokenizerState,
    input: String,
    buffer: String,
    token_stream: Vec<Token>,
}

impl HTMLTokenizer {
    /// Create a new tokenizer for the given input. The initial state is
    /// [`TokenizerState::Data`].
    #[must_use]
    pub const fn new(input: String) -> Self {
        Self {
            state: TokenizerState::Data,
            input,
            buffer: String::new(),
            token_stream: Vec::new(),
        }
    }

    /// Tokens emitted so far.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.token_stream
    }

    /// Consume the tokenizer, returning its tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// Scan the whole input.
    ///
    /// Text left over at end of input is emitted; an unterminated tag is
    /// dropped.
    pub fn run(&mut self) {
        let input = std::mem::take(&mut self.input);
        for c in input.chars() {
            match (self.state, c) {
                (TokenizerState::Data, '<') => {
                    self.flush_text();
                    self.state = TokenizerState::Tag;
                }
                // A second `<` before `>`: what we have so far was not a tag.
                (TokenizerState::Tag, '<') => self.flush_text(),
                (TokenizerState::Tag, '>') => {
                    self.flush_tag();
                    self.state = TokenizerState::Data;
                }
                _ => self.buffer.push(c),
            }
        }

        match self.state {
            TokenizerState::Data => self.flush_text(),
            TokenizerState::Tag => {
                log::trace!("dropping unterminated tag <{}", self.buffer);
                self.buffer.clear();
            }
        }
        self.input = input;
    }

    fn flush_text(&mut self) {
        if !self.buffer.is_empty() {
            let text = std::mem::take(&mut self.buffer);
            self.token_stream.push(Token::Text(text));
        }
    }

    fn flush_tag(&mut self) {
        let raw = std::mem::take(&mut self.buffer);
        if let Some(token) = tag_token(&raw) {
            self.token_stream.push(token);
        }
    }
}

/// Interpret the text between `<` and `>`.
fn tag_token(raw: &str) -> Option<Token> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    if let Some(body) = text.strip_prefix('!') {
        return Some(Token::Declaration(format!("!{body}")));
    }

    if let Some(closed) = text.strip_prefix('/') {
        let name = closed.split_whitespace().next().unwrap_or_default();
        return Some(Token::EndTag {
            name: name.to_lowercase(),
        });
    }

    let text = text.strip_suffix('/').unwrap_or(text);
    let mut parts = text.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    if name.is_empty() {
        return None;
    }

    let attributes = parts.map(parse_attribute).collect();
    Some(Token::StartTag { name, attributes })
}

/// `key=value`, `key="value"`, `key='value'` or a bare `key`.
fn parse_attribute(pair: &str) -> Attribute {
    match pair.split_once('=') {
        Some((key, value)) => Attribute::new(key.to_lowercase(), strip_quotes(value).to_string()),
        None => Attribute::new(pair.to_lowercase(), String::new()),
    }
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2
            && let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(html: &str) -> Vec<Token> {
        let mut tokenizer = HTMLTokenizer::new(html.to_string());
        tokenizer.run();
        tokenizer.into_tokens()
    }

    #[test]
    fn strip_quotes_requires_matching_pair() {
        assert_eq!(strip_quotes("\"a b\""), "a b");
        assert_eq!(strip_quotes("'x'"), "x");
        assert_eq!(strip_quotes("\"x'"), "\"x'");
        assert_eq!(strip_quotes("\""), "\"");
        assert_eq!(strip_quotes("plain"), "plain");
    }

    #[test]
    fn empty_angle_brackets_produce_nothing() {
        assert!(tokenize("<>").is_empty());
        assert!(tokenize("< >").is_empty());
    }

    #[test]
    fn stray_open_bracket_flushes_as_text() {
        assert_eq!(
            tokenize("<a<b>"),
            vec![
                Token::Text("a".to_string()),
                Token::StartTag {
                    name: "b".to_string(),
                    attributes: Vec::new(),
                },
            ]
        );
    }
}
