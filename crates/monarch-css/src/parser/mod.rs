//! Character-level stylesheet parser.
//!
//! Grammar:
//!
//! ```text
//! stylesheet  := { selector "{" declarations "}" }
//! selector    := word { whitespace word }
//! declarations:= { word ":" word ";" }
//! word        := ( alphanumeric | "#" | "-" | "." | "%" )+
//! ```
//!
//! Recovery is local: a bad declaration skips to the next `;` or `}`, a bad
//! rule skips past the next `}`. Nothing here ever fails outward.

use monarch_common::warning::warn_once;

use crate::selector::Selector;

/// One `property: value` pair. The property name is case-folded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Case-folded property name.
    pub name: String,
    /// Raw value word.
    pub value: String,
}

impl Declaration {
    /// Create a declaration.
    #[must_use]
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// A selector with its declarations, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// What the rule applies to.
    pub selector: Selector,
    /// Declarations in source order. Later duplicates win when applied.
    pub declarations: Vec<Declaration>,
}

/// An ordered list of rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// Rules in source order.
    pub rules: Vec<StyleRule>,
}

/// Where and why parsing stopped. Only used internally to drive recovery and
/// to report selector errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SyntaxError {
    pub(crate) offset: usize,
    pub(crate) found: Option<char>,
    pub(crate) expected: &'static str,
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.found {
            Some(c) => write!(f, "expected {} at offset {}, found {c:?}", self.expected, self.offset),
            None => write!(f, "expected {} at end of input", self.expected),
        }
    }
}

type ParseResult<T> = Result<T, SyntaxError>;

/// Recursive-descent parser over a character buffer.
pub struct CSSParser {
    chars: Vec<char>,
    pos: usize,
}

impl CSSParser {
    /// Create a parser over `source`.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    /// Parse a whole stylesheet, dropping malformed rules.
    pub fn parse_stylesheet(&mut self) -> Stylesheet {
        let mut rules = Vec::new();
        loop {
            self.whitespace();
            if self.at_end() {
                break;
            }
            match self.rule() {
                Ok(rule) => rules.push(rule),
                Err(err) => {
                    warn_once("CSS", &format!("dropped malformed rule: {err}"));
                    if self.ignore_until(&['}']).is_none() {
                        break;
                    }
                    self.pos += 1;
                }
            }
        }
        Stylesheet { rules }
    }

    /// Parse a declaration block body (no braces), as found in a `style`
    /// attribute. Stops at `}` or end of input.
    pub fn parse_declarations(&mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();
        self.whitespace();
        while let Some(c) = self.peek()
            && c != '}'
        {
            let terminated = match self.pair() {
                Ok(declaration) => {
                    declarations.push(declaration);
                    self.whitespace();
                    self.literal(';').is_ok()
                }
                Err(_) => false,
            };
            if terminated {
                self.whitespace();
                continue;
            }
            // Anything up to the next `;` belongs to the broken declaration.
            match self.ignore_until(&[';', '}']) {
                Some(';') => {
                    self.pos += 1;
                    self.whitespace();
                }
                _ => break,
            }
        }
        declarations
    }

    /// Parse a selector: one or more whitespace-separated tag words, up to
    /// `{` or end of input.
    pub(crate) fn selector(&mut self) -> ParseResult<Selector> {
        let mut selector = Selector::tag(&self.word()?.to_lowercase());
        self.whitespace();
        while let Some(c) = self.peek()
            && c != '{'
        {
            let tag = self.word()?.to_lowercase();
            selector = Selector::descendant(selector, Selector::tag(&tag));
            self.whitespace();
        }
        Ok(selector)
    }

    fn rule(&mut self) -> ParseResult<StyleRule> {
        let selector = self.selector()?;
        self.literal('{')?;
        self.whitespace();
        let declarations = self.parse_declarations();
        self.literal('}')?;
        Ok(StyleRule {
            selector,
            declarations,
        })
    }

    fn pair(&mut self) -> ParseResult<Declaration> {
        let name = self.word()?.to_lowercase();
        self.whitespace();
        self.literal(':')?;
        self.whitespace();
        let value = self.word()?;
        Ok(Declaration { name, value })
    }

    pub(crate) fn whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn word(&mut self) -> ParseResult<String> {
        let start = self.pos;
        while self.peek().is_some_and(is_word_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("a word"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn literal(&mut self, expected: char) -> ParseResult<()> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(match expected {
                '{' => "'{'",
                '}' => "'}'",
                ':' => "':'",
                ';' => "';'",
                _ => "a delimiter",
            }))
        }
    }

    /// Advance to the next character in `stops` without consuming it.
    fn ignore_until(&mut self, stops: &[char]) -> Option<char> {
        while let Some(c) = self.peek() {
            if stops.contains(&c) {
                return Some(c);
            }
            self.pos += 1;
        }
        None
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    pub(crate) fn error(&self, expected: &'static str) -> SyntaxError {
        SyntaxError {
            offset: self.pos,
            found: self.peek(),
            expected,
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '#' | '-' | '.' | '%')
}

/// Parse a stylesheet in one call.
#[must_use]
pub fn parse_stylesheet(source: &str) -> Stylesheet {
    CSSParser::new(source).parse_stylesheet()
}

/// Parse the contents of a `style` attribute.
#[must_use]
pub fn parse_inline_style(source: &str) -> Vec<Declaration> {
    CSSParser::new(source).parse_declarations()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_accepts_css_value_characters() {
        let mut parser = CSSParser::new("#fff 12.5px -x 50% ;");
        assert_eq!(parser.word().unwrap(), "#fff");
        parser.whitespace();
        assert_eq!(parser.word().unwrap(), "12.5px");
        parser.whitespace();
        assert_eq!(parser.word().unwrap(), "-x");
        parser.whitespace();
        assert_eq!(parser.word().unwrap(), "50%");
        parser.whitespace();
        assert!(parser.word().is_err());
    }

    #[test]
    fn ignore_until_does_not_consume_stop() {
        let mut parser = CSSParser::new("abc;def");
        assert_eq!(parser.ignore_until(&[';']), Some(';'));
        assert_eq!(parser.peek(), Some(';'));
        assert_eq!(parser.ignore_until(&['}']), None);
        assert!(parser.at_end());
    }

    #[test]
    fn syntax_error_display() {
        let mut parser = CSSParser::new("{");
        let err = parser.word().unwrap_err();
        assert_eq!(err.to_string(), "expected a word at offset 0, found '{'");
    }
}
