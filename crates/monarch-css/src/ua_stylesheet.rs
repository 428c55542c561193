//! Default stylesheet
//!
//! Rules every document starts from. They sort into the cascade by priority
//! like any other rule, so author rules of equal priority that come later
//! still win.

use std::sync::OnceLock;

use crate::parser::{CSSParser, Stylesheet};

/// Built-in presentation for the elements the renderer styles specially.
const DEFAULT_CSS: &str = r"
pre { background-color: gray; }
a { color: blue; }
i { font-style: italic; }
em { font-style: italic; }
b { font-weight: bold; }
strong { font-weight: bold; }
small { font-size: 90%; }
big { font-size: 110%; }

h1 { font-size: 200%; font-weight: bold; }
h2 { font-size: 150%; font-weight: bold; }
h3 { font-size: 117%; font-weight: bold; }

input {
    font-size: 16px;
    font-weight: normal;
    font-style: normal;
    background-color: lightblue;
}

button { background-color: orange; }
";

/// Return the parsed default stylesheet, parsing only once.
pub fn default_stylesheet() -> &'static Stylesheet {
    static STYLESHEET: OnceLock<Stylesheet> = OnceLock::new();
    STYLESHEET.get_or_init(|| CSSParser::new(DEFAULT_CSS).parse_stylesheet())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_default_rule_parses() {
        let sheet = default_stylesheet();
        assert_eq!(sheet.rules.len(), 13);
        assert!(sheet.rules.iter().all(|rule| !rule.declarations.is_empty()));
    }

    #[test]
    fn input_rule_resets_inherited_font() {
        let input = default_stylesheet()
            .rules
            .iter()
            .find(|rule| rule.selector.to_string() == "input")
            .unwrap();
        let names: Vec<_> = input.declarations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["font-size", "font-weight", "font-style", "background-color"]
        );
    }
}
