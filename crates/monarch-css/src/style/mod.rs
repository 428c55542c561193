//! Resolved per-node style.

/// Font selection values derived from resolved style.
pub mod font;

use std::collections::BTreeMap;

use monarch_common::warning::warn_once;
use serde::Serialize;

pub use font::{FontKey, FontSlant, FontWeight};

use crate::parser::Declaration;

/// Properties every node inherits from its parent, with the values the root
/// starts from.
pub const INHERITED_PROPERTIES: [(&str, &str); 4] = [
    ("font-size", "16px"),
    ("font-style", "normal"),
    ("font-weight", "normal"),
    ("color", "black"),
];

/// Font size of the root, in pixels.
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// The final property map of one node.
///
/// After the cascade every style holds the four [`INHERITED_PROPERTIES`], and
/// `font-size` is always in pixels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComputedStyle {
    properties: BTreeMap<String, String>,
}

impl ComputedStyle {
    /// Style of a node with no parent: the inherited defaults.
    #[must_use]
    pub fn root() -> Self {
        Self {
            properties: INHERITED_PROPERTIES
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                .collect(),
        }
    }

    /// Start a child's style by copying the parent's inherited properties.
    #[must_use]
    pub fn inherit_from(parent: &Self) -> Self {
        let mut style = Self::root();
        for (name, _) in INHERITED_PROPERTIES {
            if let Some(value) = parent.get(name) {
                style.set(name, value);
            }
        }
        style
    }

    /// Look up a property.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Set a property, replacing any previous value.
    pub fn set(&mut self, name: &str, value: &str) {
        let _ = self.properties.insert(name.to_string(), value.to_string());
    }

    /// Apply one declaration.
    pub fn apply_declaration(&mut self, declaration: &Declaration) {
        self.set(&declaration.name, &declaration.value);
    }

    /// All properties, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Rewrite a percentage `font-size` into pixels of `parent_px`.
    ///
    /// An unparsable percentage falls back to the parent size.
    pub fn resolve_percentage_font_size(&mut self, parent_px: f32) {
        let Some(percent) = self
            .get("font-size")
            .and_then(|value| value.strip_suffix('%'))
            .map(str::to_string)
        else {
            return;
        };
        let px = percent.trim().parse::<f32>().map_or_else(
            |_| {
                warn_once("Style", &format!("invalid font-size percentage '{percent}%'"));
                parent_px
            },
            |pct| pct / 100.0 * parent_px,
        );
        self.set("font-size", &format!("{px}px"));
    }

    /// Resolved `font-size` in pixels.
    #[must_use]
    pub fn font_size_px(&self) -> f32 {
        let value = self.required("font-size");
        parse_px(value).unwrap_or_else(|| {
            warn_once("Style", &format!("unsupported font-size '{value}', using 16px"));
            DEFAULT_FONT_SIZE_PX
        })
    }

    /// Resolved text color.
    #[must_use]
    pub fn color(&self) -> &str {
        self.required("color")
    }

    /// Background color, or `None` when absent or `transparent`.
    #[must_use]
    pub fn background_color(&self) -> Option<&str> {
        self.get("background-color")
            .filter(|color| !color.eq_ignore_ascii_case("transparent"))
    }

    /// The font-provider key for this style.
    #[must_use]
    pub fn font_key(&self) -> FontKey {
        FontKey::new(
            self.font_size_px(),
            FontWeight::from_css(self.required("font-weight")),
            FontSlant::from_css(self.required("font-style")),
        )
    }

    /// Read one of the always-present inherited properties. A missing key
    /// means the cascade was skipped for this node: debug builds panic,
    /// release builds warn and use the root default.
    fn required(&self, name: &str) -> &str {
        if let Some(value) = self.get(name) {
            return value;
        }
        debug_assert!(false, "missing resolved property '{name}'");
        warn_once("Style", &format!("missing resolved property '{name}'"));
        INHERITED_PROPERTIES
            .iter()
            .find(|(key, _)| *key == name)
            .map_or("", |(_, value)| value)
    }
}

/// Parse `"12px"` or `"12.5px"` into pixels.
#[must_use]
pub fn parse_px(value: &str) -> Option<f32> {
    value
        .trim()
        .strip_suffix("px")
        .and_then(|number| number.trim().parse::<f32>().ok())
        .filter(|px| px.is_finite() && *px >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_inherited_defaults() {
        let style = ComputedStyle::root();
        assert_eq!(style.get("font-size"), Some("16px"));
        assert_eq!(style.get("font-style"), Some("normal"));
        assert_eq!(style.get("font-weight"), Some("normal"));
        assert_eq!(style.get("color"), Some("black"));
    }

    #[test]
    fn inherit_copies_only_inherited_properties() {
        let mut parent = ComputedStyle::root();
        parent.set("color", "red");
        parent.set("background-color", "blue");
        let child = ComputedStyle::inherit_from(&parent);
        assert_eq!(child.get("color"), Some("red"));
        assert_eq!(child.get("background-color"), None);
    }

    #[test]
    fn percentage_font_size() {
        let mut style = ComputedStyle::root();
        style.set("font-size", "150%");
        style.resolve_percentage_font_size(20.0);
        assert_eq!(style.get("font-size"), Some("30px"));
        assert!((style.font_size_px() - 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn invalid_percentage_uses_parent_size() {
        let mut style = ComputedStyle::root();
        style.set("font-size", "abc%");
        style.resolve_percentage_font_size(12.0);
        assert_eq!(style.get("font-size"), Some("12px"));
    }

    #[test]
    fn transparent_background_is_none() {
        let mut style = ComputedStyle::root();
        assert_eq!(style.background_color(), None);
        style.set("background-color", "transparent");
        assert_eq!(style.background_color(), None);
        style.set("background-color", "gray");
        assert_eq!(style.background_color(), Some("gray"));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "missing resolved property 'color'")]
    fn missing_property_is_a_defect() {
        let _ = ComputedStyle::default().color();
    }

    #[test]
    fn parse_px_values() {
        assert_eq!(parse_px("12px"), Some(12.0));
        assert_eq!(parse_px("12.5px"), Some(12.5));
        assert_eq!(parse_px("2em"), None);
        assert_eq!(parse_px("-3px"), None);
    }
}
