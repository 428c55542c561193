//! Font selection values.
//!
//! The layout engine asks the font provider for metrics by [`FontKey`]. Keys
//! are derived from the resolved `font-size`, `font-weight` and `font-style`
//! of a node, translated into the two-valued weight and slant the provider
//! understands.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Two-valued font weight.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    Normal,
    /// Bold weight.
    #[strum(to_string = "bold", serialize = "bolder")]
    Bold,
}

impl FontWeight {
    /// Translate a CSS `font-weight` value. `bold`, `bolder` and numeric
    /// weights of 600 and above select [`FontWeight::Bold`].
    #[must_use]
    pub fn from_css(value: &str) -> Self {
        let value = value.trim();
        value.parse().unwrap_or_else(|_| match value.parse::<u16>() {
            Ok(numeric) if numeric >= 600 => Self::Bold,
            _ => Self::Normal,
        })
    }
}

/// Two-valued font slant. CSS `normal` is `roman`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum FontSlant {
    /// Upright.
    #[strum(to_string = "roman", serialize = "normal")]
    Roman,
    /// Italic or oblique.
    #[strum(to_string = "italic", serialize = "oblique")]
    Italic,
}

impl FontSlant {
    /// Translate a CSS `font-style` value. Unknown values are roman.
    #[must_use]
    pub fn from_css(value: &str) -> Self {
        value.trim().parse().unwrap_or(Self::Roman)
    }
}

/// Identifies one font face at one size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontKey {
    /// Pixel size, rounded.
    pub size: u32,
    /// Weight.
    pub weight: FontWeight,
    /// Slant.
    pub slant: FontSlant,
}

impl FontKey {
    /// Build a key from a pixel size.
    #[must_use]
    pub fn new(size_px: f32, weight: FontWeight, slant: FontSlant) -> Self {
        Self {
            size: size_px.round().max(1.0) as u32,
            weight,
            slant,
        }
    }
}

impl std::fmt::Display for FontKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}px {} {}", self.size, self.weight, self.slant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_translation() {
        assert_eq!(FontWeight::from_css("normal"), FontWeight::Normal);
        assert_eq!(FontWeight::from_css("bold"), FontWeight::Bold);
        assert_eq!(FontWeight::from_css("bolder"), FontWeight::Bold);
        assert_eq!(FontWeight::from_css("900"), FontWeight::Bold);
        assert_eq!(FontWeight::from_css("600"), FontWeight::Bold);
        assert_eq!(FontWeight::from_css("500"), FontWeight::Normal);
        assert_eq!(FontWeight::from_css("lighter"), FontWeight::Normal);
        assert_eq!(FontWeight::from_css(" Bold "), FontWeight::Bold);
    }

    #[test]
    fn slant_translation() {
        assert_eq!(FontSlant::from_css("normal"), FontSlant::Roman);
        assert_eq!(FontSlant::from_css("italic"), FontSlant::Italic);
        assert_eq!(FontSlant::from_css("oblique"), FontSlant::Italic);
        assert_eq!(FontSlant::from_css("ITALIC"), FontSlant::Italic);
        assert_eq!(FontSlant::from_css("inherit"), FontSlant::Roman);
        assert_eq!(FontSlant::Roman.to_string(), "roman");
    }

    #[test]
    fn key_display_and_rounding() {
        let key = FontKey::new(14.4, FontWeight::Bold, FontSlant::Italic);
        assert_eq!(key.size, 14);
        assert_eq!(key.to_string(), "14px bold italic");
    }
}
