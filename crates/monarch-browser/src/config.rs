//! Window and layout settings.

use monarch_css::LayoutConfig;
use serde::{Deserialize, Serialize};

/// Settings for one tab. Missing fields take their defaults when
/// deserializing, so a config file only needs the values it changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Window width.
    pub width: f32,
    /// Window height.
    pub height: f32,
    /// Horizontal page margin.
    pub hstep: f32,
    /// Vertical page margin and paragraph spacing.
    pub vstep: f32,
    /// Intrinsic width of input and button boxes.
    pub input_width: f32,
    /// Width of the scrollbar thumb.
    pub scrollbar_width: f32,
    /// Height of the browser chrome above the page.
    pub chrome_offset: f32,
}

impl BrowserConfig {
    /// The settings the layout engine needs.
    #[must_use]
    pub const fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            width: self.width,
            hstep: self.hstep,
            vstep: self.vstep,
            input_width: self.input_width,
        }
    }

    /// Height of the page area below the chrome.
    #[must_use]
    pub fn viewport_height(&self) -> f32 {
        (self.height - self.chrome_offset).max(0.0)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            hstep: 13.0,
            vstep: 18.0,
            input_width: 200.0,
            scrollbar_width: 15.0,
            chrome_offset: 0.0,
        }
    }
}
