//! Display list: a sequence of drawing commands in paint order.

use serde::Serialize;

use crate::layout::{FontMetrics, Rect};
use crate::style::FontKey;

/// A single drawing command.
///
/// Coordinates are page coordinates; the consumer subtracts the scroll offset
/// before drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Fill a rectangle.
    Rect {
        /// Area to fill.
        rect: Rect,
        /// Fill color.
        color: String,
    },
    /// Stroke the border of a rectangle.
    Outline {
        /// Rectangle to stroke.
        rect: Rect,
        /// Stroke color.
        color: String,
        /// Stroke width.
        thickness: f32,
    },
    /// Draw a segment from the rectangle's top-left to its bottom-right.
    Line {
        /// Segment end points.
        rect: Rect,
        /// Stroke color.
        color: String,
        /// Stroke width.
        thickness: f32,
    },
    /// Draw text with its top-left corner at the rectangle's origin.
    Text {
        /// Text extent; `bottom` is always `top` plus the font's line space.
        rect: Rect,
        /// The text.
        text: String,
        /// Font to draw with.
        font: FontKey,
        /// Text color.
        color: String,
    },
}

impl DrawCommand {
    /// A text command at (`left`, `top`). The extent comes from the font:
    /// the right edge is the measured width and the bottom edge is one line
    /// space below `top`.
    #[must_use]
    pub fn text(
        left: f32,
        top: f32,
        text: &str,
        key: FontKey,
        metrics: &dyn FontMetrics,
        color: &str,
    ) -> Self {
        Self::Text {
            rect: Rect::new(
                left,
                top,
                left + metrics.measure(text),
                top + metrics.linespace(),
            ),
            text: text.to_string(),
            font: key,
            color: color.to_string(),
        }
    }

    /// The rectangle the command covers.
    #[must_use]
    pub const fn rect(&self) -> &Rect {
        match self {
            Self::Rect { rect, .. }
            | Self::Outline { rect, .. }
            | Self::Line { rect, .. }
            | Self::Text { rect, .. } => rect,
        }
    }
}

/// A list of drawing commands in painting order (back to front).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to the display list.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Iterate the commands in painting order.
    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ApproximateFontMetrics;
    use crate::style::{FontSlant, FontWeight};

    #[test]
    fn text_bottom_comes_from_linespace() {
        let key = FontKey::new(10.0, FontWeight::Normal, FontSlant::Roman);
        let metrics = ApproximateFontMetrics::new(10.0);
        let command = DrawCommand::text(5.0, 20.0, "abc", key, &metrics, "black");
        let rect = command.rect();
        assert!((rect.bottom - (20.0 + metrics.linespace())).abs() < 1e-4);
        assert!((rect.right - 23.0).abs() < 1e-4);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let command = DrawCommand::Rect {
            rect: Rect::new(0.0, 0.0, 1.0, 1.0),
            color: "red".to_string(),
        };
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["kind"], "rect");
        assert_eq!(json["color"], "red");
    }
}
