//! Scroll model.
//!
//! The page scrolls in equal steps of at most 5% of the viewport height,
//! sized so that a whole number of steps covers the scrollable distance
//! exactly. The thumb is proportional to the visible fraction of the page
//! and there is no thumb when nothing needs scrolling.

use monarch_css::{DrawCommand, Rect};
use serde::Serialize;

/// Largest scroll step as a fraction of the viewport height.
const MAX_STEP_FRACTION: f32 = 0.05;

/// Color of the scrollbar thumb.
const THUMB_COLOR: &str = "blue";

/// Current scroll position and thumb placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScrollState {
    /// Page offset of the top of the viewport.
    pub offset: f32,
    /// Distance moved by one scroll request.
    pub step: f32,
    /// Window coordinate of the top of the thumb.
    pub thumb_top: f32,
    /// Window coordinate of the bottom of the thumb.
    pub thumb_bottom: f32,
}

/// Scroll geometry for one laid-out page.
#[derive(Debug, Clone, PartialEq)]
pub struct Scrollbar {
    content_height: f32,
    viewport_height: f32,
    vstep: f32,
    chrome_offset: f32,
    window_width: f32,
    width: f32,
    state: ScrollState,
}

impl Scrollbar {
    /// Geometry for a page `content_height` tall at offset 0.
    #[must_use]
    pub fn new(
        content_height: f32,
        viewport_height: f32,
        vstep: f32,
        chrome_offset: f32,
        window_width: f32,
        width: f32,
    ) -> Self {
        let mut scrollbar = Self {
            content_height,
            viewport_height,
            vstep,
            chrome_offset,
            window_width,
            width,
            state: ScrollState::default(),
        };
        scrollbar.state.step = scrollbar.compute_step();
        scrollbar.update_thumb();
        scrollbar
    }

    /// The same page re-measured, keeping the offset where it still fits.
    #[must_use]
    pub fn remeasured(&self, content_height: f32, viewport_height: f32, window_width: f32) -> Self {
        let mut scrollbar = Self::new(
            content_height,
            viewport_height,
            self.vstep,
            self.chrome_offset,
            window_width,
            self.width,
        );
        scrollbar.state.offset = self.state.offset.clamp(0.0, scrollbar.max_scroll());
        scrollbar.update_thumb();
        scrollbar
    }

    /// How far the page can scroll. The content gets one vertical step of
    /// bottom margin; a page that fits has nothing to scroll.
    #[must_use]
    pub fn scroll_distance(&self) -> f32 {
        let needed = self.content_height + self.vstep;
        if needed <= self.viewport_height {
            0.0
        } else {
            needed - self.viewport_height
        }
    }

    /// Largest valid offset.
    #[must_use]
    pub fn max_scroll(&self) -> f32 {
        self.scroll_distance()
    }

    /// Height of the thumb: the visible part of the viewport when the overflow
    /// is smaller than the viewport, otherwise the viewport scaled by the
    /// visible fraction. Zero when nothing scrolls.
    #[must_use]
    pub fn thumb_height(&self) -> f32 {
        let distance = self.scroll_distance();
        if distance <= 0.0 || self.viewport_height <= 0.0 {
            return 0.0;
        }
        let visible = if distance <= self.viewport_height {
            (self.viewport_height - distance) / self.viewport_height
        } else {
            self.viewport_height / distance
        };
        visible * self.viewport_height
    }

    /// Current position.
    #[must_use]
    pub const fn state(&self) -> ScrollState {
        self.state
    }

    /// Current offset.
    #[must_use]
    pub const fn offset(&self) -> f32 {
        self.state.offset
    }

    /// Move down one step, snapping to the bottom on overshoot.
    pub fn scroll_down(&mut self) {
        if self.thumb_height() <= 0.0 {
            return;
        }
        let max = self.max_scroll();
        self.state.offset = (self.state.offset + self.state.step).min(max);
        self.update_thumb();
    }

    /// Move up one step, snapping to the top on overshoot.
    pub fn scroll_up(&mut self) {
        if self.thumb_height() <= 0.0 {
            return;
        }
        self.state.offset = (self.state.offset - self.state.step).max(0.0);
        self.update_thumb();
    }

    /// The thumb as a draw command in window coordinates, flush with the
    /// right edge of the window. `None` when there is no thumb.
    #[must_use]
    pub fn paint(&self) -> Option<DrawCommand> {
        if self.thumb_height() <= 0.0 {
            return None;
        }
        Some(DrawCommand::Rect {
            rect: Rect::new(
                self.window_width - self.width,
                self.state.thumb_top,
                self.window_width,
                self.state.thumb_bottom,
            ),
            color: THUMB_COLOR.to_string(),
        })
    }

    /// The step for a whole number of equal moves across the scroll
    /// distance, none larger than the cap.
    fn compute_step(&self) -> f32 {
        let distance = self.scroll_distance();
        if distance <= 0.0 {
            return 0.0;
        }
        let max_step = (self.viewport_height * MAX_STEP_FRACTION).floor();
        if max_step <= 0.0 {
            return distance;
        }
        let steps = (f64::from(distance) / f64::from(max_step)).ceil().max(1.0);
        (f64::from(distance) / steps) as f32
    }

    fn update_thumb(&mut self) {
        let thumb = self.thumb_height();
        let max = self.max_scroll();
        let travel = (self.viewport_height - thumb).max(0.0);
        let progress = if max > 0.0 { self.state.offset / max } else { 0.0 };
        self.state.thumb_top = self.chrome_offset + progress * travel;
        self.state.thumb_bottom = self.state.thumb_top + thumb;
    }
}
