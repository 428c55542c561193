//! Font metrics interface and the per-key memo.
//!
//! Layout only needs four numbers from a font: ascent, descent, line space
//! and the advance width of a string. Providers turn a [`FontKey`] into a
//! handle answering those; [`FontCache`] keeps one handle per key for as long
//! as the cache lives.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::style::FontKey;

/// Font metrics interface for text measurement during layout.
pub trait FontMetrics {
    /// Height of the tallest glyph above the baseline.
    fn ascent(&self) -> f32;

    /// Depth of the deepest glyph below the baseline.
    fn descent(&self) -> f32;

    /// Recommended distance between consecutive baselines.
    fn linespace(&self) -> f32 {
        self.ascent() + self.descent()
    }

    /// Total advance width of `text`.
    fn measure(&self, text: &str) -> f32;
}

/// Source of font handles.
pub trait FontProvider {
    /// Load metrics for `key`. Called at most once per key by [`FontCache`].
    fn load(&self, key: FontKey) -> Rc<dyn FontMetrics>;
}

/// Approximate font metrics using fixed ratios of the font size.
///
/// The average advance of Latin glyphs in a proportional face is about
/// 0.6 of the font size; ascent and descent split a 1.2 line space.
/// Used when no font file is available, and in tests.
#[derive(Debug, Clone, Copy)]
pub struct ApproximateFontMetrics {
    size: f32,
}

impl ApproximateFontMetrics {
    const ASCENT_RATIO: f32 = 0.95;
    const DESCENT_RATIO: f32 = 0.25;
    const CHAR_WIDTH_RATIO: f32 = 0.6;

    /// Metrics for a font of `size` pixels.
    #[must_use]
    pub const fn new(size: f32) -> Self {
        Self { size }
    }
}

impl FontMetrics for ApproximateFontMetrics {
    fn ascent(&self) -> f32 {
        self.size * Self::ASCENT_RATIO
    }

    fn descent(&self) -> f32 {
        self.size * Self::DESCENT_RATIO
    }

    fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.size * Self::CHAR_WIDTH_RATIO
    }
}

/// Provider handing out [`ApproximateFontMetrics`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFonts;

impl FontProvider for ApproximateFonts {
    fn load(&self, key: FontKey) -> Rc<dyn FontMetrics> {
        Rc::new(ApproximateFontMetrics::new(key.size as f32))
    }
}

/// Append-only memo of one font handle per key.
///
/// Entries are pure functions of their key, so nothing is ever evicted. The
/// cache is single-threaded; it lives as long as its owner (normally the
/// browser).
pub struct FontCache {
    provider: Box<dyn FontProvider>,
    loaded: RefCell<HashMap<FontKey, Rc<dyn FontMetrics>>>,
}

impl FontCache {
    /// Create a cache over `provider`.
    #[must_use]
    pub fn new(provider: Box<dyn FontProvider>) -> Self {
        Self {
            provider,
            loaded: RefCell::new(HashMap::new()),
        }
    }

    /// A cache over [`ApproximateFonts`].
    #[must_use]
    pub fn approximate() -> Self {
        Self::new(Box::new(ApproximateFonts))
    }

    /// The handle for `key`, loading it on first use.
    pub fn get(&self, key: FontKey) -> Rc<dyn FontMetrics> {
        if let Some(font) = self.loaded.borrow().get(&key) {
            return Rc::clone(font);
        }
        log::debug!("loading font {key}");
        let font = self.provider.load(key);
        let _ = self.loaded.borrow_mut().insert(key, Rc::clone(&font));
        font
    }

    /// Number of distinct keys loaded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loaded.borrow().len()
    }

    /// Whether nothing has been loaded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaded.borrow().is_empty()
    }
}

impl Default for FontCache {
    fn default() -> Self {
        Self::approximate()
    }
}

impl fmt::Debug for FontCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontCache")
            .field("loaded", &self.len())
            .finish_non_exhaustive()
    }
}
