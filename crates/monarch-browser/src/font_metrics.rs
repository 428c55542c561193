//! Font metrics backed by fontdue, loaded from system font files.
//!
//! One face is looked up per weight and slant combination. A missing bold
//! or italic face falls back to the closest loaded one; with no face at all
//! the provider hands out approximate metrics and warns once.

use std::rc::Rc;

use fontdue::{Font, FontSettings};
use monarch_common::warning::warn_once;
use monarch_css::layout::{ApproximateFontMetrics, FontMetrics, FontProvider};
use monarch_css::{FontKey, FontSlant, FontWeight};

/// Common system font paths to search for a default (regular) font.
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/SFNS.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// System font paths for bold variants.
const FONT_BOLD_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// System font paths for italic variants.
const FONT_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
    "/Library/Fonts/Arial Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansOblique.ttf",
    "C:\\Windows\\Fonts\\ariali.ttf",
];

/// System font paths for bold-italic variants.
const FONT_BOLD_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold Italic.ttf",
    "/Library/Fonts/Arial Bold Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-BoldItalic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBoldOblique.ttf",
    "C:\\Windows\\Fonts\\arialbi.ttf",
];

/// Metrics of one fontdue face at one pixel size.
pub struct FontdueFontMetrics {
    font: Rc<Font>,
    size: f32,
    ascent: f32,
    descent: f32,
}

impl FontdueFontMetrics {
    /// Metrics for `font` at `size` pixels.
    #[must_use]
    pub fn new(font: Rc<Font>, size: f32) -> Self {
        // fontdue reports descent as a negative offset from the baseline.
        let (ascent, descent) = font
            .horizontal_line_metrics(size)
            .map_or((size * 0.8, size * 0.2), |m| (m.ascent, -m.descent));
        Self {
            font,
            size,
            ascent,
            descent,
        }
    }
}

impl FontMetrics for FontdueFontMetrics {
    fn ascent(&self) -> f32 {
        self.ascent
    }

    fn descent(&self) -> f32 {
        self.descent
    }

    fn measure(&self, text: &str) -> f32 {
        // Font::metrics() avoids rasterizing when only advances are needed.
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| self.font.metrics(ch, self.size).advance_width)
            .sum()
    }
}

/// Provider over the system's regular, bold, italic and bold-italic faces.
#[derive(Default)]
pub struct FontdueFonts {
    regular: Option<Rc<Font>>,
    bold: Option<Rc<Font>>,
    italic: Option<Rc<Font>>,
    bold_italic: Option<Rc<Font>>,
}

impl FontdueFonts {
    /// Search the usual system locations for each face.
    #[must_use]
    pub fn system() -> Self {
        Self {
            regular: load_font_from_paths(FONT_SEARCH_PATHS, "regular"),
            bold: load_font_from_paths(FONT_BOLD_SEARCH_PATHS, "bold"),
            italic: load_font_from_paths(FONT_ITALIC_SEARCH_PATHS, "italic"),
            bold_italic: load_font_from_paths(FONT_BOLD_ITALIC_SEARCH_PATHS, "bold-italic"),
        }
    }

    /// A provider over a regular face given as font file bytes.
    ///
    /// # Errors
    ///
    /// Returns fontdue's message when the bytes are not a usable font.
    pub fn from_bytes(data: &[u8]) -> Result<Self, &'static str> {
        let font = Font::from_bytes(data, FontSettings::default())?;
        Ok(Self {
            regular: Some(Rc::new(font)),
            ..Self::default()
        })
    }

    /// Whether any face was found.
    #[must_use]
    pub fn has_faces(&self) -> bool {
        self.regular.is_some()
            || self.bold.is_some()
            || self.italic.is_some()
            || self.bold_italic.is_some()
    }

    /// The closest loaded face for a weight and slant.
    fn face(&self, weight: FontWeight, slant: FontSlant) -> Option<&Rc<Font>> {
        let candidates = match (weight, slant) {
            (FontWeight::Normal, FontSlant::Roman) => [&self.regular, &self.bold, &self.italic],
            (FontWeight::Bold, FontSlant::Roman) => [&self.bold, &self.regular, &self.bold_italic],
            (FontWeight::Normal, FontSlant::Italic) => {
                [&self.italic, &self.regular, &self.bold_italic]
            }
            (FontWeight::Bold, FontSlant::Italic) => [&self.bold_italic, &self.bold, &self.italic],
        };
        candidates
            .into_iter()
            .find_map(Option::as_ref)
            .or(self.regular.as_ref())
    }
}

impl FontProvider for FontdueFonts {
    fn load(&self, key: FontKey) -> Rc<dyn FontMetrics> {
        let size = key.size as f32;
        match self.face(key.weight, key.slant) {
            Some(font) => Rc::new(FontdueFontMetrics::new(Rc::clone(font), size)),
            None => {
                warn_once("Fonts", "no system font found, using approximate metrics");
                Rc::new(ApproximateFontMetrics::new(size))
            }
        }
    }
}

/// Try to load a font from a list of filesystem paths.
fn load_font_from_paths(paths: &[&str], label: &str) -> Option<Rc<Font>> {
    for path in paths {
        if let Ok(data) = std::fs::read(path)
            && let Ok(font) = Font::from_bytes(data, FontSettings::default())
        {
            log::debug!("loaded {label} font: {path}");
            return Some(Rc::new(font));
        }
    }
    None
}
