//! High-level browser API for the Monarch renderer.
//!
//! # Scope
//!
//! This crate provides:
//! - **Tabs** - load a document by URL or from a string, and keep its
//!   styles, box tree and display list current
//! - **Interaction** - link navigation, input focus and typing
//! - **Scrolling** - step size, clamping and scrollbar thumb geometry
//! - **Script bridge** - selector queries, attribute reads and
//!   `innerHTML`-style replacement on the live document
//! - **Fonts** - system faces measured with fontdue
//!
//! # Not Implemented
//!
//! - Rasterization and window events; callers draw the display list
//! - A JavaScript engine; the script bridge is called from Rust
//! - History and multiple tabs

pub mod config;
pub mod font_metrics;
pub mod scroll;
pub mod tab;

pub use monarch_common as common;
pub use monarch_css as css;
pub use monarch_dom as dom;
pub use monarch_html as html;

pub use config::BrowserConfig;
pub use font_metrics::{FontdueFontMetrics, FontdueFonts};
pub use scroll::{ScrollState, Scrollbar};
pub use tab::{ClickOutcome, Tab};

use monarch_common::{FetchError, UrlError};
use thiserror::Error;

/// Error type for document loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The address could not be parsed or resolved.
    #[error("bad URL: {0}")]
    Url(#[from] UrlError),
    /// The document could not be fetched.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
}
