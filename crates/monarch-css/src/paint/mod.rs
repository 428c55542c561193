//! Painting.
//!
//! Converts a layout tree into a display list of drawing commands. The list
//! is consumed by whatever rasterizes the page; painting itself never draws.
//!
//! ```text
//! Style → Layout → Paint → Rasterize
//!                    ↓
//!              DisplayList
//! ```

mod display_list;
mod painter;

pub use display_list::{DisplayList, DrawCommand};
pub use painter::Painter;
