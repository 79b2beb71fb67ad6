//! # frame_style - Slotframe Text Styling
//!
//! Turns raw titles, names and lore into viewer-specific text:
//! - **Style sheets**: viewer, custom placeholders and small caps defaults
//! - **Colors**: legacy section codes or MiniMessage tags
//! - **Small caps**: version-keyed font maps with `<caps>` / `<no-caps>` scoping
//! - **Engine**: the [`StyleEngine`] seam and its default implementation
//!
//! ## Example
//!
//! ```ignore
//! use frame_style::prelude::*;
//!
//! let engine = DefaultStyleEngine::default();
//! let sheet = StyleSheet::new().with_placeholder("{shop}", "Market");
//! let title = engine.apply_style("&6{shop}", &sheet, true);
//! ```

pub mod caps;
pub mod color;
pub mod engine;
pub mod error;
pub mod sheet;

pub use caps::{to_small_caps, FontMap, FontMaps};
pub use color::ColorMode;
pub use engine::{DefaultStyleEngine, PlaceholderResolver, StyleEngine};
pub use error::{Result, StyleError};
pub use sheet::{StyleSheet, StylishFlags, Viewer};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::caps::FontMaps;
    pub use crate::color::ColorMode;
    pub use crate::engine::{DefaultStyleEngine, PlaceholderResolver, StyleEngine};
    pub use crate::sheet::{StyleSheet, StylishFlags, Viewer};
}
