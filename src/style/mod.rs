//! Style extraction (colors and per-tag overrides)

pub mod color;
pub mod tag_styles;

pub use color::{parse_hex_color, Rgba};
pub use tag_styles::{style_for_tag, TagStyle};
