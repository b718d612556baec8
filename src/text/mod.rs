//! Writing-direction support (classification and nesting context)

pub mod direction;
pub mod unicode;

pub use direction::DirectionContext;
pub use unicode::{
  detect_direction_from_bytes, detect_direction_from_text, is_strong_ltr, is_strong_rtl,
  parse_direction_attribute, WritingDirection,
};
