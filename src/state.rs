//! State envelope for handing parse results to a view layer
//!
//! The envelope is a map-like container keyed by small integer codes, so a
//! view process can pick out the pieces it needs without knowing the full
//! shape. The link-URL array travels as a fragment-index → URL map with
//! empty slots elided, and a hash over the fragments lets consumers skip
//! re-processing unchanged content.
//!
//! The core is agnostic to the concrete wire encoding; [`TextState`]
//! serializes with serde (the integer key codes become JSON object keys),
//! and other encoders can walk the same structure.

use std::collections::BTreeMap;
use std::hash::Hasher;

use rustc_hash::FxHasher;
use serde::Serialize;

use crate::attributed::AttributedString;
use crate::error::Result;
use crate::style::color::Rgba;

/// Envelope key for the attributed string.
pub const STATE_KEY_ATTRIBUTED_STRING: u32 = 0;
/// Envelope key for the paragraph attributes.
pub const STATE_KEY_PARAGRAPH_ATTRIBUTES: u32 = 1;
/// Envelope key for the change-detection hash.
pub const STATE_KEY_HASH: u32 = 2;
/// Envelope key for the link-URL map.
pub const STATE_KEY_LINK_URLS: u32 = 3;

/// Paragraph-level attributes carried opaquely by the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphAttributes {
  /// Maximum number of lines before truncation; 0 means unlimited.
  pub maximum_number_of_lines: u32,
  /// Whether the text may shrink to fit its container.
  pub adjusts_font_size_to_fit: bool,
}

/// The serializable parse-result state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextState {
  #[serde(rename = "0")]
  pub attributed_string: AttributedString,
  #[serde(rename = "1")]
  pub paragraph_attributes: ParagraphAttributes,
  #[serde(rename = "2")]
  pub hash: u64,
  /// Fragment index → URL, empty slots elided.
  #[serde(rename = "3", skip_serializing_if = "BTreeMap::is_empty")]
  pub link_urls: BTreeMap<usize, String>,
}

impl TextState {
  /// Packs an attributed string and its parallel link-URL array into an
  /// envelope. `link_urls` must be index-parallel with the fragments;
  /// empty slots are elided from the map.
  pub fn new(
    attributed_string: AttributedString,
    paragraph_attributes: ParagraphAttributes,
    link_urls: &[String],
  ) -> Self {
    let link_urls = link_urls
      .iter()
      .enumerate()
      .filter(|(_, url)| !url.is_empty())
      .map(|(index, url)| (index, url.clone()))
      .collect();
    let hash = fragments_hash(&attributed_string);

    Self {
      attributed_string,
      paragraph_attributes,
      hash,
      link_urls,
    }
  }

  /// Serializes the envelope to JSON.
  pub fn to_json(&self) -> Result<String> {
    Ok(serde_json::to_string(self)?)
  }
}

/// Hashes the fragment vector for change detection. Two attributed
/// strings with identical text and attributes hash identically.
pub fn fragments_hash(attributed: &AttributedString) -> u64 {
  let mut hasher = FxHasher::default();

  for fragment in attributed.fragments() {
    hasher.write(fragment.text.as_bytes());

    let attrs = &fragment.attributes;
    hasher.write_u32(attrs.font_size.to_bits());
    hasher.write_u32(attrs.line_height.to_bits());
    hasher.write_u8(attrs.font_weight as u8);
    hasher.write_u8(attrs.font_style as u8);
    hasher.write_u8(attrs.text_decoration_line as u8);
    match &attrs.font_family {
      Some(family) => hasher.write(family.as_bytes()),
      None => hasher.write_u8(0),
    }
    hasher.write_u32(attrs.letter_spacing.map(f32::to_bits).unwrap_or(0));
    hasher.write_u32(attrs.foreground_color.map(Rgba::to_argb).unwrap_or(0));
    hasher.write_u8(u8::from(attrs.allow_font_scaling));
    hasher.write_u8(attrs.writing_direction as u8);
  }

  hasher.finish()
}
