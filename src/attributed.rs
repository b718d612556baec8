//! Attributed-string assembly
//!
//! Takes the parsed segment vector and resolves each segment into a final
//! output fragment: font size scaling, per-tag overrides, text-decoration
//! resolution, color priority, and link coloring. Also composes the
//! screen-reader label from the emitted text.
//!
//! # Resolution order
//!
//! For every attribute the precedence is the same: a per-tag override from
//! the caller's tag-styles blob wins, then the style derived from the
//! markup itself, then the caller's base values.
//!
//! # Color priority
//!
//! `tagStyle.color` if set, else the default link color for link segments,
//! else the caller's base color. A segment only counts as a link when its
//! `<a href>` passed the scheme allowlist, so the link color can never be
//! applied to a rejected URL.

use serde::Serialize;

use crate::html::normalize::{is_paragraph_break, normalize_segment_text};
use crate::html::segment::TextSegment;
use crate::style::color::Rgba;
use crate::style::tag_styles::{style_for_tag, TagStyle};
use crate::text::unicode::WritingDirection;

/// Default link color (iOS system blue), packed ARGB.
pub const DEFAULT_LINK_COLOR: u32 = 0xFF007AFF;

/// Buffer added to the font size when no explicit line height applies.
pub const LINE_HEIGHT_BUFFER: f32 = 4.0;

/// Resolved font weight for a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
  #[default]
  Regular,
  Bold,
}

/// Resolved font style for a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
  #[default]
  Normal,
  Italic,
}

/// Resolved text decoration for a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecorationLineType {
  #[default]
  None,
  Underline,
  Strikethrough,
  UnderlineStrikethrough,
}

/// The self-contained style record attached to one output fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAttributes {
  pub font_size: f32,
  pub line_height: f32,
  pub font_weight: FontWeight,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub font_family: Option<String>,
  pub font_style: FontStyle,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub letter_spacing: Option<f32>,
  pub text_decoration_line: TextDecorationLineType,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub foreground_color: Option<Rgba>,
  pub allow_font_scaling: bool,
  pub writing_direction: WritingDirection,
}

impl Default for TextAttributes {
  fn default() -> Self {
    Self {
      font_size: 14.0,
      line_height: 14.0 + LINE_HEIGHT_BUFFER,
      font_weight: FontWeight::Regular,
      font_family: None,
      font_style: FontStyle::Normal,
      letter_spacing: None,
      text_decoration_line: TextDecorationLineType::None,
      foreground_color: None,
      allow_font_scaling: true,
      writing_direction: WritingDirection::Natural,
    }
  }
}

/// One output fragment: a text run plus its style record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fragment {
  pub text: String,
  pub attributes: TextAttributes,
}

/// An ordered sequence of styled fragments.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct AttributedString {
  fragments: Vec<Fragment>,
}

impl AttributedString {
  pub fn push_fragment(&mut self, fragment: Fragment) {
    self.fragments.push(fragment);
  }

  pub fn fragments(&self) -> &[Fragment] {
    &self.fragments
  }

  pub fn len(&self) -> usize {
    self.fragments.len()
  }

  pub fn is_empty(&self) -> bool {
    self.fragments.is_empty()
  }

  /// Concatenation of all fragment texts, in order.
  pub fn plain_text(&self) -> String {
    let mut text = String::new();
    for fragment in &self.fragments {
      text.push_str(&fragment.text);
    }
    text
  }
}

/// Caller-level styling parameters for [`build_attributed_string`].
///
/// Unset sentinels follow the platform conventions: NaN for the float
/// knobs, "" for the string knobs, and `0` for the packed color.
#[derive(Debug, Clone)]
pub struct TextStyleOptions {
  /// Base font size in points.
  pub base_font_size: f32,
  /// Accessibility font scale multiplier.
  pub font_size_multiplier: f32,
  /// Whether the multiplier applies at all.
  pub allow_font_scaling: bool,
  /// Cap for the multiplier; NaN or values `<= 0` mean "no cap".
  pub max_font_size_multiplier: f32,
  /// Explicit line height; NaN or values `<= 0` mean "derive from font
  /// size".
  pub line_height: f32,
  /// Base font weight ("bold", "700", ...); "" means regular.
  pub font_weight: String,
  /// Base font family; "" means platform default.
  pub font_family: String,
  /// Base font style ("italic"); "" means normal.
  pub font_style: String,
  /// Letter spacing; NaN means unset.
  pub letter_spacing: f32,
  /// Base text color, packed ARGB; 0 means unset.
  pub color: u32,
  /// JSON-shaped per-tag style override blob; "" disables overrides.
  pub tag_styles: String,
}

impl Default for TextStyleOptions {
  fn default() -> Self {
    Self {
      base_font_size: 14.0,
      font_size_multiplier: 1.0,
      allow_font_scaling: true,
      max_font_size_multiplier: f32::NAN,
      line_height: f32::NAN,
      font_weight: String::new(),
      font_family: String::new(),
      font_style: String::new(),
      letter_spacing: f32::NAN,
      color: 0,
      tag_styles: String::new(),
    }
  }
}

/// Result of building an attributed string.
#[derive(Debug, Clone, Default)]
pub struct AttributedStringResult {
  pub attributed_string: AttributedString,
  /// URL per fragment, "" in non-link slots; always the same length as
  /// the fragment vector.
  pub link_urls: Vec<String>,
  /// Screen-reader friendly rendition of the text with pauses between
  /// list items.
  pub accessibility_label: String,
}

fn is_bold_weight(weight: &str) -> bool {
  matches!(weight, "bold" | "700" | "800" | "900")
}

/// Builds the final fragments, link-URL array, and accessibility label
/// from parsed segments.
pub fn build_attributed_string(
  segments: &[TextSegment],
  options: &TextStyleOptions,
) -> AttributedStringResult {
  let mut result = AttributedStringResult::default();

  if segments.is_empty() {
    return result;
  }

  // Trailing paragraph-break segments contribute nothing visible.
  let mut end = segments.len();
  while end > 0 && is_paragraph_break(&segments[end - 1].text) {
    end -= 1;
  }
  let working = &segments[..end];
  if working.is_empty() {
    return result;
  }

  let effective_multiplier = if options.allow_font_scaling {
    if !options.max_font_size_multiplier.is_nan() && options.max_font_size_multiplier > 0.0 {
      options
        .font_size_multiplier
        .min(options.max_font_size_multiplier)
    } else {
      options.font_size_multiplier
    }
  } else {
    1.0
  };

  for (index, segment) in working.iter().enumerate() {
    let is_break = is_paragraph_break(&segment.text);
    let mut text =
      normalize_segment_text(&segment.text, is_break, segment.follows_inline_element);

    if index == working.len() - 1 {
      text.truncate(text.trim_end_matches(|c: char| c.is_ascii_whitespace()).len());
    }

    if text.is_empty() {
      continue;
    }

    let tag_style = if !segment.parent_tag.is_empty() && !options.tag_styles.is_empty() {
      style_for_tag(&options.tag_styles, &segment.parent_tag)
    } else {
      TagStyle::default()
    };

    let mut font_size = options.base_font_size * segment.font_scale * effective_multiplier;
    if !tag_style.font_size.is_nan() && tag_style.font_size > 0.0 {
      font_size = tag_style.font_size * effective_multiplier;
    }

    let min_line_height = font_size + LINE_HEIGHT_BUFFER;
    let line_height = if !options.line_height.is_nan() && options.line_height > 0.0 {
      options.line_height.max(min_line_height)
    } else {
      min_line_height
    };

    let mut is_bold = segment.is_bold;
    if !tag_style.font_weight.is_empty() {
      is_bold = is_bold_weight(&tag_style.font_weight);
    }
    let font_weight = if is_bold || is_bold_weight(&options.font_weight) {
      FontWeight::Bold
    } else {
      FontWeight::Regular
    };

    let mut is_italic = segment.is_italic;
    if !tag_style.font_style.is_empty() {
      is_italic = tag_style.font_style == "italic";
    }
    let font_style = if is_italic || options.font_style == "italic" {
      FontStyle::Italic
    } else {
      FontStyle::Normal
    };

    let mut has_underline = segment.is_underline;
    let mut has_strikethrough = segment.is_strikethrough;
    match tag_style.text_decoration_line.as_str() {
      "underline" => {
        has_underline = true;
        has_strikethrough = false;
      }
      "line-through" => {
        has_underline = false;
        has_strikethrough = true;
      }
      "underline line-through" | "line-through underline" => {
        has_underline = true;
        has_strikethrough = true;
      }
      "none" => {
        has_underline = false;
        has_strikethrough = false;
      }
      _ => {}
    }
    let text_decoration_line = match (has_underline, has_strikethrough) {
      (true, true) => TextDecorationLineType::UnderlineStrikethrough,
      (true, false) => TextDecorationLineType::Underline,
      (false, true) => TextDecorationLineType::Strikethrough,
      (false, false) => TextDecorationLineType::None,
    };

    let mut color = tag_style.color;
    if color == 0 {
      if segment.is_link {
        color = DEFAULT_LINK_COLOR;
      } else if options.color != 0 {
        color = options.color;
      }
    }

    let attributes = TextAttributes {
      font_size,
      line_height,
      font_weight,
      font_family: (!options.font_family.is_empty()).then(|| options.font_family.clone()),
      font_style,
      letter_spacing: (!options.letter_spacing.is_nan()).then_some(options.letter_spacing),
      text_decoration_line,
      foreground_color: (color != 0).then(|| Rgba::from_argb(color)),
      allow_font_scaling: options.allow_font_scaling,
      writing_direction: segment.writing_direction,
    };

    result.attributed_string.push_fragment(Fragment { text, attributes });
    result.link_urls.push(segment.link_url.clone());
  }

  result.accessibility_label =
    build_accessibility_label(&result.attributed_string.plain_text());

  result
}

/// Builds the screen-reader label from plain text.
///
/// Inserts a `.` immediately before each `\n` that precedes a list-item
/// marker (an ASCII digit or a bullet), unless the character emitted just
/// before is already a sentence terminator. The pause keeps screen
/// readers from running consecutive list items together.
pub fn build_accessibility_label(plain_text: &str) -> String {
  let mut label = String::with_capacity(plain_text.len() + 16);
  let mut chars = plain_text.chars().peekable();

  while let Some(c) = chars.next() {
    if c == '\n' {
      if let Some(&next) = chars.peek() {
        let is_list_marker = next.is_ascii_digit() || next == '\u{2022}';
        if is_list_marker {
          if let Some(&last) = label.as_bytes().last() {
            if !matches!(last, b'.' | b'!' | b'?' | b':' | b';') {
              label.push('.');
            }
          }
        }
      }
    }
    label.push(c);
  }

  label
}
