//! Per-tag style override lookup
//!
//! Callers can pass a JSON-shaped blob mapping tag names to style objects,
//! e.g. `{"b":{"color":"#CC0000","fontSize":18}}`. The blob does not have
//! to be strict JSON; lookups are plain string scans with a string-aware
//! brace matcher, which is both faster and more tolerant of non-strict
//! input than a full JSON parse.
//!
//! Recognized keys: `color`, `fontSize`, `fontWeight`, `fontStyle`,
//! `textDecorationLine`. Anything else in the object is ignored.

use crate::style::color::parse_hex_color;

/// Style overrides extracted for a single tag.
///
/// Sentinels mark unset values: `0` for `color`, NaN for `font_size`, and
/// the empty string for the rest.
#[derive(Debug, Clone)]
pub struct TagStyle {
  /// Packed ARGB color; `0` means not set.
  pub color: u32,
  /// Font size in points; NaN means not set.
  pub font_size: f32,
  /// Raw `fontWeight` value ("bold", "700", ...); empty means not set.
  pub font_weight: String,
  /// Raw `fontStyle` value ("italic", "normal"); empty means not set.
  pub font_style: String,
  /// Raw `textDecorationLine` value; empty means not set.
  pub text_decoration_line: String,
}

impl Default for TagStyle {
  fn default() -> Self {
    Self {
      color: 0,
      font_size: f32::NAN,
      font_weight: String::new(),
      font_style: String::new(),
      text_decoration_line: String::new(),
    }
  }
}

/// Extracts a double-quoted string value for `key` from a style object
/// substring. Returns "" when the key is missing or the value is not a
/// quoted string.
pub fn string_value(style_obj: &str, key: &str) -> String {
  let search_key = format!("\"{key}\"");
  let Some(key_pos) = style_obj.find(&search_key) else {
    return String::new();
  };
  let Some(colon_rel) = style_obj[key_pos..].find(':') else {
    return String::new();
  };

  let bytes = style_obj.as_bytes();
  let mut value_start = key_pos + colon_rel + 1;
  while value_start < bytes.len() && bytes[value_start].is_ascii_whitespace() {
    value_start += 1;
  }
  if value_start >= bytes.len() || bytes[value_start] != b'"' {
    return String::new();
  }

  match style_obj[value_start + 1..].find('"') {
    Some(len) => style_obj[value_start + 1..value_start + 1 + len].to_string(),
    None => String::new(),
  }
}

/// Extracts a numeric value for `key` from a style object substring.
/// Returns NaN when the key is missing or the value does not parse.
pub fn numeric_value(style_obj: &str, key: &str) -> f32 {
  let search_key = format!("\"{key}\"");
  let Some(key_pos) = style_obj.find(&search_key) else {
    return f32::NAN;
  };
  let Some(colon_rel) = style_obj[key_pos..].find(':') else {
    return f32::NAN;
  };

  let bytes = style_obj.as_bytes();
  let mut pos = key_pos + colon_rel + 1;
  while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
    pos += 1;
  }

  let start = pos;
  while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'.' || bytes[pos] == b'-') {
    pos += 1;
  }
  if pos == start {
    return f32::NAN;
  }

  style_obj[start..pos].parse().unwrap_or(f32::NAN)
}

/// Looks up the style object for `tag_name` inside a tag-styles blob and
/// extracts the recognized keys.
///
/// The object is located by finding `"tag_name"`, then the next `{`, then
/// brace-matching to the closing `}`. The matcher tracks single- and
/// double-quoted strings and honors backslash-escaped delimiters, so braces
/// inside quoted values do not unbalance it. An unbalanced object yields
/// the default (all-unset) style.
pub fn style_for_tag(tag_styles: &str, tag_name: &str) -> TagStyle {
  let mut result = TagStyle::default();

  if tag_styles.is_empty() || tag_name.is_empty() {
    return result;
  }

  let search_pattern = format!("\"{tag_name}\"");
  let Some(tag_pos) = tag_styles.find(&search_pattern) else {
    return result;
  };
  let Some(brace_rel) = tag_styles[tag_pos..].find('{') else {
    return result;
  };
  let brace_start = tag_pos + brace_rel;

  let bytes = tag_styles.as_bytes();
  let mut brace_count = 1i32;
  let mut end = brace_start + 1;
  let mut in_string = false;
  let mut string_delimiter = 0u8;
  while end < bytes.len() && brace_count > 0 {
    let b = bytes[end];
    if !in_string && (b == b'"' || b == b'\'') {
      in_string = true;
      string_delimiter = b;
    } else if in_string && b == string_delimiter && bytes[end - 1] != b'\\' {
      in_string = false;
    }
    if !in_string {
      if b == b'{' {
        brace_count += 1;
      } else if b == b'}' {
        brace_count -= 1;
      }
    }
    end += 1;
  }
  if brace_count != 0 {
    return result;
  }

  let style_obj = &tag_styles[brace_start..end];

  let color_value = string_value(style_obj, "color");
  if !color_value.is_empty() {
    result.color = parse_hex_color(&color_value);
  }
  result.font_size = numeric_value(style_obj, "fontSize");
  result.font_weight = string_value(style_obj, "fontWeight");
  result.font_style = string_value(style_obj, "fontStyle");
  result.text_decoration_line = string_value(style_obj, "textDecorationLine");

  result
}
