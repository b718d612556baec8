//! Writing-direction classification
//!
//! This module implements the small slice of bidirectional text support the
//! parser needs: classifying a code point as strongly right-to-left or
//! strongly left-to-right, and scanning a text run for its *first strong*
//! character to resolve `dir="auto"`.
//!
//! The classifier intentionally covers only the script blocks that matter
//! for direction detection in practice, rather than the full set of Unicode
//! directional categories:
//!
//! - **Strong RTL**: Hebrew, Arabic (plus supplements and extended blocks),
//!   Syriac, Thaana, N'Ko, and the Hebrew/Arabic presentation forms.
//! - **Strong LTR**: Basic Latin letters, Latin Extended A/B/Additional,
//!   Greek, Cyrillic, and Georgian.
//!
//! Digits, punctuation, and whitespace are directionally neutral and are
//! skipped by the first-strong scan.
//!
//! # References
//!
//! - [UAX #9: Unicode Bidirectional Algorithm](https://www.unicode.org/reports/tr9/)

use serde::Serialize;

/// Writing direction for a run of text.
///
/// `Natural` means "no explicit direction": the run inherits whatever the
/// surrounding context provides. It is both the initial parser state and the
/// result of an element with no `dir` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritingDirection {
  /// Inherit the surrounding direction.
  #[default]
  Natural,

  /// Left-to-right (Latin, Greek, Cyrillic, ...).
  LeftToRight,

  /// Right-to-left (Hebrew, Arabic, ...).
  RightToLeft,
}

/// Returns true if the code point is strongly right-to-left.
pub fn is_strong_rtl(codepoint: u32) -> bool {
  matches!(
    codepoint,
    // Hebrew
    0x0590..=0x05FF
    // Arabic
    | 0x0600..=0x06FF
    // Syriac
    | 0x0700..=0x074F
    // Arabic Supplement
    | 0x0750..=0x077F
    // Thaana
    | 0x0780..=0x07BF
    // N'Ko
    | 0x07C0..=0x07FF
    // Arabic Extended-A
    | 0x08A0..=0x08FF
    // Hebrew Presentation Forms
    | 0xFB1D..=0xFB4F
    // Arabic Presentation Forms-A
    | 0xFB50..=0xFDFF
    // Arabic Presentation Forms-B
    | 0xFE70..=0xFEFF
  )
}

/// Returns true if the code point is strongly left-to-right.
pub fn is_strong_ltr(codepoint: u32) -> bool {
  matches!(
    codepoint,
    // Basic Latin letters
    0x0041..=0x005A
    | 0x0061..=0x007A
    // Latin Extended-A/B
    | 0x00C0..=0x024F
    // Greek
    | 0x0370..=0x03FF
    // Cyrillic
    | 0x0400..=0x04FF
    // Georgian
    | 0x10A0..=0x10FF
    // Latin Extended Additional
    | 0x1E00..=0x1EFF
  )
}

/// Detects the writing direction of a byte buffer from its first strong
/// directional character.
///
/// The buffer is decoded as UTF-8 one scalar at a time. An invalid lead
/// byte is skipped; a sequence truncated by the end of the buffer stops the
/// scan. Neutral characters (digits, punctuation, whitespace) are skipped.
/// If no strong character is found, the result is
/// [`WritingDirection::LeftToRight`].
pub fn detect_direction_from_bytes(bytes: &[u8]) -> WritingDirection {
  let mut i = 0usize;
  while i < bytes.len() {
    let lead = bytes[i];

    let codepoint: u32;
    if lead < 0x80 {
      codepoint = u32::from(lead);
      i += 1;
    } else if (lead & 0xE0) == 0xC0 {
      if i + 1 >= bytes.len() {
        break;
      }
      codepoint = (u32::from(lead & 0x1F) << 6) | u32::from(bytes[i + 1] & 0x3F);
      i += 2;
    } else if (lead & 0xF0) == 0xE0 {
      if i + 2 >= bytes.len() {
        break;
      }
      codepoint = (u32::from(lead & 0x0F) << 12)
        | (u32::from(bytes[i + 1] & 0x3F) << 6)
        | u32::from(bytes[i + 2] & 0x3F);
      i += 3;
    } else if (lead & 0xF8) == 0xF0 {
      if i + 3 >= bytes.len() {
        break;
      }
      codepoint = (u32::from(lead & 0x07) << 18)
        | (u32::from(bytes[i + 1] & 0x3F) << 12)
        | (u32::from(bytes[i + 2] & 0x3F) << 6)
        | u32::from(bytes[i + 3] & 0x3F);
      i += 4;
    } else {
      // Invalid lead byte, skip it.
      i += 1;
      continue;
    }

    if is_strong_rtl(codepoint) {
      return WritingDirection::RightToLeft;
    }
    if is_strong_ltr(codepoint) {
      return WritingDirection::LeftToRight;
    }
  }

  WritingDirection::LeftToRight
}

/// Detects the writing direction of a string from its first strong
/// directional character.
///
/// See [`detect_direction_from_bytes`] for the scan rules.
///
/// # Examples
///
/// ```
/// use richtext::text::unicode::{detect_direction_from_text, WritingDirection};
///
/// assert_eq!(
///   detect_direction_from_text("שלום world"),
///   WritingDirection::RightToLeft
/// );
/// assert_eq!(
///   detect_direction_from_text("123 hello"),
///   WritingDirection::LeftToRight
/// );
/// ```
pub fn detect_direction_from_text(text: &str) -> WritingDirection {
  detect_direction_from_bytes(text.as_bytes())
}

/// Parses a `dir` attribute value.
///
/// `"rtl"` and `"ltr"` (case-insensitive) map to the corresponding
/// direction. `"auto"` and every other value map to
/// [`WritingDirection::Natural`]; the `auto` sentinel is resolved by the
/// caller with [`detect_direction_from_text`] on a look-ahead slice.
pub fn parse_direction_attribute(value: &str) -> WritingDirection {
  if value.eq_ignore_ascii_case("rtl") {
    WritingDirection::RightToLeft
  } else if value.eq_ignore_ascii_case("ltr") {
    WritingDirection::LeftToRight
  } else {
    WritingDirection::Natural
  }
}
