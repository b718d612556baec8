//! Public API for richtext
//!
//! This module provides the stable entry points for turning an HTML-subset
//! source string into a styled-run document.
//!
//! # Example
//!
//! ```
//! use richtext::api::parse_with_links;
//! use richtext::attributed::TextStyleOptions;
//!
//! let result = parse_with_links(
//!   r#"Click <a href="https://example.com">here</a>"#,
//!   &TextStyleOptions::default(),
//! );
//!
//! assert_eq!(result.runs.len(), 2);
//! assert_eq!(result.link_urls, ["", "https://example.com"]);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! source → normalize_inter_tag_whitespace → parse_to_segments
//!        → build_attributed_string → { runs, link_urls, accessibility_label }
//! ```
//!
//! Every call is a pure function of its arguments: no shared state, no
//! I/O, no failure paths. Callers that cache results across layout passes
//! own their own keying and locking.

use crate::attributed::{build_attributed_string, AttributedString, TextStyleOptions};
use crate::html::normalize::normalize_inter_tag_whitespace;
use crate::html::segment::parse_to_segments;

/// Everything a view layer needs from one parse.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
  /// Styled fragments in source order.
  pub runs: AttributedString,
  /// URL per fragment, "" in non-link slots; same length as `runs`.
  pub link_urls: Vec<String>,
  /// Screen-reader rendition of the text.
  pub accessibility_label: String,
}

/// Parses markup into styled runs plus the link-URL array and the
/// accessibility label. Empty input yields an empty result.
pub fn parse_with_links(source: &str, options: &TextStyleOptions) -> ParseResult {
  let mut result = ParseResult::default();

  if source.is_empty() {
    return result;
  }

  let normalized = normalize_inter_tag_whitespace(source);
  let segments = parse_to_segments(&normalized);
  if segments.is_empty() {
    return result;
  }

  let built = build_attributed_string(&segments, options);
  result.runs = built.attributed_string;
  result.link_urls = built.link_urls;
  result.accessibility_label = built.accessibility_label;

  result
}

/// Parses markup into styled runs only.
pub fn parse_to_attributed(source: &str, options: &TextStyleOptions) -> AttributedString {
  parse_with_links(source, options).runs
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_input_yields_empty_result() {
    let result = parse_with_links("", &TextStyleOptions::default());
    assert!(result.runs.is_empty());
    assert!(result.link_urls.is_empty());
    assert!(result.accessibility_label.is_empty());
  }

  #[test]
  fn parse_to_attributed_matches_parse_with_links() {
    let source = "Hello <b>bold</b> world";
    let options = TextStyleOptions::default();
    assert_eq!(
      parse_to_attributed(source, &options),
      parse_with_links(source, &options).runs
    );
  }

  #[test]
  fn pretty_printed_markup_has_no_stray_gaps() {
    let source = "<div>\n  <p>one</p>\n  <p>two</p>\n</div>";
    let result = parse_with_links(source, &TextStyleOptions::default());
    let text = result.runs.plain_text();
    assert!(!text.contains("  "));
    assert!(text.contains("one"));
    assert!(text.contains("two"));
  }
}
