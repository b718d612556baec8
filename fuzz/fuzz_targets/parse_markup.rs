#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use richtext::api::parse_with_links;
use richtext::attributed::TextStyleOptions;
use richtext::html::attrs::is_allowed_url_scheme;
use richtext::strip_tags;

#[derive(Debug, Arbitrary)]
struct ParseCase {
  source: String,
  base_font_size: f32,
  font_size_multiplier: f32,
  allow_font_scaling: bool,
  max_font_size_multiplier: f32,
  line_height: f32,
  color: u32,
  tag_styles: String,
}

fuzz_target!(|case: ParseCase| {
  let options = TextStyleOptions {
    base_font_size: case.base_font_size,
    font_size_multiplier: case.font_size_multiplier,
    allow_font_scaling: case.allow_font_scaling,
    max_font_size_multiplier: case.max_font_size_multiplier,
    line_height: case.line_height,
    color: case.color,
    tag_styles: case.tag_styles,
    ..Default::default()
  };

  let result = parse_with_links(&case.source, &options);

  // Parallel arrays, safe schemes only, and no markup in the label;
  // these hold for arbitrary input, not just well-formed markup.
  assert_eq!(result.link_urls.len(), result.runs.len());
  for url in &result.link_urls {
    assert!(url.is_empty() || is_allowed_url_scheme(url));
  }
  assert!(!result.accessibility_label.contains('<'));
  assert!(!result.accessibility_label.contains('>'));

  let _ = strip_tags(&case.source);
});
