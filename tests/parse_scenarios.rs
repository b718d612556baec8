//! End-to-end scenarios for the parse facade.

use richtext::api::parse_with_links;
use richtext::attributed::{
  FontWeight, TextDecorationLineType, TextStyleOptions, DEFAULT_LINK_COLOR,
};
use richtext::style::color::Rgba;
use richtext::text::unicode::WritingDirection;

fn fragment_texts(result: &richtext::api::ParseResult) -> Vec<&str> {
  result
    .runs
    .fragments()
    .iter()
    .map(|f| f.text.as_str())
    .collect()
}

#[test]
fn bold_with_inline_boundary() {
  let options = TextStyleOptions {
    base_font_size: 14.0,
    ..Default::default()
  };
  let result = parse_with_links("Hello <b>bold</b> world", &options);

  assert_eq!(fragment_texts(&result), ["Hello ", "bold", " world"]);
  let fragments = result.runs.fragments();
  assert_eq!(fragments[0].attributes.font_weight, FontWeight::Regular);
  assert_eq!(fragments[1].attributes.font_weight, FontWeight::Bold);
  assert_eq!(fragments[2].attributes.font_weight, FontWeight::Regular);
  // The space after </b> survives normalization.
  assert!(fragments[2].text.starts_with(' '));
  assert_eq!(result.link_urls, ["", "", ""]);
}

#[test]
fn safe_link_gets_url_underline_and_color() {
  let result = parse_with_links(
    r#"Click <a href="https://ex.com">here</a> now"#,
    &TextStyleOptions::default(),
  );

  assert_eq!(fragment_texts(&result), ["Click ", "here", " now"]);
  assert_eq!(result.link_urls, ["", "https://ex.com", ""]);

  let link = &result.runs.fragments()[1];
  assert_eq!(
    link.attributes.text_decoration_line,
    TextDecorationLineType::Underline
  );
  assert_eq!(
    link.attributes.foreground_color,
    Some(Rgba::from_argb(DEFAULT_LINK_COLOR))
  );
}

#[test]
fn dangerous_scheme_is_rejected() {
  let result = parse_with_links(
    r#"X <a href="javascript:alert(1)">Y</a> Z"#,
    &TextStyleOptions::default(),
  );

  assert_eq!(fragment_texts(&result), ["X ", "Y", " Z"]);
  assert_eq!(result.link_urls, ["", "", ""]);

  let middle = &result.runs.fragments()[1];
  assert_eq!(
    middle.attributes.text_decoration_line,
    TextDecorationLineType::None
  );
  assert_eq!(middle.attributes.foreground_color, None);
}

#[test]
fn unclosed_link_does_not_cross_block_boundary() {
  let result = parse_with_links(
    r#"<p><a href="https://ex.com">one</p><p>two</p>"#,
    &TextStyleOptions::default(),
  );

  let fragments = result.runs.fragments();
  assert!(fragments.len() >= 2);

  let two_index = fragments
    .iter()
    .position(|f| f.text.contains("two"))
    .expect("run containing 'two'");
  assert_eq!(result.link_urls[two_index], "");
}

#[test]
fn ordered_list_with_screen_reader_label() {
  let result = parse_with_links("<ol><li>A</li><li>B</li></ol>", &TextStyleOptions::default());

  let text = result.runs.plain_text();
  assert!(text.starts_with("1. A.\n2. B."));

  assert_eq!(result.accessibility_label, "1. A.\n2. B.");
  assert!(!result.accessibility_label.contains('<'));
  assert!(!result.accessibility_label.contains('>'));
}

#[test]
fn bdo_override_wraps_and_sets_direction() {
  let result = parse_with_links(
    r#"abc<bdo dir="rtl">def</bdo>ghi"#,
    &TextStyleOptions::default(),
  );

  let fragments = result.runs.fragments();
  assert_eq!(fragments.len(), 3);

  let middle = &fragments[1];
  assert!(middle.text.starts_with('\u{202E}'));
  assert!(middle.text.ends_with('\u{202C}'));
  assert_eq!(
    middle.attributes.writing_direction,
    WritingDirection::RightToLeft
  );
  assert_eq!(
    fragments[0].attributes.writing_direction,
    WritingDirection::Natural
  );
  assert_eq!(
    fragments[2].attributes.writing_direction,
    WritingDirection::Natural
  );
}

#[test]
fn tag_styles_flow_through_facade() {
  let options = TextStyleOptions {
    tag_styles: r##"{"code":{"color":"#CC0000","fontSize":12}}"##.to_string(),
    ..Default::default()
  };
  let result = parse_with_links("see <code>snippet</code>", &options);

  let code = result
    .runs
    .fragments()
    .iter()
    .find(|f| f.text == "snippet")
    .expect("code fragment");
  assert_eq!(code.attributes.font_size, 12.0);
  assert_eq!(
    code.attributes.foreground_color,
    Some(Rgba::from_argb(0xFFCC0000))
  );
}

#[test]
fn headings_and_paragraphs_compose() {
  let result = parse_with_links(
    "<h1>Title</h1><p>Body text</p>",
    &TextStyleOptions::default(),
  );

  let fragments = result.runs.fragments();
  let title = &fragments[0];
  assert_eq!(title.attributes.font_size, 28.0);
  assert_eq!(title.attributes.font_weight, FontWeight::Bold);

  let body = fragments
    .iter()
    .find(|f| f.text.contains("Body"))
    .expect("body fragment");
  assert_eq!(body.attributes.font_size, 14.0);
  assert_eq!(body.attributes.font_weight, FontWeight::Regular);
}

#[test]
fn catastrophic_markup_degrades_to_text() {
  let result = parse_with_links(
    "</b></p><li>text<b<b><i>more</div>tail<",
    &TextStyleOptions::default(),
  );

  // Never panics, and the visible words all come through.
  let text = result.runs.plain_text();
  assert!(text.contains("text"));
  assert!(text.contains("more"));
  assert_eq!(result.link_urls.len(), result.runs.len());
}
