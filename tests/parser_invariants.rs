//! Property-style invariant checks over generated markup.
//!
//! A small deterministic generator assembles markup from a vocabulary of
//! well-formed and deliberately broken pieces, and every invariant is
//! checked on every generated input. The seed is fixed so failures are
//! reproducible.

use richtext::api::parse_with_links;
use richtext::attributed::TextStyleOptions;
use richtext::html::attrs::is_allowed_url_scheme;
use richtext::html::normalize::normalize_inter_tag_whitespace;
use richtext::html::segment::{heading_scale, parse_to_segments};
use richtext::strip_tags;

/// xorshift64 with a fixed seed; deterministic across runs and platforms.
struct Rng(u64);

impl Rng {
  fn new() -> Self {
    Rng(0x9E37_79B9_7F4A_7C15)
  }

  fn next(&mut self) -> u64 {
    let mut x = self.0;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    self.0 = x;
    x
  }

  fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
    items[(self.next() % items.len() as u64) as usize]
  }
}

const PIECES: &[&str] = &[
  "plain text ",
  "  spaced\ttext",
  "line\nbreak",
  "שלום ",
  "مرحبا",
  "<b>",
  "</b>",
  "<i>",
  "</i>",
  "<u>",
  "</u>",
  "<p>",
  "</p>",
  "<div dir=\"rtl\">",
  "</div>",
  "<h1>",
  "</h1>",
  "<h3>",
  "</h3>",
  "<ul>",
  "</ul>",
  "<ol>",
  "</ol>",
  "<li>",
  "</li>",
  "<br>",
  "<a href=\"https://example.com\">",
  "<a href=\"/relative\">",
  "<a href=\"javascript:alert(1)\">",
  "<a href=\"data:text/html,x\">",
  "<a>",
  "</a>",
  "<bdi>",
  "</bdi>",
  "<bdo dir=\"rtl\">",
  "</bdo>",
  "<span dir=\"auto\">",
  "</span>",
  "<script>",
  "</script>",
  "&amp; &lt; unknown &foo;",
  "< broken",
  "also broken >",
  "</unknown>",
];

fn generate(rng: &mut Rng, pieces: usize) -> String {
  let mut source = String::new();
  for _ in 0..pieces {
    source.push_str(rng.pick(PIECES));
  }
  source
}

#[test]
fn link_urls_always_parallel_and_safe() {
  let mut rng = Rng::new();
  let options = TextStyleOptions::default();

  for round in 0..300 {
    let source = generate(&mut rng, 1 + (round % 12));
    let result = parse_with_links(&source, &options);

    // P1: parallel arrays.
    assert_eq!(
      result.link_urls.len(),
      result.runs.len(),
      "input: {source:?}"
    );

    // P2: every recorded URL passed the allowlist.
    for url in &result.link_urls {
      assert!(
        url.is_empty() || is_allowed_url_scheme(url),
        "unsafe url {url:?} from input {source:?}"
      );
    }

    // P8: the label never contains markup bytes.
    assert!(
      !result.accessibility_label.contains('<')
        && !result.accessibility_label.contains('>'),
      "markup leaked into label for input {source:?}"
    );
  }
}

#[test]
fn block_close_always_terminates_links() {
  // P3: whatever precedes it, text after a block close is never a link.
  let inputs = [
    r#"<a href="https://ex.com">one</p>two"#,
    r#"<p><a href="https://ex.com">one</p>two</p>"#,
    r#"<b><a href="/x">one</b></div>two"#,
    r#"<a href="/x"><a href="/y">one</h2>two"#,
    r#"<ul><li><a href="/x">one</li></ul></p>two"#,
  ];

  for input in inputs {
    let segments = parse_to_segments(input);
    // "two" is always the first content after the block close; it and
    // everything behind it must be link-free.
    let boundary = segments
      .iter()
      .position(|s| s.text.contains("two"))
      .expect("segment after the block close");
    for segment in &segments[boundary..] {
      assert!(
        !segment.is_link && segment.link_url.is_empty(),
        "link leaked across block close in {input:?}: {segment:?}"
      );
    }
  }
}

#[test]
fn inter_tag_normalization_is_idempotent() {
  // P4 over generated inputs.
  let mut rng = Rng::new();
  for round in 0..300 {
    let source = generate(&mut rng, 1 + (round % 10));
    let once = normalize_inter_tag_whitespace(&source);
    let twice = normalize_inter_tag_whitespace(&once);
    assert_eq!(once, twice, "input: {source:?}");
  }
}

#[test]
fn run_text_matches_plain_extraction_for_simple_markup() {
  // P5 on inputs without lists, BiDi wrappers, or entities, where the two
  // paths agree exactly up to the whitespace policy.
  let cases = [
    "<p>Hello <b>world</b></p>",
    "Hello <i>there</i> friend",
    "<div>a<br>b</div>",
    "<h2>Title</h2>",
  ];

  for case in cases {
    let result = parse_with_links(case, &TextStyleOptions::default());
    let concatenated = result.runs.plain_text();
    let stripped = strip_tags(case);
    assert_eq!(
      concatenated.replace('\n', " ").trim_end(),
      stripped.replace('\n', " ").trim_end(),
      "case: {case:?}"
    );
  }
}

#[test]
fn heading_segments_scale_and_embolden() {
  // P6 across every heading level.
  for heading in ["h1", "h2", "h3", "h4", "h5", "h6"] {
    let source = format!("<{heading}>Heading text</{heading}>");
    let segments = parse_to_segments(&source);
    let segment = &segments[0];
    assert_eq!(segment.parent_tag, "", "headings are not inline parents");
    assert_eq!(segment.font_scale, heading_scale(heading));
    assert!(segment.is_bold);
  }
}

#[test]
fn bidi_controls_balance_within_fragments() {
  // P7: every isolate/override opened inside a well-formed <bdi>/<bdo>
  // element is closed within the same fragment.
  let inputs = [
    "a<bdi>שלום</bdi>b",
    "a<bdo dir=\"rtl\">x</bdo>b",
    "a<bdo dir=\"ltr\">x</bdo>b",
    "<bdi>one</bdi><bdi>two</bdi>",
    "<p><bdi>עברית</bdi></p>",
  ];

  for input in inputs {
    let result = parse_with_links(input, &TextStyleOptions::default());
    for fragment in result.runs.fragments() {
      let opens = fragment
        .text
        .chars()
        .filter(|c| matches!(c, '\u{2068}' | '\u{202D}' | '\u{202E}'))
        .count();
      let closes = fragment
        .text
        .chars()
        .filter(|c| matches!(c, '\u{2069}' | '\u{202C}'))
        .count();
      assert_eq!(opens, closes, "unbalanced controls in {input:?}");
    }
  }
}

#[test]
fn empty_input_yields_empty_fields() {
  // P9.
  let result = parse_with_links("", &TextStyleOptions::default());
  assert!(result.runs.is_empty());
  assert!(result.link_urls.is_empty());
  assert!(result.accessibility_label.is_empty());
}

#[test]
fn parser_never_panics_on_hostile_input() {
  let mut rng = Rng::new();
  let options = TextStyleOptions::default();

  for _ in 0..200 {
    let mut source = generate(&mut rng, 6);
    // Splice in hostile byte patterns at a deterministic offset.
    if rng.next() % 2 == 0 {
      source.push('<');
    }
    source.push_str("<<>><a href=''><bdo dir='rtl'");
    let result = parse_with_links(&source, &options);
    assert_eq!(result.link_urls.len(), result.runs.len());
  }
}
