//! Markup-to-segment parsing
//!
//! This is the core state machine: it consumes the source byte stream once
//! and emits ordered [`TextSegment`] records, each carrying the style
//! summary in effect for its text run.
//!
//! The tag stack is the source of truth for styling. The mutable summary
//! flags (`bold`, `italic`, ...) are recomputed from the whole stack on
//! every push and pop rather than incrementally updated, so a malformed
//! close can never leave a flag out of sync with the stack.
//!
//! Malformed markup never fails:
//!
//! - A close tag that does not match the top of the stack is ignored.
//! - A `<` with no `>` before the end of input discards the buffered tag
//!   body; accumulated text is still flushed.
//! - Closing a block element (`</p>`, `</div>`, `</h1..6>`) forcibly
//!   clears any open link context, so `<a href="...">x</p>text` cannot
//!   make `text` clickable. This is a security invariant, not a styling
//!   nicety.

use std::sync::OnceLock;

use crate::html::attrs::{extract_dir_attr, extract_href_url};
use crate::html::normalize::is_inline_formatting_tag;
use crate::text::direction::DirectionContext;
use crate::text::unicode::WritingDirection;

/// Deepest list level that still adds indentation. Caps the memory a
/// pathological input can spend on indent runs.
pub const MAX_LIST_INDENT_LEVEL: usize = 100;

/// Kind of list container currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
  Ordered,
  Unordered,
}

/// One open `<ul>`/`<ol>` on the list stack.
#[derive(Debug, Clone)]
pub struct ListContext {
  pub kind: ListKind,
  pub item_counter: u32,
  /// 1-based nesting level; markers are indented by `4 * (level - 1)`
  /// spaces (capped at [`MAX_LIST_INDENT_LEVEL`]).
  pub level: u32,
}

impl ListContext {
  pub fn new(kind: ListKind, level: u32) -> Self {
    Self {
      kind,
      item_counter: 0,
      level,
    }
  }
}

/// A run of text with the style summary that was in effect when it was
/// flushed.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSegment {
  pub text: String,
  pub font_scale: f32,
  pub is_bold: bool,
  pub is_italic: bool,
  /// True inside `<u>`, or inside `<a>` with a safe href.
  pub is_underline: bool,
  pub is_strikethrough: bool,
  /// True inside `<a>` with a safe href.
  pub is_link: bool,
  /// True when the previous segment ended by closing an inline element;
  /// the normalizer preserves this segment's leading space in that case.
  pub follows_inline_element: bool,
  /// Innermost inline formatting tag ("" when none), used for per-tag
  /// style overrides.
  pub parent_tag: String,
  /// Safe href URL ("" when not inside a link).
  pub link_url: String,
  pub writing_direction: WritingDirection,
  pub is_bdi_isolated: bool,
  pub is_bdo_override: bool,
}

/// Scale factors applied to headings, mirroring the conventional browser
/// default font sizes for `h1`–`h6`.
pub fn heading_scale(tag: &str) -> f32 {
  match tag {
    "h1" => 2.0,
    "h2" => 1.5,
    "h3" => 1.17,
    "h4" => 1.0,
    "h5" => 0.83,
    "h6" => 0.67,
    _ => 1.0,
  }
}

/// Extracts the per-segment link URLs as a parallel array ("" in non-link
/// slots).
pub fn extract_link_urls(segments: &[TextSegment]) -> Vec<String> {
  segments.iter().map(|s| s.link_url.clone()).collect()
}

fn diagnostics_enabled() -> bool {
  static ENABLED: OnceLock<bool> = OnceLock::new();
  *ENABLED.get_or_init(|| {
    std::env::var("RICHTEXT_DIAGNOSTICS")
      .map(|value| {
        matches!(
          value.to_ascii_lowercase().as_str(),
          "1" | "true" | "on" | "verbose"
        )
      })
      .unwrap_or(false)
  })
}

/// Parses markup into styled text segments.
///
/// Each segment represents a run of text with consistent styling; the
/// segment order is source order. This never fails; see the module docs
/// for how malformed input degrades.
pub fn parse_to_segments(markup: &str) -> Vec<TextSegment> {
  if markup.is_empty() {
    return Vec::new();
  }

  let segments = SegmentParser::new(markup).run();

  if diagnostics_enabled() {
    eprintln!(
      "RICHTEXT_DIAGNOSTICS: parsed {} segments from {} bytes",
      segments.len(),
      markup.len()
    );
  }

  segments
}

struct SegmentParser<'a> {
  source: &'a str,
  segments: Vec<TextSegment>,

  current_text: String,
  scale: f32,
  bold: bool,
  italic: bool,
  underline: bool,
  strikethrough: bool,
  link: bool,
  parent_tag: String,
  link_url: String,
  next_follows_inline: bool,

  tag_stack: Vec<String>,
  list_stack: Vec<ListContext>,
  link_url_stack: Vec<String>,
  link_depth: u32,
  dir_context: DirectionContext,

  in_tag: bool,
  in_script: bool,
  in_style: bool,
  tag_name: String,
}

impl<'a> SegmentParser<'a> {
  fn new(source: &'a str) -> Self {
    Self {
      source,
      segments: Vec::new(),
      current_text: String::new(),
      scale: 1.0,
      bold: false,
      italic: false,
      underline: false,
      strikethrough: false,
      link: false,
      parent_tag: String::new(),
      link_url: String::new(),
      next_follows_inline: false,
      tag_stack: Vec::new(),
      list_stack: Vec::new(),
      link_url_stack: Vec::new(),
      link_depth: 0,
      dir_context: DirectionContext::new(),
      in_tag: false,
      in_script: false,
      in_style: false,
      tag_name: String::new(),
    }
  }

  fn run(mut self) -> Vec<TextSegment> {
    for (i, c) in self.source.char_indices() {
      if c == '<' {
        self.in_tag = true;
        self.tag_name.clear();
        continue;
      }

      if c == '>' {
        self.in_tag = false;
        self.handle_tag(i + 1);
        self.tag_name.clear();
        continue;
      }

      if self.in_tag {
        self.tag_name.push(c);
        continue;
      }

      if !self.in_script && !self.in_style {
        self.current_text.push(c);
      }
    }

    self.flush_segment(false);
    self.segments
  }

  /// Dispatches one completed tag. `after_tag` is the byte offset just
  /// past the closing `>`, used as the look-ahead origin for `dir="auto"`.
  fn handle_tag(&mut self, after_tag: usize) {
    let lower = self.tag_name.to_ascii_lowercase();
    let name_end = lower
      .find(|c: char| c.is_ascii_whitespace())
      .unwrap_or(lower.len());
    let with_slash = &lower[..name_end];

    let is_closing = with_slash.starts_with('/');
    let clean_tag = if is_closing { &with_slash[1..] } else { with_slash };

    if clean_tag == "script" {
      self.in_script = !is_closing;
    } else if clean_tag == "style" {
      self.in_style = !is_closing;
    } else if clean_tag == "br" {
      self.current_text.push('\n');
    } else if is_closing && matches!(clean_tag, "p" | "div" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6") {
      self.current_text.push('\n');
      self.flush_segment(false);
      if self.tag_stack.last().map(String::as_str) == Some(clean_tag) {
        self.tag_stack.pop();
        self.dir_context.exit_element();
      }
      // Closing a block terminates any link context that leaked across it,
      // balanced or not. Refresh afterwards so no stale link flag survives.
      self.link_depth = 0;
      self.link_url_stack.clear();
      self.refresh_style_from_stack();
    } else if !is_closing && matches!(clean_tag, "p" | "div" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6") {
      self.flush_segment(false);
      let clean_tag = clean_tag.to_string();
      self.tag_stack.push(clean_tag.clone());
      let dir_attr = extract_dir_attr(&self.tag_name);
      let lookahead = if dir_attr.eq_ignore_ascii_case("auto") {
        self.lookahead_text(after_tag, &clean_tag)
      } else {
        String::new()
      };
      self.dir_context.enter_element(&clean_tag, &dir_attr, &lookahead);
      self.refresh_style_from_stack();
    } else if !is_closing && is_inline_formatting_tag(clean_tag) {
      self.flush_segment(false);
      let clean_tag = clean_tag.to_string();
      self.tag_stack.push(clean_tag.clone());

      // Only an <a> with a safely-schemed href opens link context.
      if clean_tag == "a" {
        let url = extract_href_url(&self.tag_name);
        if !url.is_empty() {
          self.link_depth += 1;
          self.link_url_stack.push(url);
        }
      }

      let dir_attr = extract_dir_attr(&self.tag_name);
      let needs_auto_detection = if dir_attr.is_empty() {
        clean_tag == "bdi"
      } else {
        dir_attr.eq_ignore_ascii_case("auto")
      };
      let lookahead = if needs_auto_detection {
        self.lookahead_text(after_tag, &clean_tag)
      } else {
        String::new()
      };
      self.dir_context.enter_element(&clean_tag, &dir_attr, &lookahead);

      if clean_tag == "bdi" {
        // First Strong Isolate
        self.current_text.push('\u{2068}');
      } else if clean_tag == "bdo" {
        if dir_attr.eq_ignore_ascii_case("rtl") {
          // Right-to-Left Override
          self.current_text.push('\u{202E}');
        } else if dir_attr.eq_ignore_ascii_case("ltr") {
          // Left-to-Right Override
          self.current_text.push('\u{202D}');
        }
        // <bdo> without dir has no directional effect.
      }

      self.refresh_style_from_stack();
    } else if is_closing && is_inline_formatting_tag(clean_tag) {
      if clean_tag == "bdi" {
        // Pop Directional Isolate
        self.current_text.push('\u{2069}');
      } else if clean_tag == "bdo" {
        // Pop Directional Formatting; harmless when no override started.
        self.current_text.push('\u{202C}');
      }
      self.flush_segment(true);
      if self.tag_stack.last().map(String::as_str) == Some(clean_tag) {
        self.tag_stack.pop();
        if clean_tag == "a" && self.link_depth > 0 {
          self.link_depth -= 1;
          self.link_url_stack.pop();
        }
        self.dir_context.exit_element();
        self.refresh_style_from_stack();
      }
    } else if !is_closing && clean_tag == "li" {
      if !self.current_text.is_empty() && !self.current_text.ends_with('\n') {
        self.current_text.push('\n');
      }
      if self.list_stack.is_empty() {
        self.current_text.push_str("\u{2022} ");
      } else {
        let list = self.list_stack.last_mut().unwrap();
        list.item_counter += 1;
        let counter = list.item_counter;
        let kind = list.kind;
        let indent = (list.level as usize - 1).min(MAX_LIST_INDENT_LEVEL);
        for _ in 0..indent * 4 {
          self.current_text.push(' ');
        }
        match kind {
          ListKind::Ordered => {
            self.current_text.push_str(&counter.to_string());
            self.current_text.push_str(". ");
          }
          ListKind::Unordered => self.current_text.push_str("\u{2022} "),
        }
      }
    } else if is_closing && clean_tag == "li" {
      // Screen readers pause at sentence terminators; give each list item
      // one if the content didn't end with its own.
      if let Some(last) = self.current_text.chars().last() {
        if !matches!(last, '.' | '!' | '?' | ':' | ';') {
          self.current_text.push('.');
        }
      }
    } else if !is_closing && clean_tag == "ul" {
      let level = self.list_stack.len() as u32 + 1;
      self.list_stack.push(ListContext::new(ListKind::Unordered, level));
    } else if !is_closing && clean_tag == "ol" {
      let level = self.list_stack.len() as u32 + 1;
      self.list_stack.push(ListContext::new(ListKind::Ordered, level));
    } else if is_closing && matches!(clean_tag, "ul" | "ol") {
      self.list_stack.pop();
      if self.list_stack.is_empty() {
        self.current_text.push('\n');
        self.flush_segment(false);
      }
    }
  }

  /// Collects the text content between `start` and the first `</tag`,
  /// skipping anything inside nested tags, without consuming input. Used
  /// to resolve `dir="auto"` and bare `<bdi>` with a first-strong scan.
  fn lookahead_text(&self, start: usize, tag: &str) -> String {
    let closing = format!("</{tag}");
    let bytes = self.source.as_bytes();
    let mut text = String::new();
    let mut in_nested_tag = false;

    for (offset, c) in self.source[start..].char_indices() {
      let j = start + offset;
      if c == '<' {
        in_nested_tag = true;
        let end = j + closing.len();
        if end <= bytes.len() && bytes[j..end].eq_ignore_ascii_case(closing.as_bytes()) {
          break;
        }
        continue;
      }
      if c == '>' {
        in_nested_tag = false;
        continue;
      }
      if !in_nested_tag {
        text.push(c);
      }
    }

    text
  }

  fn flush_segment(&mut self, closing_inline_element: bool) {
    if !self.current_text.is_empty() {
      self.segments.push(TextSegment {
        text: std::mem::take(&mut self.current_text),
        font_scale: self.scale,
        is_bold: self.bold,
        is_italic: self.italic,
        is_underline: self.underline,
        is_strikethrough: self.strikethrough,
        is_link: self.link,
        follows_inline_element: self.next_follows_inline,
        parent_tag: self.parent_tag.clone(),
        link_url: self.link_url.clone(),
        writing_direction: self.dir_context.effective_direction(),
        is_bdi_isolated: self.dir_context.is_isolated(),
        is_bdo_override: self.dir_context.is_override(),
      });
    }
    self.next_follows_inline = closing_inline_element;
  }

  /// Recomputes the style summary from the tag stack. The stack is the
  /// source of truth; this never mutates it.
  fn refresh_style_from_stack(&mut self) {
    self.scale = 1.0;
    self.bold = false;
    self.italic = false;
    self.underline = false;
    self.strikethrough = false;
    self.link = self.link_depth > 0;
    self.link_url = self.link_url_stack.last().cloned().unwrap_or_default();
    self.parent_tag.clear();

    for tag in &self.tag_stack {
      match tag.as_str() {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
          self.scale = heading_scale(tag);
          self.bold = true;
        }
        "strong" | "b" => self.bold = true,
        "em" | "i" => self.italic = true,
        "u" => self.underline = true,
        "s" => self.strikethrough = true,
        // Links are underlined only when an href actually opened one.
        "a" if self.link_depth > 0 => self.underline = true,
        _ => {}
      }
      if is_inline_formatting_tag(tag) {
        self.parent_tag = tag.clone();
      }
    }
  }
}
