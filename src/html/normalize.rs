//! Whitespace normalization and plain-text extraction
//!
//! Two whitespace policies cooperate here:
//!
//! - [`normalize_inter_tag_whitespace`] runs over the raw source before
//!   parsing and removes indentation-style whitespace *between* tags, so
//!   that pretty-printed markup does not leak gaps into the output.
//! - [`normalize_segment_text`] runs over each parsed segment and
//!   collapses runs of horizontal whitespace, with leading/trailing
//!   policies decided by the segment's position relative to inline tags.
//!
//! [`strip_tags`] is an independent plain-text extractor for callers that
//! want text without any styling. It shares the tag vocabulary with the
//! segment parser but produces paragraph breaks and list markers directly,
//! then decodes the small named-entity set and collapses whitespace.

use crate::html::segment::{ListContext, ListKind, MAX_LIST_INDENT_LEVEL};

/// Block-level tags for the inter-tag whitespace pass.
pub fn is_block_level_tag(tag: &str) -> bool {
  matches!(
    tag,
    "p" | "div"
      | "h1"
      | "h2"
      | "h3"
      | "h4"
      | "h5"
      | "h6"
      | "ul"
      | "ol"
      | "li"
      | "blockquote"
      | "pre"
      | "hr"
      | "br"
      | "table"
      | "thead"
      | "tbody"
      | "tr"
      | "th"
      | "td"
      | "header"
      | "footer"
      | "section"
      | "article"
      | "nav"
      | "aside"
  )
}

/// Inline formatting tags recognized by the segment parser.
pub fn is_inline_formatting_tag(tag: &str) -> bool {
  matches!(
    tag,
    "strong"
      | "b"
      | "em"
      | "i"
      | "u"
      | "s"
      | "mark"
      | "small"
      | "sub"
      | "sup"
      | "code"
      | "span"
      | "a"
      | "bdi"
      | "bdo"
  )
}

/// Removes whitespace between tags that exists only for source formatting.
///
/// Drops all leading whitespace before the first `<`, and drops whitespace
/// that immediately follows the close of a block-level tag (until the next
/// non-whitespace character or tag). Whitespace between inline tags and
/// inside text runs is left alone.
///
/// The pass is idempotent: running it twice yields the same string.
pub fn normalize_inter_tag_whitespace(html: &str) -> String {
  let mut result = String::with_capacity(html.len());
  let bytes = html.as_bytes();

  let mut before_first_tag = true;
  let mut after_block_close = false;
  let mut last_closed_tag = String::new();

  for (i, c) in html.char_indices() {
    if before_first_tag && c.is_ascii_whitespace() {
      continue;
    }

    if c == '<' {
      before_first_tag = false;
      if bytes.get(i + 1) == Some(&b'/') {
        let tag_start = i + 2;
        let mut tag_end = tag_start;
        while tag_end < bytes.len()
          && bytes[tag_end] != b'>'
          && !bytes[tag_end].is_ascii_whitespace()
        {
          tag_end += 1;
        }
        last_closed_tag = html[tag_start..tag_end].to_ascii_lowercase();
      } else {
        last_closed_tag.clear();
      }
      result.push(c);
      after_block_close = false;
    } else if c == '>' {
      result.push(c);
      after_block_close = !last_closed_tag.is_empty() && is_block_level_tag(&last_closed_tag);
    } else if after_block_close && c.is_ascii_whitespace() {
      continue;
    } else {
      before_first_tag = false;
      result.push(c);
      after_block_close = false;
    }
  }

  result
}

/// True iff the string is nonempty and contains only ASCII whitespace,
/// the shape of a segment that carries a paragraph break and nothing else.
pub fn is_paragraph_break(text: &str) -> bool {
  !text.is_empty() && text.bytes().all(|b| b.is_ascii_whitespace())
}

/// Normalizes the text of one parsed segment.
///
/// With `preserve_newlines`, the result keeps only the original `\n`s,
/// used for paragraph-break segments so they contribute breaks but no
/// other whitespace. Otherwise runs of horizontal whitespace collapse to a
/// single space, `\n` survives once content has been seen, and leading
/// whitespace is dropped unless `preserve_leading_space` is set (the
/// caller sets it when the previous segment closed an inline element, so
/// `"<b>foo</b> bar"` keeps its gap).
pub fn normalize_segment_text(
  text: &str,
  preserve_newlines: bool,
  preserve_leading_space: bool,
) -> String {
  if preserve_newlines {
    return text.chars().filter(|&c| c == '\n').collect();
  }

  let mut result = String::with_capacity(text.len());
  let mut last_was_space = !preserve_leading_space;
  let mut has_content = preserve_leading_space;

  for c in text.chars() {
    if c.is_ascii_whitespace() {
      if c == '\n' {
        if has_content {
          result.push('\n');
          last_was_space = false;
        }
      } else if !last_was_space {
        result.push(' ');
        last_was_space = true;
      }
    } else {
      result.push(c);
      last_was_space = false;
      has_content = true;
    }
  }

  result
}

/// Extracts plain text from markup, with no styling information.
///
/// `script`/`style` contents are dropped, `<br>` becomes `\n`, block
/// closes become `\n\n`, and lists produce the same markers and
/// indentation as the segment parser. The five named entities plus
/// `&nbsp;` are decoded (unknown entities pass through verbatim), then
/// whitespace is collapsed and the result right-trimmed.
pub fn strip_tags(html: &str) -> String {
  let mut result = String::with_capacity(html.len());

  let mut in_tag = false;
  let mut in_script = false;
  let mut in_style = false;
  let mut list_stack: Vec<ListContext> = Vec::new();
  let mut tag_name = String::new();

  for c in html.chars() {
    if c == '<' {
      in_tag = true;
      tag_name.clear();
      continue;
    }

    if c == '>' {
      in_tag = false;
      let lower_tag = tag_name.to_ascii_lowercase();

      match lower_tag.as_str() {
        "script" => in_script = true,
        "/script" => in_script = false,
        "style" => in_style = true,
        "/style" => in_style = false,
        "br" | "br/" => result.push('\n'),
        "/p" | "/div" | "/h1" | "/h2" | "/h3" | "/h4" | "/h5" | "/h6" => {
          result.push_str("\n\n");
        }
        "ul" => {
          let level = list_stack.len() as u32 + 1;
          list_stack.push(ListContext::new(ListKind::Unordered, level));
        }
        "ol" => {
          let level = list_stack.len() as u32 + 1;
          list_stack.push(ListContext::new(ListKind::Ordered, level));
        }
        "/ul" | "/ol" => {
          list_stack.pop();
          if list_stack.is_empty() {
            result.push_str("\n\n");
          }
        }
        "li" => {
          if !result.is_empty() && !result.ends_with('\n') {
            result.push('\n');
          }
          if list_stack.is_empty() {
            result.push_str("\u{2022} ");
          } else {
            let list = list_stack.last_mut().unwrap();
            list.item_counter += 1;
            let indent = (list.level as usize - 1).min(MAX_LIST_INDENT_LEVEL);
            for _ in 0..indent * 4 {
              result.push(' ');
            }
            match list.kind {
              ListKind::Ordered => {
                result.push_str(&list.item_counter.to_string());
                result.push_str(". ");
              }
              ListKind::Unordered => result.push_str("\u{2022} "),
            }
          }
        }
        _ => {}
      }

      tag_name.clear();
      continue;
    }

    if in_tag {
      if !c.is_ascii_whitespace() {
        tag_name.push(c);
      }
      continue;
    }

    if !in_script && !in_style {
      result.push(c);
    }
  }

  let decoded = decode_entities(&result);
  collapse_whitespace(&decoded)
}

/// Decodes `&amp; &lt; &gt; &quot; &apos; &nbsp;`. Anything else after an
/// `&` is copied through unchanged.
fn decode_entities(text: &str) -> String {
  let mut decoded = String::with_capacity(text.len());
  let bytes = text.as_bytes();
  let mut i = 0usize;

  while i < bytes.len() {
    if bytes[i] == b'&' {
      if let Some(rel) = text[i..].find(';') {
        // Entities are short; a distant semicolon means this '&' is text.
        if rel < 9 {
          let entity = &text[i..i + rel + 1];
          match entity {
            "&amp;" => decoded.push('&'),
            "&lt;" => decoded.push('<'),
            "&gt;" => decoded.push('>'),
            "&quot;" => decoded.push('"'),
            "&apos;" => decoded.push('\''),
            "&nbsp;" => decoded.push(' '),
            _ => decoded.push_str(entity),
          }
          i += rel + 1;
          continue;
        }
      }
    }

    let c = text[i..].chars().next().unwrap();
    decoded.push(c);
    i += c.len_utf8();
  }

  decoded
}

/// Collapses whitespace runs to a single space (or `\n` when the run was a
/// newline) and right-trims the result.
fn collapse_whitespace(text: &str) -> String {
  let mut normalized = String::with_capacity(text.len());
  let mut last_was_space = true;

  for c in text.chars() {
    if c.is_ascii_whitespace() {
      if c == '\n' {
        if !last_was_space {
          normalized.push('\n');
          last_was_space = true;
        }
      } else if !last_was_space {
        normalized.push(' ');
        last_was_space = true;
      }
    } else {
      normalized.push(c);
      last_was_space = false;
    }
  }

  normalized.truncate(
    normalized
      .trim_end_matches(|c: char| c.is_ascii_whitespace())
      .len(),
  );
  normalized
}
