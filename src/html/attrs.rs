//! Attribute extraction from raw tag bodies
//!
//! The segment parser keeps the raw body of each open tag (everything
//! between `<` and `>`) and pulls individual attributes out of it with
//! plain string scans. Only `href` and `dir` are ever read, and values
//! must be quoted with `"` or `'`.

/// Finds the quoted value of `attr_eq` (e.g. `"href="`) inside a raw tag
/// body. Returns `None` when the attribute is absent, unquoted, or empty.
fn quoted_attr_value<'a>(tag_body: &'a str, attr_eq: &str) -> Option<&'a str> {
  let attr_pos = tag_body.find(attr_eq)?;
  let value_start = attr_pos + attr_eq.len();
  let rest = tag_body.get(value_start..)?;

  let mut chars = rest.chars();
  let quote = chars.next()?;
  if quote != '"' && quote != '\'' {
    return None;
  }

  let inner = &rest[quote.len_utf8()..];
  let end = inner.find(quote)?;
  if end == 0 {
    return None;
  }
  Some(&inner[..end])
}

/// Extracts a safe `href` URL from a raw tag body.
///
/// The value must be quoted and pass [`is_allowed_url_scheme`]; anything
/// else yields "" and the caller treats the tag like an `<a>` without an
/// href.
pub fn extract_href_url(tag_body: &str) -> String {
  match quoted_attr_value(tag_body, "href=") {
    Some(url) if is_allowed_url_scheme(url) => url.to_string(),
    _ => String::new(),
  }
}

/// Extracts the `dir` attribute value from a raw tag body, or "" when it
/// is absent. No scheme check applies.
pub fn extract_dir_attr(tag_body: &str) -> String {
  quoted_attr_value(tag_body, "dir=")
    .map(str::to_string)
    .unwrap_or_default()
}

/// Checks a URL against the scheme allowlist.
///
/// Permitted: `http://`, `https://`, `mailto:`, `tel:`, fragment-only
/// (`#...`), path-absolute (`/...`), and scheme-less relative URLs (no `:`
/// before the first `/`). Everything else is rejected, including
/// `javascript:`, `vbscript:`, `data:`, and any unknown scheme.
///
/// This predicate is a security boundary: a URL that fails it must never
/// reach a fragment's `link_url` slot.
pub fn is_allowed_url_scheme(url: &str) -> bool {
  let lower = url.to_ascii_lowercase();
  let lower = lower.trim_start_matches(|c: char| c.is_ascii_whitespace());

  if lower.starts_with("http://")
    || lower.starts_with("https://")
    || lower.starts_with("mailto:")
    || lower.starts_with("tel:")
  {
    return true;
  }

  if lower.is_empty() || lower.starts_with('/') || lower.starts_with('#') {
    return true;
  }

  // A relative URL has no scheme: either no colon at all, or the first
  // colon comes after the first slash.
  match (lower.find(':'), lower.find('/')) {
    (None, _) => true,
    (Some(colon), Some(slash)) => slash < colon,
    (Some(_), None) => false,
  }
}
