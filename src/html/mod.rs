//! HTML-subset scanning: tag recognition, attributes, and normalization

pub mod attrs;
pub mod normalize;
pub mod segment;

pub use attrs::{extract_dir_attr, extract_href_url, is_allowed_url_scheme};
pub use normalize::{
  is_block_level_tag, is_inline_formatting_tag, is_paragraph_break,
  normalize_inter_tag_whitespace, normalize_segment_text, strip_tags,
};
pub use segment::{
  extract_link_urls, heading_scale, parse_to_segments, ListContext, ListKind, TextSegment,
};
