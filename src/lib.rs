pub mod api;
pub mod attributed;
pub mod error;
pub mod html;
pub mod state;
pub mod style;
pub mod text;

pub use api::{parse_to_attributed, parse_with_links, ParseResult};
pub use attributed::{
  build_accessibility_label, build_attributed_string, AttributedString, AttributedStringResult,
  FontStyle, FontWeight, Fragment, TextAttributes, TextDecorationLineType, TextStyleOptions,
  DEFAULT_LINK_COLOR, LINE_HEIGHT_BUFFER,
};
pub use error::{Error, Result};
pub use html::{parse_to_segments, strip_tags, TextSegment};
pub use state::{ParagraphAttributes, TextState};
pub use style::{parse_hex_color, Rgba, TagStyle};
pub use text::{detect_direction_from_text, DirectionContext, WritingDirection};
