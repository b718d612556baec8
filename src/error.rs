//! Error types for richtext
//!
//! The parser core never fails: malformed markup degrades to plain text
//! with whatever styling could be recovered. The only fallible surface is
//! serializing the state envelope, so the error enum is correspondingly
//! small. All errors use the `thiserror` crate for minimal boilerplate
//! and proper error trait implementations.

use thiserror::Error;

/// Result type alias for richtext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for richtext.
#[derive(Error, Debug)]
pub enum Error {
  /// State envelope could not be serialized.
  #[error("State serialization error: {0}")]
  StateSerialization(#[from] serde_json::Error),
}
