//! Shared error type.
//!
//! The physics operations themselves are infallible — degenerate inputs
//! yield documented sentinel values instead of errors.  `CoreError` covers
//! the parsing surface (way-type labels from catalog files); sub-crates
//! define richer enums and convert via `From`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown way type: {0:?}")]
    UnknownWayType(String),
}

/// Shorthand result type for convoy-core.
pub type CoreResult<T> = Result<T, CoreError>;
