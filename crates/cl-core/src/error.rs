//! Framework error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `ClError` via `From` impls, or keep them separate and wrap `ClError` as
//! one variant.  Both patterns are acceptable; prefer whichever keeps error
//! sites clean.

use thiserror::Error;

/// The top-level error type for `cl-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum ClError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `cl-*` crates.
pub type ClResult<T> = Result<T, ClError>;
