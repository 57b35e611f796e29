//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::CallId;

/// Errors raised by the core value types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid call: {0}")]
    InvalidCall(String),

    #[error("{call} cannot move from {from:?} to {to:?}")]
    Lifecycle {
        call: CallId,
        from: crate::CallState,
        to:   crate::CallState,
    },
}

/// Shorthand result type for `lift-core`.
pub type CoreResult<T> = Result<T, CoreError>;
