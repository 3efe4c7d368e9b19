//! error
//!
//! Crate-level error type.
//!
//! # Kinds
//!
//! - [`DocError::NotFound`] - a key is absent on a read-only resolution, or
//!   a read could not load the document at all
//! - [`DocError::TypeMismatch`] - an intermediate segment is not an object
//! - [`DocError::InvalidComposition`] - empty or cross-document combine
//!
//! The remaining variants surface document I/O and value conversion
//! failures where the caller asked for them (see
//! [`LoadPolicy`](crate::core::config::LoadPolicy) and
//! [`StorePolicy`](crate::core::config::StorePolicy)).

use thiserror::Error;

use crate::core::path::KeyPath;
use crate::document::StoreError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DocError>;

/// Errors from path resolution, transactions and execution.
#[derive(Debug, Error)]
pub enum DocError {
    /// The key at `path` does not exist.
    #[error("key does not exist: '{path}'")]
    NotFound { path: KeyPath },

    /// A value on the way to `path` is not an object.
    #[error("access of '{path}': value at '{at}' is {found}, not object")]
    TypeMismatch {
        /// The full path that was requested.
        path: KeyPath,
        /// The sub-path holding the non-object value.
        at: KeyPath,
        /// JSON type name of the offending value.
        found: &'static str,
    },

    /// Transactions cannot be combined.
    #[error("invalid composition: {0}")]
    InvalidComposition(String),

    /// The path cannot be used for the requested operation.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// The document could not be loaded for a write.
    #[error("failed to load document: {0}")]
    Load(#[source] StoreError),

    /// The document could not be written back.
    #[error("failed to store document: {0}")]
    Store(#[source] StoreError),

    /// A typed value could not be converted to JSON.
    #[error("failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),

    /// The value at `path` does not have the requested shape.
    #[error("failed to decode value at '{path}': {source}")]
    Decode {
        path: KeyPath,
        source: serde_json::Error,
    },
}

impl DocError {
    pub(crate) fn not_found(path: &KeyPath) -> Self {
        DocError::NotFound { path: path.clone() }
    }

    pub(crate) fn type_mismatch(path: &KeyPath, at: KeyPath, found: &'static str) -> Self {
        DocError::TypeMismatch {
            path: path.clone(),
            at,
            found,
        }
    }

    /// Whether this is a [`DocError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, DocError::NotFound { .. })
    }
}
