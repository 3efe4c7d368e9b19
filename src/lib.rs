//! jsondoc - a whole-file JSON document store
//!
//! A document is one JSON object stored in one file. Values inside it are
//! addressed by key paths, and changes are described as transactions that
//! are applied to an in-memory copy and written back in one store.
//!
//! # Architecture
//!
//! - [`core`] - Key paths, path resolution and configuration
//! - [`document`] - File-backed documents: whole-tree load and store
//! - [`locator`] - [`Ref`], a (document, path) addressing handle
//! - [`transaction`] - Set, remove, update and combine
//! - [`executor`] - The load, apply, store cycle
//!
//! # Example
//!
//! ```no_run
//! use jsondoc::{execute, Document, Transaction};
//! use serde_json::json;
//!
//! let doc = Document::open("app.json");
//! let user = doc.at("users").child("ada");
//!
//! execute(Transaction::combine([
//!     user.child("email").set("ada@example.com"),
//!     user.child("visits").update(|v| json!(v.and_then(|v| v.as_u64()).unwrap_or(0) + 1)),
//!     doc.at("pending").remove(),
//! ])?)?;
//!
//! assert_eq!(user.child("email").get()?, json!("ada@example.com"));
//! # Ok::<(), jsondoc::DocError>(())
//! ```
//!
//! # Invariants
//!
//! 1. The root of a document is always a JSON object
//! 2. A failed transaction writes nothing
//! 3. A successful transaction is written with exactly one store
//! 4. Combined transactions share one document, compared by identity

pub mod core;
pub mod document;
pub mod error;
pub mod executor;
pub mod locator;
pub mod transaction;

pub use crate::core::config::{Config, DocumentOptions, LoadPolicy, StorePolicy};
pub use crate::core::path::KeyPath;
pub use crate::document::{Document, DocumentId, StoreError};
pub use crate::error::{DocError, Result};
pub use crate::executor::execute;
pub use crate::locator::Ref;
pub use crate::transaction::Transaction;
