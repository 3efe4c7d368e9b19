//! executor
//!
//! The read, apply, write cycle.
//!
//! # Lifecycle
//!
//! [`execute`] runs one transaction as a single unit:
//!
//! 1. Load the whole document. A missing file is an empty root. Other load
//!    failures follow the document's [`LoadPolicy`].
//! 2. Apply the transaction to the in-memory root. On error, nothing is
//!    written.
//! 3. Store the whole root once. A store failure follows the document's
//!    [`StorePolicy`].
//!
//! # Concurrency
//!
//! There is no locking. Two executions against the same file can interleave
//! their load and store phases; the last store wins.

use crate::core::config::{LoadPolicy, StorePolicy};
use crate::core::resolve::Object;
use crate::document::Document;
use crate::error::{DocError, Result};
use crate::transaction::Transaction;

/// Execute `transaction` against its document.
///
/// # Errors
///
/// - Any error from applying the transaction (nothing is written)
/// - [`DocError::Load`] under [`LoadPolicy::Strict`] when the file exists
///   but cannot be read or parsed
/// - [`DocError::Store`] under [`StorePolicy::Propagate`] when the write
///   fails
pub fn execute(transaction: Transaction) -> Result<()> {
    let document = transaction.document().clone();
    let options = *document.options();

    tracing::debug!(
        target: "jsondoc::executor",
        document = %document,
        mutations = transaction.len(),
        "executing transaction"
    );

    let mut root = load_root(&document, options.load_policy)?;
    transaction.apply(&mut root)?;

    match document.store(&root) {
        Ok(()) => {
            tracing::debug!(
                target: "jsondoc::executor",
                document = %document,
                "transaction committed"
            );
            Ok(())
        }
        Err(e) => match options.store_policy {
            StorePolicy::Propagate => Err(DocError::Store(e)),
            StorePolicy::Ignore => {
                tracing::warn!(
                    target: "jsondoc::executor",
                    document = %document,
                    error = %e,
                    "failed to store document, change discarded"
                );
                Ok(())
            }
        },
    }
}

fn load_root(document: &Document, policy: LoadPolicy) -> Result<Object> {
    match document.load() {
        Ok(root) => Ok(root),
        Err(e) if e.is_missing() => Ok(Object::new()),
        Err(e) => match policy {
            LoadPolicy::Strict => Err(DocError::Load(e)),
            LoadPolicy::BestEffort => {
                tracing::warn!(
                    target: "jsondoc::executor",
                    document = %document,
                    error = %e,
                    "failed to load document, starting from an empty object"
                );
                Ok(Object::new())
            }
        },
    }
}
