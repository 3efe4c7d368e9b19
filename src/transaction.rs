//! transaction
//!
//! Deferred, composable mutations of a document tree.
//!
//! # Variants
//!
//! - **Set** stores a value at a path.
//! - **Remove** deletes a path. Deleting an absent key is not an error.
//! - **Update** replaces the value at a path with `f(current)`.
//! - **Combine** applies an ordered list of transactions as one unit.
//!
//! Set, Remove and Update resolve the parent of their path, creating
//! missing intermediate objects, and then act on the final key.
//!
//! # Composition
//!
//! Every transaction is bound to one [`Document`]. [`Transaction::combine`]
//! requires all members to be bound to the same document (by identity) and
//! rejects an empty list. [`Transaction::all`] is the asserting form for
//! call sites where a mismatch is a programming error.
//!
//! # Example
//!
//! ```no_run
//! use jsondoc::{Document, Transaction};
//! use serde_json::json;
//!
//! let doc = Document::open("profile.json");
//! let tx = Transaction::combine([
//!     doc.at("name").set("Ada"),
//!     doc.at("legacy_name").remove(),
//!     doc.at("stats").child("logins").update(|v| {
//!         json!(v.and_then(|v| v.as_u64()).unwrap_or(0) + 1)
//!     }),
//! ])
//! .unwrap();
//! tx.execute().unwrap();
//! ```

use std::fmt;

use serde_json::Value;

use crate::core::path::KeyPath;
use crate::core::resolve::{self, Object};
use crate::document::Document;
use crate::error::{DocError, Result};
use crate::executor;

/// Pure function from the current value (or `None`) to the new value.
pub type UpdateFn = Box<dyn Fn(Option<Value>) -> Value + Send + Sync>;

enum Kind {
    Set { path: KeyPath, value: Value },
    Remove { path: KeyPath },
    Update { path: KeyPath, f: UpdateFn },
    Combine(Vec<Transaction>),
}

/// A mutation description bound to one document.
///
/// Built from a [`Ref`](crate::Ref) or by combining other transactions,
/// then consumed by [`execute`](crate::execute).
pub struct Transaction {
    document: Document,
    kind: Kind,
}

impl Transaction {
    pub(crate) fn set(document: Document, path: KeyPath, value: Value) -> Self {
        Self {
            document,
            kind: Kind::Set { path, value },
        }
    }

    pub(crate) fn remove(document: Document, path: KeyPath) -> Self {
        Self {
            document,
            kind: Kind::Remove { path },
        }
    }

    pub(crate) fn update(document: Document, path: KeyPath, f: UpdateFn) -> Self {
        Self {
            document,
            kind: Kind::Update { path, f },
        }
    }

    /// Combine transactions into one that applies them in order.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::InvalidComposition`] if `transactions` is empty
    /// or if the members are bound to different documents.
    pub fn combine<I>(transactions: I) -> Result<Self>
    where
        I: IntoIterator<Item = Transaction>,
    {
        let transactions: Vec<Transaction> = transactions.into_iter().collect();

        let Some(first) = transactions.first() else {
            return Err(DocError::InvalidComposition(
                "no transactions supplied".into(),
            ));
        };
        let document = first.document.clone();

        if let Some(stray) = transactions.iter().find(|t| t.document != document) {
            return Err(DocError::InvalidComposition(format!(
                "all transactions must be from the same document (expected {} [{}], found {} [{}])",
                document,
                document.id(),
                stray.document,
                stray.document.id()
            )));
        }

        Ok(Self {
            document,
            kind: Kind::Combine(transactions),
        })
    }

    /// Combine transactions, panicking on an invalid composition.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions [`Transaction::combine`] errors.
    pub fn all<I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = Transaction>,
    {
        match Self::combine(transactions) {
            Ok(tx) => tx,
            Err(e) => panic!("{}", e),
        }
    }

    /// The document this transaction is bound to.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Number of leaf mutations.
    pub fn len(&self) -> usize {
        match &self.kind {
            Kind::Combine(members) => members.iter().map(Transaction::len).sum(),
            _ => 1,
        }
    }

    /// Always `false`: a transaction holds at least one mutation.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Apply this transaction to `root`.
    ///
    /// A Combine stops at the first failing member; earlier members have
    /// already mutated `root` by then, so callers must discard it.
    pub fn apply(&self, root: &mut Object) -> Result<()> {
        match &self.kind {
            Kind::Set { path, value } => {
                let (parent, key) = target(root, path)?;
                parent.insert(key.to_owned(), value.clone());
            }
            Kind::Remove { path } => {
                let (parent, key) = target(root, path)?;
                parent.remove(key);
            }
            Kind::Update { path, f } => {
                let (parent, key) = target(root, path)?;
                let current = parent.get(key).cloned();
                parent.insert(key.to_owned(), f(current));
            }
            Kind::Combine(members) => {
                for member in members {
                    member.apply(root)?;
                }
            }
        }
        Ok(())
    }

    /// Run one load, apply, store cycle. See [`executor::execute`].
    pub fn execute(self) -> Result<()> {
        executor::execute(self)
    }
}

/// The parent object of `path` and its final key.
fn target<'a, 'p>(
    root: &'a mut Object,
    path: &'p KeyPath,
) -> Result<(&'a mut Object, &'p str)> {
    let parent = resolve::parent_object(root, path)?;
    let key = path
        .last()
        .ok_or_else(|| DocError::InvalidPath("cannot mutate the document root".into()))?;
    Ok((parent, key))
}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Set { path, value } => f
                .debug_struct("Set")
                .field("document", &self.document.to_string())
                .field("path", &path.to_string())
                .field("value", value)
                .finish(),
            Kind::Remove { path } => f
                .debug_struct("Remove")
                .field("document", &self.document.to_string())
                .field("path", &path.to_string())
                .finish(),
            Kind::Update { path, .. } => f
                .debug_struct("Update")
                .field("document", &self.document.to_string())
                .field("path", &path.to_string())
                .finish_non_exhaustive(),
            Kind::Combine(members) => f.debug_tuple("Combine").field(members).finish(),
        }
    }
}
