//! locator
//!
//! Addressing handles into a document.
//!
//! A [`Ref`] pairs a [`Document`] with a [`KeyPath`]. It is immutable:
//! [`Ref::child`] returns a new locator and never changes the parent.
//! Constructing transactions from a locator is pure; nothing touches the
//! file until the transaction is executed.
//!
//! # Example
//!
//! ```no_run
//! use jsondoc::{execute, Document};
//! use serde_json::{json, Value};
//!
//! let doc = Document::open("counters.json");
//! let hits = doc.at("pages").child("index").child("hits");
//!
//! execute(hits.update(|current| {
//!     json!(current.and_then(|v| v.as_i64()).unwrap_or(0) + 1)
//! }))
//! .unwrap();
//!
//! let value: Value = hits.get().unwrap();
//! ```

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::core::path::KeyPath;
use crate::core::resolve;
use crate::document::Document;
use crate::error::{DocError, Result};
use crate::transaction::Transaction;

/// A (document, path) locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ref {
    document: Document,
    path: KeyPath,
}

impl Ref {
    /// Create a locator for `path` within `document`.
    pub fn new(document: Document, path: KeyPath) -> Self {
        Self { document, path }
    }

    /// The document this locator points into.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The key path from the document root.
    pub fn path(&self) -> &KeyPath {
        &self.path
    }

    /// A locator one key deeper. Does not touch storage.
    pub fn child(&self, key: impl Into<String>) -> Ref {
        Ref {
            document: self.document.clone(),
            path: self.path.child(key),
        }
    }

    /// Read the value at this path.
    ///
    /// # Errors
    ///
    /// - [`DocError::NotFound`] if any key is absent, or if the document
    ///   cannot be loaded at all (the cause is logged)
    /// - [`DocError::TypeMismatch`] if an intermediate value is not an object
    pub fn get(&self) -> Result<Value> {
        let root = match self.document.load() {
            Ok(root) => root,
            Err(e) => {
                if e.is_missing() {
                    tracing::debug!(
                        target: "jsondoc::locator",
                        document = %self.document,
                        "document does not exist yet"
                    );
                } else {
                    tracing::warn!(
                        target: "jsondoc::locator",
                        document = %self.document,
                        path = %self.path,
                        error = %e,
                        "failed to load document for read"
                    );
                }
                return Err(DocError::not_found(&self.path));
            }
        };

        if self.path.is_empty() {
            return Ok(Value::Object(root));
        }
        resolve::lookup(&root, &self.path).map(|node| node.to_value())
    }

    /// Read the value at this path and deserialize it into `T`.
    pub fn get_as<T: DeserializeOwned>(&self) -> Result<T> {
        let value = self.get()?;
        serde_json::from_value(value).map_err(|source| DocError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    /// Whether a value is stored at this path.
    ///
    /// `NotFound` maps to `false`; other errors propagate.
    pub fn exists(&self) -> Result<bool> {
        match self.get() {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// A transaction that stores `value` at this path.
    pub fn set(&self, value: impl Into<Value>) -> Transaction {
        Transaction::set(self.document.clone(), self.path.clone(), value.into())
    }

    /// A transaction that stores the JSON form of `value` at this path.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Encode`] if `value` cannot be serialized.
    pub fn set_serialized<T: Serialize>(&self, value: &T) -> Result<Transaction> {
        let value = serde_json::to_value(value).map_err(DocError::Encode)?;
        Ok(self.set(value))
    }

    /// A transaction that deletes this path. Deleting an absent key is fine.
    pub fn remove(&self) -> Transaction {
        Transaction::remove(self.document.clone(), self.path.clone())
    }

    /// A transaction that replaces the value at this path with `f(current)`.
    ///
    /// `f` receives `None` if the key is unset.
    pub fn update<F>(&self, f: F) -> Transaction
    where
        F: Fn(Option<Value>) -> Value + Send + Sync + 'static,
    {
        Transaction::update(self.document.clone(), self.path.clone(), Box::new(f))
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.document, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_doc(contents: Option<&str>) -> (TempDir, Document) {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("doc.json");
        if let Some(contents) = contents {
            fs::write(&path, contents).expect("write fixture");
        }
        (temp, Document::open(path))
    }

    #[test]
    fn child_does_not_mutate_parent() {
        let (_temp, doc) = create_test_doc(None);
        let parent = doc.at("a");
        let left = parent.child("b");
        let right = parent.child("c");

        assert_eq!(parent.path().to_string(), "a");
        assert_eq!(left.path().to_string(), "a.b");
        assert_eq!(right.path().to_string(), "a.c");
        assert_eq!(left.document(), parent.document());
    }

    #[test]
    fn get_existing_value() {
        let (_temp, doc) = create_test_doc(Some(r#"{"a": {"b": [1, 2]}}"#));
        assert_eq!(doc.at("a").child("b").get().expect("get"), json!([1, 2]));
        assert_eq!(doc.at("a").get().expect("get"), json!({"b": [1, 2]}));
    }

    #[test]
    fn get_root() {
        let (_temp, doc) = create_test_doc(Some(r#"{"a": 1}"#));
        assert_eq!(doc.root().get().expect("get"), json!({"a": 1}));
    }

    #[test]
    fn get_missing_key() {
        let (_temp, doc) = create_test_doc(Some(r#"{"a": {}}"#));
        let err = doc.at("a").child("b").get().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn get_missing_document_is_not_found() {
        let (_temp, doc) = create_test_doc(None);
        assert!(doc.at("a").get().unwrap_err().is_not_found());
        assert!(doc.root().get().unwrap_err().is_not_found());
    }

    #[test]
    fn get_corrupt_document_is_not_found() {
        let (_temp, doc) = create_test_doc(Some("not json"));
        let err = doc.at("a").get().unwrap_err();
        assert!(matches!(err, DocError::NotFound { ref path } if path.to_string() == "a"));
    }

    #[test]
    fn get_through_scalar_is_type_mismatch() {
        let (_temp, doc) = create_test_doc(Some(r#"{"a": 5}"#));
        let err = doc.at("a").child("b").get().unwrap_err();
        assert!(matches!(err, DocError::TypeMismatch { .. }));
    }

    #[test]
    fn get_as_typed() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Server {
            host: String,
            port: u16,
        }

        let (_temp, doc) =
            create_test_doc(Some(r#"{"server": {"host": "localhost", "port": 8080}}"#));
        let server: Server = doc.at("server").get_as().expect("get_as");
        assert_eq!(
            server,
            Server {
                host: "localhost".into(),
                port: 8080
            }
        );

        let err = doc.at("server").child("host").get_as::<u16>().unwrap_err();
        assert!(matches!(err, DocError::Decode { .. }));
    }

    #[test]
    fn exists_maps_not_found() {
        let (_temp, doc) = create_test_doc(Some(r#"{"a": {"b": null}}"#));
        assert!(doc.at("a").child("b").exists().expect("exists"));
        assert!(!doc.at("a").child("c").exists().expect("exists"));

        let (_temp, doc) = create_test_doc(Some(r#"{"a": 1}"#));
        assert!(doc.at("a").child("b").exists().is_err());
    }

    #[test]
    fn constructing_transactions_is_pure() {
        let (_temp, doc) = create_test_doc(None);
        let r = doc.at("a").child("b");

        let _set = r.set(json!(1));
        let _remove = r.remove();
        let _update = r.update(|_| json!(null));

        assert!(!doc.exists());
    }

    #[test]
    fn display_includes_path() {
        let doc = Document::open("doc.json");
        assert_eq!(doc.at("a").child("b").to_string(), "doc.json:a.b");
    }
}
