//! core::path
//!
//! Key paths into a document tree.
//!
//! A [`KeyPath`] is an ordered sequence of object keys leading from the
//! document root to a node. The empty path addresses the root itself.
//!
//! # Display
//!
//! Paths render dotted (`a.b.c`). Keys are stored verbatim, so a key that
//! itself contains a `.` is still a single segment; the dotted form is for
//! messages and [`KeyPath::parse`] only.
//!
//! # Examples
//!
//! ```
//! use jsondoc::core::path::KeyPath;
//!
//! let path = KeyPath::parse("users.alice.age");
//! assert_eq!(path.len(), 3);
//! assert_eq!(path.to_string(), "users.alice.age");
//!
//! let parent = path.parent().unwrap();
//! assert_eq!(parent.to_string(), "users.alice");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered sequence of object keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// The empty path, addressing the document root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from individual keys.
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    /// Parse a dotted path. The empty string is the root path.
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::root();
        }
        Self::new(dotted.split('.'))
    }

    /// Return a new path with `key` appended. `self` is left untouched.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut keys = Vec::with_capacity(self.0.len() + 1);
        keys.extend(self.0.iter().cloned());
        keys.push(key.into());
        Self(keys)
    }

    /// The keys of this path, root first.
    pub fn keys(&self) -> &[String] {
        &self.0
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the root path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The final key, if any.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// All but the final key. `None` for the root path.
    pub fn parent(&self) -> Option<KeyPath> {
        self.0
            .split_last()
            .map(|(_, init)| Self(init.to_vec()))
    }

    /// The first `len` keys of this path.
    pub fn prefix(&self, len: usize) -> KeyPath {
        Self(self.0[..len.min(self.0.len())].to_vec())
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl From<&str> for KeyPath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(keys: Vec<String>) -> Self {
        Self(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_empty() {
        let root = KeyPath::root();
        assert!(root.is_empty());
        assert_eq!(root.len(), 0);
        assert_eq!(root.to_string(), "");
        assert!(root.parent().is_none());
        assert!(root.last().is_none());
    }

    #[test]
    fn parse_dotted() {
        let path = KeyPath::parse("a.b.c");
        assert_eq!(path.keys(), &["a", "b", "c"]);
        assert_eq!(path.last(), Some("c"));
        assert_eq!(KeyPath::parse(""), KeyPath::root());
    }

    #[test]
    fn child_does_not_mutate_parent() {
        let parent = KeyPath::new(["a"]);
        let child = parent.child("b");
        let sibling = parent.child("c");

        assert_eq!(parent.to_string(), "a");
        assert_eq!(child.to_string(), "a.b");
        assert_eq!(sibling.to_string(), "a.c");
    }

    #[test]
    fn parent_and_prefix() {
        let path = KeyPath::parse("a.b.c");
        assert_eq!(path.parent(), Some(KeyPath::parse("a.b")));
        assert_eq!(path.prefix(1), KeyPath::parse("a"));
        assert_eq!(path.prefix(10), path);
        assert_eq!(KeyPath::parse("a").parent(), Some(KeyPath::root()));
    }

    #[test]
    fn keys_with_dots_stay_single_segments() {
        let path = KeyPath::new(["host.name", "port"]);
        assert_eq!(path.len(), 2);
        assert_eq!(path.to_string(), "host.name.port");
    }

    #[test]
    fn serde_as_key_list() {
        let path = KeyPath::parse("a.b");
        let json = serde_json::to_string(&path).expect("serialize");
        assert_eq!(json, r#"["a","b"]"#);
        let parsed: KeyPath = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, path);
    }
}
