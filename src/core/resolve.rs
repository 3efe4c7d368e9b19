//! core::resolve
//!
//! Path resolution over a document tree.
//!
//! # Semantics
//!
//! Resolution walks a [`KeyPath`] key by key from the root object:
//!
//! - The empty path resolves to the root itself.
//! - Every key but the last must lead to an object. Anything else is a
//!   [`DocError::TypeMismatch`] naming the full path and the sub-path that
//!   holds the offending value.
//! - A missing key is [`DocError::NotFound`], unless auto-vivification is
//!   on, in which case an empty object is inserted and the walk continues.
//!
//! Writers never resolve their own final key. They resolve the parent path
//! through [`parent_object`] and assign the final key themselves, so a
//! mutation's target key is never created by vivification.

use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::core::path::KeyPath;
use crate::error::{DocError, Result};

/// Object node type used for document roots.
pub type Object = Map<String, Value>;

/// A shared view of a resolved node.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// The document root.
    Root(&'a Object),
    /// A value below the root.
    Value(&'a Value),
}

impl Node<'_> {
    /// Clone the node into an owned value.
    pub fn to_value(&self) -> Value {
        match self {
            Node::Root(map) => Value::Object((*map).clone()),
            Node::Value(value) => (*value).clone(),
        }
    }
}

/// A mutable view of a resolved node.
#[derive(Debug)]
pub enum NodeMut<'a> {
    /// The document root.
    Root(&'a mut Object),
    /// A value below the root.
    Value(&'a mut Value),
}

/// JSON type name of a value, for error messages.
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Resolve `path` read-only.
pub fn lookup<'a>(root: &'a Object, path: &KeyPath) -> Result<Node<'a>> {
    let keys = path.keys();
    let Some(last_index) = keys.len().checked_sub(1) else {
        return Ok(Node::Root(root));
    };

    let mut current = root;
    for (i, key) in keys.iter().enumerate() {
        let next = current.get(key).ok_or_else(|| DocError::not_found(path))?;
        if i == last_index {
            return Ok(Node::Value(next));
        }
        current = match next {
            Value::Object(map) => map,
            other => {
                return Err(DocError::type_mismatch(
                    path,
                    path.prefix(i + 1),
                    value_type_name(other),
                ))
            }
        };
    }

    unreachable!("loop returns on the last key")
}

/// Resolve `path` for writing.
///
/// With `vivify` set, every missing key along `path` is created as an empty
/// object, including the final key of `path`. Without it, a missing key is
/// [`DocError::NotFound`]. Writers pass the parent of their target, so their
/// own final key is never created here.
pub fn resolve<'a>(root: &'a mut Object, path: &KeyPath, vivify: bool) -> Result<NodeMut<'a>> {
    let keys = path.keys();
    let Some(last_index) = keys.len().checked_sub(1) else {
        return Ok(NodeMut::Root(root));
    };

    let mut current = root;
    for (i, key) in keys.iter().enumerate() {
        let next = match current.entry(key.as_str()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                if !vivify {
                    return Err(DocError::not_found(path));
                }
                entry.insert(Value::Object(Map::new()))
            }
        };
        if i == last_index {
            return Ok(NodeMut::Value(next));
        }
        current = match next {
            Value::Object(map) => map,
            other => {
                return Err(DocError::type_mismatch(
                    path,
                    path.prefix(i + 1),
                    value_type_name(other),
                ))
            }
        };
    }

    unreachable!("loop returns on the last key")
}

/// Resolve the object that holds the final key of `path`, creating missing
/// intermediate objects.
///
/// Errors cite the full `path`, not just its parent.
pub fn parent_object<'a>(root: &'a mut Object, path: &KeyPath) -> Result<&'a mut Object> {
    let parent = path
        .parent()
        .ok_or_else(|| DocError::InvalidPath("cannot mutate the document root".into()))?;

    let node = resolve(root, &parent, true).map_err(|err| match err {
        DocError::TypeMismatch { at, found, .. } => DocError::type_mismatch(path, at, found),
        other => other,
    })?;

    match node {
        NodeMut::Root(map) => Ok(map),
        NodeMut::Value(Value::Object(map)) => Ok(map),
        NodeMut::Value(other) => Err(DocError::type_mismatch(
            path,
            parent,
            value_type_name(other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Object {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    #[test]
    fn empty_path_is_root() {
        let mut root = object(json!({"a": 1}));

        match lookup(&root, &KeyPath::root()).expect("lookup") {
            Node::Root(map) => assert_eq!(map.len(), 1),
            Node::Value(v) => panic!("expected root, got {}", v),
        }
        assert!(matches!(
            resolve(&mut root, &KeyPath::root(), false).expect("resolve"),
            NodeMut::Root(_)
        ));
    }

    #[test]
    fn lookup_nested_value() {
        let root = object(json!({"a": {"b": {"c": [1, 2]}}}));
        let node = lookup(&root, &KeyPath::parse("a.b.c")).expect("lookup");
        assert_eq!(node.to_value(), json!([1, 2]));
    }

    #[test]
    fn lookup_missing_is_not_found() {
        let root = object(json!({"a": {}}));

        let err = lookup(&root, &KeyPath::parse("a.b")).unwrap_err();
        assert!(matches!(err, DocError::NotFound { ref path } if path.to_string() == "a.b"));

        let err = lookup(&root, &KeyPath::parse("x.y.z")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn lookup_through_scalar_is_type_mismatch() {
        let root = object(json!({"a": {"b": "text"}}));
        let err = lookup(&root, &KeyPath::parse("a.b.c.d")).unwrap_err();
        match err {
            DocError::TypeMismatch { path, at, found } => {
                assert_eq!(path.to_string(), "a.b.c.d");
                assert_eq!(at.to_string(), "a.b");
                assert_eq!(found, "string");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn lookup_final_value_may_be_any_kind() {
        let root = object(json!({"a": null, "b": false}));
        assert_eq!(
            lookup(&root, &KeyPath::parse("a")).expect("a").to_value(),
            Value::Null
        );
        assert_eq!(
            lookup(&root, &KeyPath::parse("b")).expect("b").to_value(),
            json!(false)
        );
    }

    #[test]
    fn resolve_without_vivify_does_not_create() {
        let mut root = Object::new();
        let err = resolve(&mut root, &KeyPath::parse("a.b"), false).unwrap_err();
        assert!(err.is_not_found());
        assert!(root.is_empty());
    }

    #[test]
    fn resolve_with_vivify_creates_objects() {
        let mut root = Object::new();
        match resolve(&mut root, &KeyPath::parse("a.b"), true).expect("resolve") {
            NodeMut::Value(Value::Object(map)) => {
                map.insert("c".into(), json!(1));
            }
            other => panic!("expected object, got {:?}", other),
        }
        assert_eq!(Value::Object(root), json!({"a": {"b": {"c": 1}}}));
    }

    #[test]
    fn resolve_with_vivify_creates_final_key() {
        let mut root = Object::new();
        match resolve(&mut root, &KeyPath::parse("a"), true).expect("resolve") {
            NodeMut::Value(value) => assert_eq!(*value, json!({})),
            other => panic!("expected value, got {:?}", other),
        }
        assert_eq!(Value::Object(root), json!({"a": {}}));
    }

    #[test]
    fn parent_object_does_not_create_final_key() {
        let mut root = Object::new();
        parent_object(&mut root, &KeyPath::parse("a.b")).expect("parent");
        assert_eq!(Value::Object(root), json!({"a": {}}));
    }

    #[test]
    fn resolve_keeps_existing_siblings() {
        let mut root = object(json!({"a": {"keep": true}}));
        resolve(&mut root, &KeyPath::parse("a.new"), true).expect("resolve");
        assert_eq!(Value::Object(root), json!({"a": {"keep": true, "new": {}}}));
    }

    #[test]
    fn resolve_through_array_is_type_mismatch() {
        let mut root = object(json!({"list": [1, 2, 3]}));
        let err = resolve(&mut root, &KeyPath::parse("list.0"), true).unwrap_err();
        assert!(matches!(err, DocError::TypeMismatch { found: "array", .. }));
    }

    #[test]
    fn parent_object_of_top_level_key_is_root() {
        let mut root = object(json!({"a": 1}));
        let parent = parent_object(&mut root, &KeyPath::parse("b")).expect("parent");
        parent.insert("b".into(), json!(2));
        assert_eq!(Value::Object(root), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn parent_object_scalar_parent_cites_full_path() {
        let mut root = object(json!({"a": 5}));
        let err = parent_object(&mut root, &KeyPath::parse("a.b")).unwrap_err();
        match err {
            DocError::TypeMismatch { path, at, found } => {
                assert_eq!(path.to_string(), "a.b");
                assert_eq!(at.to_string(), "a");
                assert_eq!(found, "number");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn parent_object_deep_mismatch_cites_full_path() {
        let mut root = object(json!({"a": 5}));
        let err = parent_object(&mut root, &KeyPath::parse("a.b.c")).unwrap_err();
        match err {
            DocError::TypeMismatch { path, at, .. } => {
                assert_eq!(path.to_string(), "a.b.c");
                assert_eq!(at.to_string(), "a");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn parent_object_of_root_path_is_invalid() {
        let mut root = Object::new();
        let err = parent_object(&mut root, &KeyPath::root()).unwrap_err();
        assert!(matches!(err, DocError::InvalidPath(_)));
    }

    #[test]
    fn value_type_names() {
        assert_eq!(value_type_name(&json!(null)), "null");
        assert_eq!(value_type_name(&json!(true)), "boolean");
        assert_eq!(value_type_name(&json!(1.5)), "number");
        assert_eq!(value_type_name(&json!("s")), "string");
        assert_eq!(value_type_name(&json!([])), "array");
        assert_eq!(value_type_name(&json!({})), "object");
    }
}
