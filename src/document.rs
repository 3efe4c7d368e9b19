//! document
//!
//! Whole-file JSON document storage.
//!
//! # Storage
//!
//! A document is a single UTF-8 file holding one JSON object. There is no
//! header, versioning or schema. Every load reads the whole file and every
//! store replaces it; nothing is cached between operations.
//!
//! # Writes
//!
//! With `atomic_write` on (the default), the tree is written to a sibling
//! `<file>.<uuid>.tmp` unique to that store, synced, then renamed over the
//! target. An interrupted store leaves either the old or the new contents
//! in place, never a torn file. Overlapping stores never share a temp file,
//! so concurrent writers lose updates (last rename wins) but cannot tear
//! the document.
//!
//! # Identity
//!
//! Each [`Document::open`] mints a fresh [`DocumentId`]. Clones share it.
//! Two handles over the same file from separate `open` calls are different
//! documents, and their transactions cannot be combined.
//!
//! # Example
//!
//! ```no_run
//! use jsondoc::{execute, Document};
//! use serde_json::json;
//!
//! let doc = Document::open("settings.json");
//! execute(doc.at("theme").child("accent").set(json!("teal"))).unwrap();
//! assert_eq!(doc.at("theme").child("accent").get().unwrap(), json!("teal"));
//! ```

use std::ffi::OsString;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::core::config::{Config, DocumentOptions};
use crate::core::path::KeyPath;
use crate::core::resolve::{value_type_name, Object};
use crate::locator::Ref;

/// Errors from reading or writing the backing file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file does not exist.
    #[error("document '{path}' does not exist")]
    Missing { path: PathBuf },

    /// The file exists but could not be read.
    #[error("cannot read document '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    /// The file is not valid JSON.
    #[error("cannot parse document '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    /// The file holds JSON whose top level is not an object.
    #[error("document '{path}' holds {found}, not an object")]
    NotAnObject { path: PathBuf, found: &'static str },

    /// The file could not be written.
    #[error("cannot write document '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },

    /// The tree could not be serialized.
    #[error("cannot serialize document: {0}")]
    Serialize(String),
}

impl StoreError {
    /// Whether the failure is only that the file does not exist yet.
    pub fn is_missing(&self) -> bool {
        matches!(self, StoreError::Missing { .. })
    }
}

/// Opaque document identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
struct Inner {
    id: DocumentId,
    path: PathBuf,
    options: DocumentOptions,
}

/// Handle to a JSON document file.
///
/// Cheap to clone. Equality is identity: two handles are equal only if one
/// was cloned from the other.
#[derive(Debug, Clone)]
pub struct Document {
    inner: Arc<Inner>,
}

impl Document {
    /// Open a document at `path` with default options.
    ///
    /// Does not touch the file system. The file is created by the first
    /// successful write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, DocumentOptions::default())
    }

    /// Open a document at `path` with explicit options.
    pub fn with_options(path: impl Into<PathBuf>, options: DocumentOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                id: DocumentId::new(),
                path: path.into(),
                options,
            }),
        }
    }

    /// Open a document at `path` with options taken from `config`.
    pub fn from_config(path: impl Into<PathBuf>, config: &Config) -> Self {
        Self::with_options(path, config.document_options())
    }

    /// This handle's identity.
    pub fn id(&self) -> DocumentId {
        self.inner.id
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Options governing writes.
    pub fn options(&self) -> &DocumentOptions {
        &self.inner.options
    }

    /// Whether the backing file exists.
    pub fn exists(&self) -> bool {
        self.inner.path.exists()
    }

    /// A locator for the document root.
    pub fn root(&self) -> Ref {
        Ref::new(self.clone(), KeyPath::root())
    }

    /// A locator for the top-level key `key`.
    pub fn at(&self, key: impl Into<String>) -> Ref {
        Ref::new(self.clone(), KeyPath::new([key.into()]))
    }

    /// Read and parse the whole file.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Missing`] if the file does not exist
    /// - [`StoreError::Read`] on any other I/O failure
    /// - [`StoreError::Parse`] if the contents are not JSON
    /// - [`StoreError::NotAnObject`] if the top level is not an object
    pub fn load(&self) -> Result<Object, StoreError> {
        let path = self.path();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::Missing {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        let value: Value = serde_json::from_str(&content).map_err(|e| StoreError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        match value {
            Value::Object(root) => Ok(root),
            other => Err(StoreError::NotAnObject {
                path: path.to_path_buf(),
                found: value_type_name(&other),
            }),
        }
    }

    /// Serialize `root` and replace the whole file.
    ///
    /// Creates parent directories if needed.
    ///
    /// Atomic stores carry the existing file's permissions over to the new
    /// file. The rename replaces the directory entry itself: if the path is
    /// a symlink, the link is replaced by a regular file and its old target
    /// is left untouched. Use `atomic_write = false` to write through links.
    pub fn store(&self, root: &Object) -> Result<(), StoreError> {
        let path = self.path();
        let write_err = |source: io::Error| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let content = if self.inner.options.pretty {
            serde_json::to_string_pretty(root)
        } else {
            serde_json::to_string(root)
        }
        .map_err(|e| StoreError::Serialize(e.to_string()))?;

        if !self.inner.options.atomic_write {
            return fs::write(path, content.as_bytes()).map_err(write_err);
        }

        let temp_path = temp_path_for(path);
        let permissions = fs::metadata(path)
            .ok()
            .filter(|m| m.is_file())
            .map(|m| m.permissions());
        if let Err(e) = write_synced(&temp_path, content.as_bytes(), permissions) {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::Write {
                path: temp_path,
                source: e,
            });
        }

        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            write_err(e)
        })
    }
}

/// `<file>.<uuid>.tmp` next to `path`, fresh for every call.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("document"));
    name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
    path.with_file_name(name)
}

fn write_synced(
    path: &Path,
    bytes: &[u8],
    permissions: Option<fs::Permissions>,
) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    if let Some(permissions) = permissions {
        file.set_permissions(permissions)?;
    }
    file.write_all(bytes)?;
    file.sync_all()
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Document {}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.path.display())
    }
}
