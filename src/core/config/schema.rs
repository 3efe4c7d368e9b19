//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Example
//!
//! ```toml
//! [document]
//! load_policy = "strict"
//! store_policy = "propagate"
//! pretty = false
//! atomic_write = true
//! ```
//!
//! Every field is optional; unset fields fall back to the defaults
//! documented on [`DocumentOptions`](super::DocumentOptions).

use serde::{Deserialize, Serialize};

/// What a write does when the document cannot be loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// A missing file is an empty document. Any other load failure aborts
    /// the write and leaves the file untouched.
    #[default]
    Strict,
    /// Any load failure is logged and treated as an empty document. The
    /// next store replaces whatever was there.
    BestEffort,
}

/// What a write does when the document cannot be stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorePolicy {
    /// Return the store failure to the caller.
    #[default]
    Propagate,
    /// Log the store failure and report success.
    Ignore,
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Document settings
    pub document: Option<DocumentConfig>,
}

/// The `[document]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentConfig {
    /// Load failure handling for writes
    pub load_policy: Option<LoadPolicy>,

    /// Store failure handling for writes
    pub store_policy: Option<StorePolicy>,

    /// Pretty-print stored JSON
    pub pretty: Option<bool>,

    /// Write through a temp file and rename
    pub atomic_write: Option<bool>,
}
