//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Configuration controls how documents are written: what happens when a
//! write cannot load or store the file, and how the file is formatted.
//!
//! # Precedence
//!
//! 1. Default values
//! 2. Config file passed to [`Config::load`]
//! 3. Options set in code via [`DocumentOptions`] (not handled here)
//!
//! # Example
//!
//! ```no_run
//! use jsondoc::core::config::Config;
//! use jsondoc::Document;
//! use std::path::Path;
//!
//! let config = Config::load(Path::new("jsondoc.toml")).unwrap();
//! let doc = Document::from_config("data.json", &config);
//! println!("pretty output: {}", config.pretty());
//! ```

pub mod schema;

pub use schema::{ConfigFile, DocumentConfig, LoadPolicy, StorePolicy};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError { path: PathBuf, source: io::Error },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
}

/// Resolved per-document options.
///
/// Defaults: [`LoadPolicy::Strict`], [`StorePolicy::Propagate`], compact
/// output, atomic writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentOptions {
    pub load_policy: LoadPolicy,
    pub store_policy: StorePolicy,
    pub pretty: bool,
    pub atomic_write: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            load_policy: LoadPolicy::default(),
            store_policy: StorePolicy::default(),
            pretty: false,
            atomic_write: true,
        }
    }
}

impl DocumentOptions {
    /// Options that reproduce the historical behavior: any load failure is
    /// an empty document and store failures are only logged.
    pub fn best_effort() -> Self {
        Self {
            load_policy: LoadPolicy::BestEffort,
            store_policy: StorePolicy::Ignore,
            ..Self::default()
        }
    }
}

/// Loaded configuration.
///
/// Accessor methods apply defaults for unset values.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents
    pub file: ConfigFile,
    /// Path the config was loaded from (if a file existed)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    /// A missing file is not an error (defaults are used).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        let file = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: PathBuf::new(),
            message: e.to_string(),
        })?;
        Ok(Self { file, path: None })
    }

    fn document(&self) -> Option<&DocumentConfig> {
        self.file.document.as_ref()
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Load failure handling. Defaults to [`LoadPolicy::Strict`].
    pub fn load_policy(&self) -> LoadPolicy {
        self.document()
            .and_then(|d| d.load_policy)
            .unwrap_or_default()
    }

    /// Store failure handling. Defaults to [`StorePolicy::Propagate`].
    pub fn store_policy(&self) -> StorePolicy {
        self.document()
            .and_then(|d| d.store_policy)
            .unwrap_or_default()
    }

    /// Pretty-print stored JSON. Defaults to `false`.
    pub fn pretty(&self) -> bool {
        self.document().and_then(|d| d.pretty).unwrap_or(false)
    }

    /// Write through a temp file and rename. Defaults to `true`.
    pub fn atomic_write(&self) -> bool {
        self.document().and_then(|d| d.atomic_write).unwrap_or(true)
    }

    /// Resolve all document settings into [`DocumentOptions`].
    pub fn document_options(&self) -> DocumentOptions {
        DocumentOptions {
            load_policy: self.load_policy(),
            store_policy: self.store_policy(),
            pretty: self.pretty(),
            atomic_write: self.atomic_write(),
        }
    }

    /// Path the configuration was loaded from, if any.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
