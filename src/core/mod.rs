//! core
//!
//! Core types and algorithms for jsondoc.
//!
//! # Modules
//!
//! - [`path`] - Key paths into a document tree
//! - [`resolve`] - Path resolution with auto-vivification
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Values are `serde_json::Value`, matched exhaustively at every step
//! - Resolution is pure: it only touches the tree it is given

pub mod config;
pub mod path;
pub mod resolve;
