//! # xmlsettings-store
//!
//! Settings-file collection management for the `xmlsettings` engine.
//!
//! This crate provides:
//! - File-type registration and search-path resolution (absolute, or
//!   relative to the platform's documents folder)
//! - Candidate-file enumeration with compound-extension detection
//!   (`backup.ds.xml` is the settings name `backup`)
//! - `save`/`load` entry points bridging files on disk to the core
//!   serialize/deserialize engines

pub mod error;
pub mod store;

pub use error::{Result, StoreError};
pub use store::{FileEntry, FileType, SettingsStore};
