//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```ignore
//! use xmlsettings::prelude::*;
//! ```

// Core types
pub use xmlsettings_core::builder::SchemaBuilder;
pub use xmlsettings_core::element::{GetValueFn, SetValueFn, getter, setter};
pub use xmlsettings_core::error::{ReadError, ValueError, WriteError};
pub use xmlsettings_core::reader::deserialize;
pub use xmlsettings_core::repeat::RepeatItem;
pub use xmlsettings_core::schema::{ElementId, SchemaOptions, SettingsSchema};
pub use xmlsettings_core::writer::serialize;

// Store types
pub use xmlsettings_store::{FileEntry, FileType, SettingsStore, StoreError};
