//! # xmlsettings
//!
//! Schema-driven XML settings serialization for Rust.
//!
//! A settings schema is built once with a fluent builder and reused across
//! any number of read and write calls, so application code never hand-writes
//! XML parsing or emission.
//!
//! ## Features
//!
//! - **Declarative schemas** - elements, attributes, and value accessors
//!   described once with a fluent builder
//! - **Latent elements** - optional subtrees whose values are all absent
//!   produce no output at all, not even an empty tag
//! - **Repeating elements** - collections and maps of repeated elements,
//!   nested repeats included, through a small create/has-remaining/commit
//!   protocol
//! - **File sniffing** - termination flags stop a parse cleanly after part
//!   of a document, for probing files with an intentionally tiny schema
//! - **Settings stores** - search-path resolution and file enumeration for
//!   settings directories
//!
//! ## Quick Start
//!
//! ```
//! use xmlsettings::prelude::*;
//!
//! #[derive(Default)]
//! struct Settings {
//!     volume: i32,
//! }
//!
//! let schema = SchemaBuilder::<Settings>::new("settings")
//!     .add_child_element(
//!         "Volume",
//!         getter(|s: &Settings, _| Some(s.volume.to_string())),
//!         setter(|s: &mut Settings, v, _| {
//!             s.volume = v.parse().map_err(|e| ValueError::new("Volume", v, e))?;
//!             Ok(())
//!         }),
//!     )
//!     .build();
//!
//! let mut settings = Settings { volume: 7 };
//! let xml = serialize(&schema, &mut settings).unwrap();
//!
//! let mut read_back = Settings::default();
//! deserialize(&schema, &mut read_back, &xml).unwrap();
//! assert_eq!(read_back.volume, 7);
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - schema model, builder, repeat contexts, reader/writer engines
//! - [`store`] - settings-file collections: search paths and enumeration

pub mod prelude;

/// Schema model, builder, and traversal engines.
pub mod core {
    pub use xmlsettings_core::*;
}

/// Settings-file collection management.
pub mod store {
    pub use xmlsettings_store::*;
}

// Re-export commonly used items at the crate root
pub use xmlsettings_core::{
    ReadError, SchemaBuilder, SettingsSchema, ValueError, WriteError, deserialize, getter,
    serialize, setter,
};

pub use xmlsettings_store::{FileEntry, FileType, SettingsStore};
