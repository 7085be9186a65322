//! # xmlsettings-core
//!
//! Schema-driven XML settings engine.
//!
//! This crate provides:
//! - A declarative schema model describing an XML settings document
//! - A fluent builder constructing the schema once, for reuse across calls
//! - A writer engine with latent elements (empty optional subtrees emit
//!   nothing at all)
//! - A reader engine: recursive descent over the schema tree with clean
//!   early termination for file sniffing
//! - A repeat-item protocol mapping repeated elements onto host collections
//!   and maps, nested repeats included
//!
//! ## Quick Start
//!
//! ```
//! use xmlsettings_core::{SchemaBuilder, deserialize, getter, serialize, setter};
//!
//! #[derive(Default)]
//! struct Settings {
//!     greeting: Option<String>,
//! }
//!
//! let schema = SchemaBuilder::<Settings>::new("settings")
//!     .add_child_element(
//!         "Greeting",
//!         getter(|s: &Settings, _| s.greeting.clone()),
//!         setter(|s: &mut Settings, v, _| {
//!             s.greeting = Some(v.to_string());
//!             Ok(())
//!         }),
//!     )
//!     .build();
//!
//! let mut settings = Settings {
//!     greeting: Some("hello".to_string()),
//! };
//! let xml = serialize(&schema, &mut settings).unwrap();
//!
//! let mut read_back = Settings::default();
//! deserialize(&schema, &mut read_back, &xml).unwrap();
//! assert_eq!(read_back.greeting.as_deref(), Some("hello"));
//! ```

pub mod attribute;
pub mod builder;
pub mod element;
pub mod emit;
pub mod error;
pub mod reader;
pub mod repeat;
pub mod schema;
pub mod writer;

pub use attribute::AttributeNode;
pub use builder::SchemaBuilder;
pub use element::{ElementNode, GetValueFn, SetValueFn, getter, setter};
pub use emit::XmlEmitter;
pub use error::{ReadError, ValueError, WriteError};
pub use reader::deserialize;
pub use repeat::{CommitItemFn, CreateItemFn, HasRemainingFn, RepeatBinding, RepeatItem};
pub use schema::{ElementId, SchemaOptions, SettingsSchema};
pub use writer::serialize;
