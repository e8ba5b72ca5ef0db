//! # Pagewright Schema
//!
//! Block schemas, the palette they are grouped into, and the default
//! property sets used when a block is placed on a page.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ core palette + extension library (stubs)    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ SchemaRegistry: versioned, immutable        │
//! │  - type id → BlockSchema                    │
//! │  - CategoryIndex (renderable types only)    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ RegistryHandle: current snapshot, replaced  │
//! │ atomically on every upgrade                 │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Schemas only ever grow: a stub gains its renderer exactly once and a
//! fully loaded schema is never overwritten.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagewright_schema::{build_default_props_with_id, ComponentLibrary, SchemaRegistry};
//!
//! let registry = SchemaRegistry::new().with_stubs(&ComponentLibrary::standard());
//! assert!(registry.get_schema("HeroBlock").unwrap().is_stub());
//!
//! let props = build_default_props_with_id("HeadingBlock");
//! assert!(props["id"].as_str().unwrap().starts_with("HeadingBlock-"));
//! ```

mod category;
mod component;
mod defaults;
mod error;
pub mod fields;
mod handle;
mod id;
mod library;
pub mod palette;
mod props;
mod registry;
mod schema;

pub use category::{Category, CategoryIndex, CategoryPlacement};
pub use component::{BlockComponent, ForwardProps, NoSlots, RenderCapability, SlotRenderer};
pub use defaults::{
    build_default_props, build_default_props_with_id, resolve_insert_props, DefaultPropsTable,
    InsertProps, PropsAdjustment, PropsBuilder,
};
pub use error::SchemaError;
pub use fields::{FieldDefinition, FieldOption};
pub use handle::RegistryHandle;
pub use id::generate_instance_id;
pub use library::{ComponentLibrary, LibraryComponent};
pub use props::{instance_id, props_from_value, PropertyMap, ID_PROP};
pub use registry::SchemaRegistry;
pub use schema::{BlockSchema, SchemaUpgrade};
