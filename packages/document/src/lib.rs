//! # Pagewright Document
//!
//! The page document and the operations that edit it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: block types, defaults, palette      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ document: page data + mutations             │
//! │  - content: top-level block sequence        │
//! │  - zones: blocks placed in container slots  │
//! │  - root: page-level props                   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer / bridge: consume snapshots        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Immutable updates**: every operation returns a new document and
//!    leaves its input untouched
//! 2. **Plain data**: a document serializes to JSON and back without loss
//! 3. **Structure only**: schema conformance is the registry's concern
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagewright_document::{BlockInstance, Document, Location, Mutation};
//! use pagewright_schema::build_default_props_with_id;
//!
//! let doc = Document::with_title("New Page");
//! let heading = BlockInstance::new("HeadingBlock", build_default_props_with_id("HeadingBlock"));
//! let doc = doc.append_block(heading);
//!
//! let columns = BlockInstance::new("ColumnsBlock", build_default_props_with_id("ColumnsBlock"));
//! let columns_id = columns.id().unwrap().to_string();
//! let doc = Mutation::AppendBlock { block: columns }.apply(&doc)?;
//! let doc = doc.ensure_zones();
//! assert!(doc.zones.contains_key(&format!("{}:column-0", columns_id)));
//! ```

mod document;
mod errors;
mod mutations;

pub use document::{BlockInstance, Document, RootData, ZoneId};
pub use errors::DocumentError;
pub use mutations::{Location, Mutation, MutationError};

pub use pagewright_schema::PropertyMap;
