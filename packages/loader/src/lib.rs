//! # Pagewright Loader
//!
//! On-demand render capabilities for extension library blocks.
//!
//! ```rust,ignore
//! use pagewright_loader::{CapabilityMap, DynamicLoader};
//!
//! let capabilities = CapabilityMap::from_library(&library, Path::new("modules"));
//! let loader = DynamicLoader::new(capabilities, library);
//! if loader.ensure_loaded(&registry, "HeroBlock").await {
//!     assert!(registry.snapshot().is_renderable("HeroBlock"));
//! }
//! ```

mod capability;
mod error;
mod loader;
mod module;

pub use capability::{CapabilityMap, ComponentLoader, LoadFuture, LoadedModule};
pub use error::{FailureKind, LoadError};
pub use loader::{DynamicLoader, LoadStatus};
pub use module::{file_module_loader, module_path};
