use crate::config::Config;
use crate::store::PageStore;
use anyhow::Result;
use pagewright_document::Document;
use pagewright_loader::{CapabilityMap, DynamicLoader};
use pagewright_renderer::standard_registry;
use pagewright_schema::RegistryHandle;
use std::collections::BTreeSet;

/// Everything a command needs to work on one site
pub struct Site {
    pub store: PageStore,
    pub registry: RegistryHandle,
    pub loader: DynamicLoader,
}

impl Site {
    pub fn open(cwd: &str) -> Result<Self> {
        let config = Config::load(cwd)?;
        let library = config.load_library(cwd)?;
        let capabilities = CapabilityMap::from_library(&library, &config.get_modules_dir(cwd));

        tracing::debug!(
            pages_dir = %config.pages_dir,
            modules = capabilities.len(),
            "site opened"
        );

        Ok(Self {
            store: PageStore::new(config.get_pages_dir(cwd)),
            registry: RegistryHandle::new(standard_registry(&library)),
            loader: DynamicLoader::new(capabilities, library),
        })
    }

    /// Load every library block the document uses. Returns the types that
    /// are still not renderable.
    pub async fn load_blocks(&self, document: &Document) -> Vec<String> {
        let types: BTreeSet<&str> = document.blocks().map(|b| b.block_type.as_str()).collect();

        let mut missing = Vec::new();
        for type_id in types {
            if !self.loader.ensure_loaded(&self.registry, type_id).await {
                missing.push(type_id.to_string());
            }
        }
        missing
    }
}
