//! # Dynamic Capability Loader
//!
//! Turns a library stub into a renderable schema the first time the type
//! is needed.
//!
//! 1. Already renderable → done, nothing fetched
//! 2. No loader in the capability map → `NoLoader`
//! 3. Loader fails or yields no component → error, registry untouched
//! 4. Otherwise publish an upgraded snapshot and place the type in its
//!    library category
//!
//! Concurrent calls for the same type may both fetch. The registry upgrade
//! is a no-op once a renderer is present, so the final state does not
//! depend on which call finishes first.

use crate::{CapabilityMap, LoadError};
use pagewright_schema::{ComponentLibrary, ForwardProps, RegistryHandle, SchemaUpgrade};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The type could already render; no fetch happened
    AlreadyLoaded,
    /// The loader ran and the registry now renders the type
    Loaded,
}

#[derive(Debug, Clone)]
pub struct DynamicLoader {
    capabilities: Arc<CapabilityMap>,
    library: Arc<ComponentLibrary>,
}

impl DynamicLoader {
    pub fn new(capabilities: CapabilityMap, library: ComponentLibrary) -> Self {
        Self {
            capabilities: Arc::new(capabilities),
            library: Arc::new(library),
        }
    }

    pub fn library(&self) -> &ComponentLibrary {
        &self.library
    }

    pub fn capabilities(&self) -> &CapabilityMap {
        &self.capabilities
    }

    pub async fn try_ensure_loaded(
        &self,
        registry: &RegistryHandle,
        type_id: &str,
    ) -> Result<LoadStatus, LoadError> {
        if registry.snapshot().is_renderable(type_id) {
            return Ok(LoadStatus::AlreadyLoaded);
        }

        let loader = self
            .capabilities
            .get(type_id)
            .cloned()
            .ok_or_else(|| LoadError::NoLoader(type_id.to_string()))?;

        tracing::debug!(type_id, "loading component");
        let module = loader().await?;
        let component = module
            .default
            .ok_or_else(|| LoadError::MissingDefaultExport(type_id.to_string()))?;

        let meta = self.library.get(type_id);
        let label = meta
            .map(|m| m.label.clone())
            .unwrap_or_else(|| type_id.to_string());
        let description = meta.and_then(|m| m.description.clone());
        let upgrade = SchemaUpgrade::new(label, ForwardProps::new(component).into_capability())
            .describe(description);
        let placement = self.library.placement(type_id);

        if registry.upgrade(type_id, &upgrade, placement.as_ref()) {
            tracing::info!(type_id, version = registry.snapshot().version(), "component loaded");
        } else {
            tracing::debug!(type_id, "component already upgraded by another load");
        }

        Ok(LoadStatus::Loaded)
    }

    /// [`Self::try_ensure_loaded`], reporting failures through the log
    /// instead of returning them
    pub async fn ensure_loaded(&self, registry: &RegistryHandle, type_id: &str) -> bool {
        match self.try_ensure_loaded(registry, type_id).await {
            Ok(_) => true,
            Err(err @ LoadError::NoLoader(_)) => {
                tracing::warn!(type_id, %err, "unknown block type");
                false
            }
            Err(err) => {
                tracing::error!(type_id, %err, "component failed to load");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LoadedModule;
    use pagewright_schema::{PropertyMap, SchemaRegistry, SlotRenderer};

    fn render(props: &PropertyMap, _: &dyn SlotRenderer) -> String {
        format!("<section>{}</section>", props.len())
    }

    fn setup() -> (DynamicLoader, RegistryHandle) {
        let library = ComponentLibrary::standard();
        let registry = RegistryHandle::new(SchemaRegistry::new().with_stubs(&library));

        let mut capabilities = CapabilityMap::new();
        capabilities.register_fn("HeroBlock", || async { Ok(LoadedModule::new(Arc::new(render))) });
        capabilities.register_fn("PricingBlock", || async { Ok(LoadedModule::empty()) });
        capabilities.register_fn("FooterBlock", || async {
            Err(LoadError::fetch("FooterBlock", "connection reset"))
        });

        (DynamicLoader::new(capabilities, library), registry)
    }

    #[tokio::test]
    async fn test_load_upgrades_stub() {
        let (loader, registry) = setup();

        let status = loader.try_ensure_loaded(&registry, "HeroBlock").await.unwrap();
        assert_eq!(status, LoadStatus::Loaded);

        let snapshot = registry.snapshot();
        let schema = snapshot.get_schema("HeroBlock").unwrap();
        assert!(!schema.is_stub());
        assert_eq!(schema.label, "Hero");
        assert_eq!(
            schema.description.as_deref(),
            Some("Full-width banner with headline and call to action")
        );
        assert_eq!(snapshot.categories().category_of("HeroBlock"), Some("marketing"));
    }

    #[tokio::test]
    async fn test_second_load_is_a_no_op() {
        let (loader, registry) = setup();
        loader.try_ensure_loaded(&registry, "HeroBlock").await.unwrap();
        let version = registry.snapshot().version();

        let status = loader.try_ensure_loaded(&registry, "HeroBlock").await.unwrap();
        assert_eq!(status, LoadStatus::AlreadyLoaded);
        assert_eq!(registry.snapshot().version(), version);
    }

    #[tokio::test]
    async fn test_failures_leave_registry_unchanged() {
        let (loader, registry) = setup();
        let before = registry.snapshot();

        assert_eq!(
            loader.try_ensure_loaded(&registry, "NoSuchBlock").await,
            Err(LoadError::NoLoader("NoSuchBlock".to_string()))
        );
        assert_eq!(
            loader.try_ensure_loaded(&registry, "PricingBlock").await,
            Err(LoadError::MissingDefaultExport("PricingBlock".to_string()))
        );
        assert!(matches!(
            loader.try_ensure_loaded(&registry, "FooterBlock").await,
            Err(LoadError::Fetch { .. })
        ));
        assert!(!loader.ensure_loaded(&registry, "FooterBlock").await);

        assert_eq!(*registry.snapshot(), *before);
    }
}
