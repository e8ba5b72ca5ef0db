//! Loader capability map: block type id → async component factory.
//!
//! A missing entry is the normal answer for unknown types.

use crate::LoadError;
use futures::future::BoxFuture;
use futures::FutureExt;
use pagewright_schema::RenderCapability;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// What a loader resolves to. `default` is the component to render with;
/// a module without one is unusable.
#[derive(Clone, Default)]
pub struct LoadedModule {
    pub default: Option<RenderCapability>,
}

impl LoadedModule {
    pub fn new(component: RenderCapability) -> Self {
        Self {
            default: Some(component),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for LoadedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModule")
            .field("default", &self.default.is_some())
            .finish()
    }
}

pub type LoadFuture = BoxFuture<'static, Result<LoadedModule, LoadError>>;

pub type ComponentLoader = Arc<dyn Fn() -> LoadFuture + Send + Sync>;

#[derive(Clone, Default)]
pub struct CapabilityMap {
    loaders: HashMap<String, ComponentLoader>,
}

impl CapabilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, type_id: &str, loader: ComponentLoader) {
        self.loaders.insert(type_id.to_string(), loader);
    }

    /// Register an async closure as a loader
    pub fn register_fn<F, Fut>(&mut self, type_id: &str, factory: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<LoadedModule, LoadError>> + Send + 'static,
    {
        self.register(type_id, Arc::new(move || factory().boxed()));
    }

    pub fn get(&self, type_id: &str) -> Option<&ComponentLoader> {
        self.loaders.get(type_id)
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.loaders.contains_key(type_id)
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl std::fmt::Debug for CapabilityMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<_> = self.loaders.keys().collect();
        types.sort();
        f.debug_struct("CapabilityMap").field("types", &types).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewright_schema::{PropertyMap, SlotRenderer};

    fn render(_: &PropertyMap, _: &dyn SlotRenderer) -> String {
        "ok".to_string()
    }

    #[tokio::test]
    async fn test_register_fn() {
        let mut map = CapabilityMap::new();
        map.register_fn("QuoteBlock", || async {
            Ok(LoadedModule::new(Arc::new(render)))
        });

        assert!(map.contains("QuoteBlock"));
        assert!(map.get("HeadingBlock").is_none());

        let loader = map.get("QuoteBlock").unwrap();
        let module = loader().await.unwrap();
        assert!(module.default.is_some());
    }
}
