use crate::{CategoryPlacement, SchemaRegistry, SchemaUpgrade};
use std::sync::Arc;
use tokio::sync::watch;

/// Owner of the current registry snapshot.
///
/// Readers take a cheap `Arc` snapshot; upgrades are a single atomic
/// read-modify-write that publishes the next snapshot. Concurrent upgrades
/// of the same type converge because a schema that already renders is
/// never replaced.
#[derive(Clone)]
pub struct RegistryHandle {
    tx: Arc<watch::Sender<Arc<SchemaRegistry>>>,
}

impl RegistryHandle {
    pub fn new(registry: SchemaRegistry) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(registry));
        Self { tx: Arc::new(tx) }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<SchemaRegistry> {
        self.tx.borrow().clone()
    }

    /// Receive every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<SchemaRegistry>> {
        self.tx.subscribe()
    }

    /// Merge an upgrade and publish the result. Returns whether a new
    /// snapshot was published.
    pub fn upgrade(
        &self,
        type_id: &str,
        upgrade: &SchemaUpgrade,
        placement: Option<&CategoryPlacement>,
    ) -> bool {
        self.tx.send_if_modified(|current| {
            let mut next = (**current).clone();
            if next.apply_upgrade(type_id, upgrade, placement) {
                *current = Arc::new(next);
                true
            } else {
                false
            }
        })
    }
}

impl std::fmt::Debug for RegistryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryHandle")
            .field("version", &self.snapshot().version())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ComponentLibrary, PropertyMap, RenderCapability, SlotRenderer};

    fn renderer() -> RenderCapability {
        Arc::new(|_: &PropertyMap, _: &dyn SlotRenderer| String::new())
    }

    #[test]
    fn test_upgrade_publishes_new_snapshot() {
        let handle = RegistryHandle::new(SchemaRegistry::new().with_stubs(&ComponentLibrary::standard()));
        let before = handle.snapshot();

        assert!(handle.upgrade("HeroBlock", &SchemaUpgrade::new("Hero", renderer()), None));

        let after = handle.snapshot();
        assert!(!before.is_renderable("HeroBlock"));
        assert!(after.is_renderable("HeroBlock"));
        assert_eq!(after.version(), before.version() + 1);
    }

    #[test]
    fn test_repeated_upgrade_publishes_nothing() {
        let handle = RegistryHandle::new(SchemaRegistry::new());
        let upgrade = SchemaUpgrade::new("Hero", renderer());

        assert!(handle.upgrade("HeroBlock", &upgrade, None));
        assert!(!handle.upgrade("HeroBlock", &upgrade, None));
        assert_eq!(handle.snapshot().version(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_see_upgrades() {
        let handle = RegistryHandle::new(SchemaRegistry::new());
        let mut rx = handle.subscribe();

        handle.upgrade("HeroBlock", &SchemaUpgrade::new("Hero", renderer()), None);

        rx.changed().await.unwrap();
        assert!(rx.borrow().is_renderable("HeroBlock"));
    }
}
