//! Render capability attached to a schema.
//!
//! Core blocks carry one from process start; library blocks gain one when
//! their module is loaded.

use crate::PropertyMap;
use std::sync::Arc;

/// Renders the zones owned by the block currently being rendered
pub trait SlotRenderer {
    /// Render every block assigned to the named zone (e.g. `column-0`)
    fn render_zone(&self, zone: &str) -> String;

    /// True inside the editor, false for end-user output
    fn is_editing(&self) -> bool {
        false
    }
}

/// A renderable block component
pub trait BlockComponent: Send + Sync {
    fn render(&self, props: &PropertyMap, slots: &dyn SlotRenderer) -> String;
}

impl<F> BlockComponent for F
where
    F: Fn(&PropertyMap, &dyn SlotRenderer) -> String + Send + Sync,
{
    fn render(&self, props: &PropertyMap, slots: &dyn SlotRenderer) -> String {
        self(props, slots)
    }
}

pub type RenderCapability = Arc<dyn BlockComponent>;

/// Render capability for a dynamically loaded component.
///
/// Hands every property, unknown keys included, to the wrapped component.
pub struct ForwardProps {
    component: RenderCapability,
}

impl ForwardProps {
    pub fn new(component: RenderCapability) -> Self {
        Self { component }
    }

    pub fn into_capability(self) -> RenderCapability {
        Arc::new(self)
    }
}

impl BlockComponent for ForwardProps {
    fn render(&self, props: &PropertyMap, slots: &dyn SlotRenderer) -> String {
        self.component.render(props, slots)
    }
}

/// Slot renderer for blocks rendered outside a document
pub struct NoSlots;

impl SlotRenderer for NoSlots {
    fn render_zone(&self, _zone: &str) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_forward_props_passes_everything_through() {
        let inner: RenderCapability = Arc::new(|props: &PropertyMap, _: &dyn SlotRenderer| {
            let mut keys: Vec<_> = props.keys().cloned().collect();
            keys.sort();
            keys.join(",")
        });
        let forward = ForwardProps::new(inner).into_capability();

        let props = crate::props_from_value(json!({"title": "Hi", "extra": 1, "id": "x"})).unwrap();
        assert_eq!(forward.render(&props, &NoSlots), "extra,id,title");
    }
}
