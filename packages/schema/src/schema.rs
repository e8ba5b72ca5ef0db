//! # Block Schema
//!
//! A schema starts either complete (core blocks) or as a stub holding only
//! metadata (library blocks). Upgrades are monotonic:
//!
//! - a missing renderer is filled in, an existing one is never replaced
//! - field definitions are added, never removed
//! - a schema that already renders is left untouched
//!
//! Applying the same upgrade twice yields the same schema as applying it once.

use crate::fields::FieldDefinition;
use crate::{PropertyMap, RenderCapability};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Schema for one block type
#[derive(Clone)]
pub struct BlockSchema {
    pub label: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub fields: BTreeMap<String, FieldDefinition>,
    pub default_props: PropertyMap,
    render: Option<RenderCapability>,
}

/// Fill-in data produced when a library block is loaded
#[derive(Clone)]
pub struct SchemaUpgrade {
    pub label: String,
    pub description: Option<String>,
    pub fields: BTreeMap<String, FieldDefinition>,
    pub render: RenderCapability,
}

impl BlockSchema {
    /// Create a stub schema with no fields and no renderer
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
            category: None,
            fields: BTreeMap::new(),
            default_props: PropertyMap::new(),
            render: None,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn field(mut self, name: &str, definition: FieldDefinition) -> Self {
        self.fields.insert(name.to_string(), definition);
        self
    }

    pub fn fields(mut self, fields: BTreeMap<String, FieldDefinition>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn defaults(mut self, defaults: PropertyMap) -> Self {
        self.default_props.extend(defaults);
        self
    }

    pub fn render_with(mut self, render: RenderCapability) -> Self {
        self.render = Some(render);
        self
    }

    pub fn render(&self) -> Option<&RenderCapability> {
        self.render.as_ref()
    }

    /// True until a renderer has been merged in
    pub fn is_stub(&self) -> bool {
        self.render.is_none()
    }

    /// Apply an upgrade. Returns `None` when it would change nothing.
    pub fn upgraded(&self, upgrade: &SchemaUpgrade) -> Option<BlockSchema> {
        if self.render.is_some() {
            return None;
        }

        let mut next = self.clone();
        next.label = upgrade.label.clone();
        next.description = upgrade
            .description
            .clone()
            .or_else(|| self.description.clone());
        for (name, definition) in &upgrade.fields {
            next.fields
                .entry(name.clone())
                .or_insert_with(|| definition.clone());
        }
        next.render = Some(upgrade.render.clone());

        Some(next)
    }
}

impl SchemaUpgrade {
    pub fn new(label: impl Into<String>, render: RenderCapability) -> Self {
        Self {
            label: label.into(),
            description: None,
            fields: BTreeMap::new(),
            render,
        }
    }

    pub fn describe(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Schema to insert when no stub exists for the type
    pub fn into_schema(self) -> BlockSchema {
        BlockSchema {
            label: self.label,
            description: self.description,
            category: None,
            fields: self.fields,
            default_props: PropertyMap::new(),
            render: Some(self.render),
        }
    }
}

fn same_render(a: &Option<RenderCapability>, b: &Option<RenderCapability>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => std::ptr::eq(
            Arc::as_ptr(a) as *const (),
            Arc::as_ptr(b) as *const (),
        ),
        _ => false,
    }
}

impl PartialEq for BlockSchema {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
            && self.description == other.description
            && self.category == other.category
            && self.fields == other.fields
            && self.default_props == other.default_props
            && same_render(&self.render, &other.render)
    }
}

impl fmt::Debug for BlockSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockSchema")
            .field("label", &self.label)
            .field("description", &self.description)
            .field("category", &self.category)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("default_props", &self.default_props)
            .field("render", &self.render.is_some())
            .finish()
    }
}

impl fmt::Debug for SchemaUpgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaUpgrade")
            .field("label", &self.label)
            .field("description", &self.description)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NoSlots, SlotRenderer};

    fn renderer(output: &'static str) -> RenderCapability {
        Arc::new(move |_: &PropertyMap, _: &dyn SlotRenderer| output.to_string())
    }

    #[test]
    fn test_stub_upgrade_fills_renderer() {
        let stub = BlockSchema::new("Hero")
            .in_category("marketing")
            .field("title", FieldDefinition::text());
        assert!(stub.is_stub());

        let upgrade = SchemaUpgrade::new("Hero Banner", renderer("<section/>"))
            .describe(Some("Large banner".to_string()));
        let upgraded = stub.upgraded(&upgrade).unwrap();

        assert!(!upgraded.is_stub());
        assert_eq!(upgraded.label, "Hero Banner");
        assert_eq!(upgraded.description.as_deref(), Some("Large banner"));
        assert_eq!(upgraded.category.as_deref(), Some("marketing"));
        // Existing fields survive the upgrade
        assert!(upgraded.fields.contains_key("title"));
        assert_eq!(
            upgraded.render().unwrap().render(&PropertyMap::new(), &NoSlots),
            "<section/>"
        );
    }

    #[test]
    fn test_upgrade_is_idempotent() {
        let stub = BlockSchema::new("Hero");
        let upgrade = SchemaUpgrade::new("Hero", renderer("a"));

        let once = stub.upgraded(&upgrade).unwrap();
        assert!(once.upgraded(&upgrade).is_none());
    }

    #[test]
    fn test_loaded_schema_is_never_overwritten() {
        let loaded = BlockSchema::new("Heading").render_with(renderer("first"));
        let upgrade = SchemaUpgrade::new("Other", renderer("second"));

        assert!(loaded.upgraded(&upgrade).is_none());
    }

    #[test]
    fn test_upgrade_keeps_description_when_none_given() {
        let stub = BlockSchema::new("Footer").describe("Site footer");
        let upgraded = stub
            .upgraded(&SchemaUpgrade::new("Footer", renderer("")))
            .unwrap();

        assert_eq!(upgraded.description.as_deref(), Some("Site footer"));
    }
}
