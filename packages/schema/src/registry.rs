//! # Schema Registry
//!
//! Immutable, versioned snapshot of every known block schema plus the
//! palette index. Upgrades never mutate a snapshot in place; they produce
//! the next one (see [`crate::RegistryHandle`]).

use crate::{
    BlockSchema, Category, CategoryIndex, CategoryPlacement, ComponentLibrary, SchemaUpgrade,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaRegistry {
    version: u64,
    components: BTreeMap<String, BlockSchema>,
    categories: CategoryIndex,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from complete schemas and their categories.
    ///
    /// Category members without a renderable schema are left out of the
    /// palette.
    pub fn from_parts(
        components: impl IntoIterator<Item = (String, BlockSchema)>,
        categories: Vec<Category>,
    ) -> Self {
        let components: BTreeMap<_, _> = components.into_iter().collect();

        let palette = categories
            .into_iter()
            .map(|category| Category {
                components: category
                    .components
                    .into_iter()
                    .filter(|id| components.get(id).map_or(false, |s| !s.is_stub()))
                    .collect(),
                ..category
            })
            .collect();

        Self {
            version: 0,
            components,
            categories: CategoryIndex::from_categories(palette),
        }
    }

    /// Add a stub for every library component the registry doesn't know yet
    pub fn with_stubs(mut self, library: &ComponentLibrary) -> Self {
        for id in library.components.keys() {
            if self.components.contains_key(id) {
                continue;
            }
            if let Some(stub) = library.stub_schema(id) {
                self.components.insert(id.clone(), stub);
            }
        }
        self
    }

    /// Snapshot version; increases by one for every effective upgrade
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get_schema(&self, type_id: &str) -> Option<&BlockSchema> {
        self.components.get(type_id)
    }

    /// True when the type has a render capability
    pub fn is_renderable(&self, type_id: &str) -> bool {
        self.get_schema(type_id).map_or(false, |s| !s.is_stub())
    }

    pub fn component_ids(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn categories(&self) -> &CategoryIndex {
        &self.categories
    }

    /// Current palette, in display order
    pub fn list_categories(&self) -> Vec<Category> {
        self.categories.to_vec()
    }

    /// Merge an upgrade into the registry, returning the next snapshot.
    ///
    /// Idempotent: re-applying an upgrade that already took effect returns
    /// an identical registry with the same version.
    pub fn register_or_upgrade(
        &self,
        type_id: &str,
        upgrade: &SchemaUpgrade,
        placement: Option<&CategoryPlacement>,
    ) -> SchemaRegistry {
        let mut next = self.clone();
        next.apply_upgrade(type_id, upgrade, placement);
        next
    }

    /// In-place form of [`Self::register_or_upgrade`]. Returns whether
    /// anything changed.
    pub(crate) fn apply_upgrade(
        &mut self,
        type_id: &str,
        upgrade: &SchemaUpgrade,
        placement: Option<&CategoryPlacement>,
    ) -> bool {
        let schema_changed = match self.components.get(type_id) {
            Some(existing) => match existing.upgraded(upgrade) {
                Some(mut next) => {
                    if next.category.is_none() {
                        next.category = placement.map(|p| p.id.clone());
                    }
                    self.components.insert(type_id.to_string(), next);
                    true
                }
                None => false,
            },
            None => {
                let mut schema = upgrade.clone().into_schema();
                schema.category = placement.map(|p| p.id.clone());
                self.components.insert(type_id.to_string(), schema);
                true
            }
        };

        let category_changed = placement
            .map(|p| self.categories.insert_member(p, type_id))
            .unwrap_or(false);

        let changed = schema_changed || category_changed;
        if changed {
            self.version += 1;
            tracing::debug!(type_id, version = self.version, "registry upgraded");
        }
        changed
    }
}
