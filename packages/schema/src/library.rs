//! # Extension Library
//!
//! Metadata for block types whose renderers are loaded on demand. The
//! library only describes blocks; the loader map in `pagewright-loader`
//! knows how to fetch them.
//!
//! Manifest format:
//!
//! ```json
//! {
//!   "categories": [{ "id": "marketing", "title": "Marketing", "components": ["HeroBlock"] }],
//!   "components": {
//!     "HeroBlock": { "label": "Hero", "description": "...", "moduleId": "hero" }
//!   }
//! }
//! ```

use crate::{BlockSchema, Category, CategoryPlacement, SchemaError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Static metadata for one library block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryComponent {
    #[serde(default)]
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentLibrary {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub components: BTreeMap<String, LibraryComponent>,
}

impl ComponentLibrary {
    /// Parse and validate a library manifest
    pub fn from_json(source: &str) -> Result<Self, SchemaError> {
        let mut library: ComponentLibrary = serde_json::from_str(source)?;

        for (id, component) in library.components.iter_mut() {
            if component.id.is_empty() {
                component.id = id.clone();
            }
        }

        for category in &library.categories {
            for member in &category.components {
                if !library.components.contains_key(member) {
                    return Err(SchemaError::UnknownComponent {
                        category: category.id.clone(),
                        component: member.clone(),
                    });
                }
            }
        }

        Ok(library)
    }

    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    /// The built-in extension library
    pub fn standard() -> Self {
        let components = [
            ("HeroBlock", "Hero", "Full-width banner with headline and call to action", "hero"),
            ("FeatureGridBlock", "Feature Grid", "Grid of product features", "feature-grid"),
            ("TestimonialBlock", "Testimonial", "Customer quote with attribution", "testimonial"),
            ("PricingBlock", "Pricing", "Pricing plan card", "pricing"),
            ("CallToActionBlock", "Call to Action", "Prominent action prompt", "call-to-action"),
            ("NavbarBlock", "Navbar", "Top navigation bar", "navbar"),
            ("FooterBlock", "Footer", "Site footer with links", "footer"),
        ]
        .into_iter()
        .map(|(id, label, description, module)| {
            (
                id.to_string(),
                LibraryComponent {
                    id: id.to_string(),
                    label: label.to_string(),
                    description: Some(description.to_string()),
                    preview_image: None,
                    module_id: Some(module.to_string()),
                },
            )
        })
        .collect();

        Self {
            categories: vec![
                Category::new(
                    "marketing",
                    "Marketing",
                    &[
                        "HeroBlock",
                        "FeatureGridBlock",
                        "TestimonialBlock",
                        "PricingBlock",
                        "CallToActionBlock",
                    ],
                ),
                Category::new("navigation", "Navigation", &["NavbarBlock", "FooterBlock"]),
            ],
            components,
        }
    }

    pub fn get(&self, type_id: &str) -> Option<&LibraryComponent> {
        self.components.get(type_id)
    }

    /// The library category listing `type_id`
    pub fn category_of(&self, type_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.contains(type_id))
    }

    /// Palette placement for a block once it is loaded
    pub fn placement(&self, type_id: &str) -> Option<CategoryPlacement> {
        self.category_of(type_id).map(|c| CategoryPlacement {
            id: c.id.clone(),
            title: c.title.clone(),
        })
    }

    /// Metadata-only schema for a library block
    pub fn stub_schema(&self, type_id: &str) -> Option<BlockSchema> {
        let meta = self.get(type_id)?;
        let mut stub = BlockSchema::new(meta.label.clone());
        stub.description = meta.description.clone();
        stub.category = self.category_of(type_id).map(|c| c.id.clone());
        Some(stub)
    }
}
