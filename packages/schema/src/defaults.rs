//! # Default Props
//!
//! Initial property sets for newly inserted blocks. Each call builds a
//! fresh value tree, so two instances of the same type never share nested
//! lists or records.
//!
//! Unknown types get an empty map (plus an id when requested): insertion
//! never fails because a type has no declared defaults.

use crate::{generate_instance_id, instance_id, props_from_value, PropertyMap, ID_PROP};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

pub type PropsBuilder = Arc<dyn Fn() -> PropertyMap + Send + Sync>;

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/800x400";
const PLACEHOLDER_AVATAR: &str = "https://via.placeholder.com/80";

/// Type id → default props builder
#[derive(Clone, Default)]
pub struct DefaultPropsTable {
    builders: HashMap<String, PropsBuilder>,
}

impl DefaultPropsTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builders for the core palette and the standard extension library
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for (type_id, value) in standard_defaults() {
            table.register_value(type_id, value);
        }
        table
    }

    pub fn register(&mut self, type_id: &str, builder: PropsBuilder) {
        self.builders.insert(type_id.to_string(), builder);
    }

    /// Register a builder that returns a copy of a fixed value
    pub fn register_value(&mut self, type_id: &str, value: Value) {
        let defaults = props_from_value(value).unwrap_or_default();
        self.register(type_id, Arc::new(move || defaults.clone()));
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.builders.contains_key(type_id)
    }

    /// Independent copy of the type's declared defaults
    pub fn build_default_props(&self, type_id: &str) -> PropertyMap {
        match self.builders.get(type_id) {
            Some(builder) => builder(),
            None => PropertyMap::new(),
        }
    }

    /// Defaults plus a freshly generated instance id
    pub fn build_default_props_with_id(&self, type_id: &str) -> PropertyMap {
        let mut props = self.build_default_props(type_id);
        props.insert(
            ID_PROP.to_string(),
            Value::String(generate_instance_id(type_id)),
        );
        props
    }
}

/// Why supplied insertion props were not used exactly as given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropsAdjustment {
    /// Not a record; replaced by the type's defaults
    NotARecord,
    /// Kept, with a generated id added
    MissingId,
    /// Kept, with the clashing id replaced
    DuplicateId,
}

impl std::fmt::Display for PropsAdjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropsAdjustment::NotARecord => write!(f, "defaultProps is not a record"),
            PropsAdjustment::MissingId => write!(f, "defaultProps has no usable id"),
            PropsAdjustment::DuplicateId => write!(f, "defaultProps id is already in use"),
        }
    }
}

/// Props for a block about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct InsertProps {
    pub props: PropertyMap,
    pub adjustment: Option<PropsAdjustment>,
}

impl DefaultPropsTable {
    /// Props for a new instance of `type_id`.
    ///
    /// Absent or non-record `supplied` values fall back to the type's
    /// defaults. A supplied record is kept as-is except for its id, which
    /// is generated when missing, empty or already taken per `id_in_use`.
    pub fn resolve_insert_props(
        &self,
        type_id: &str,
        supplied: Option<Value>,
        id_in_use: impl Fn(&str) -> bool,
    ) -> InsertProps {
        let Some(supplied) = supplied else {
            return InsertProps {
                props: self.build_default_props_with_id(type_id),
                adjustment: None,
            };
        };

        let Some(mut props) = props_from_value(supplied) else {
            return InsertProps {
                props: self.build_default_props_with_id(type_id),
                adjustment: Some(PropsAdjustment::NotARecord),
            };
        };

        let adjustment = match instance_id(&props) {
            None => Some(PropsAdjustment::MissingId),
            Some(id) if id_in_use(id) => Some(PropsAdjustment::DuplicateId),
            Some(_) => None,
        };
        if adjustment.is_some() {
            props.insert(
                ID_PROP.to_string(),
                Value::String(generate_instance_id(type_id)),
            );
        }

        InsertProps { props, adjustment }
    }
}

impl std::fmt::Debug for DefaultPropsTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<_> = self.builders.keys().collect();
        types.sort();
        f.debug_struct("DefaultPropsTable").field("types", &types).finish()
    }
}

fn standard_table() -> &'static DefaultPropsTable {
    static TABLE: OnceLock<DefaultPropsTable> = OnceLock::new();
    TABLE.get_or_init(DefaultPropsTable::standard)
}

/// [`DefaultPropsTable::build_default_props`] on the standard table
pub fn build_default_props(type_id: &str) -> PropertyMap {
    standard_table().build_default_props(type_id)
}

/// [`DefaultPropsTable::build_default_props_with_id`] on the standard table
pub fn build_default_props_with_id(type_id: &str) -> PropertyMap {
    standard_table().build_default_props_with_id(type_id)
}

/// [`DefaultPropsTable::resolve_insert_props`] on the standard table
pub fn resolve_insert_props(
    type_id: &str,
    supplied: Option<Value>,
    id_in_use: impl Fn(&str) -> bool,
) -> InsertProps {
    standard_table().resolve_insert_props(type_id, supplied, id_in_use)
}

fn standard_defaults() -> Vec<(&'static str, Value)> {
    vec![
        ("HeadingBlock", json!({ "title": "Welcome to your page", "level": "h2" })),
        (
            "TextBlock",
            json!({
                "content": "Start by editing this text to share your message.",
                "fontSize": "base",
            }),
        ),
        (
            "ButtonBlock",
            json!({
                "text": "Learn More",
                "href": "#",
                "variant": "default",
                "size": "default",
                "alignment": "center",
            }),
        ),
        ("BadgeBlock", json!({ "text": "New", "variant": "secondary" })),
        (
            "CardBlock",
            json!({
                "title": "Card Title",
                "description": "Add a supporting description here.",
                "content": "Use this area to provide more detail about your card.",
                "footerText": "Optional footer",
            }),
        ),
        (
            "AlertBlock",
            json!({
                "title": "Heads up!",
                "description": "This is an informational alert message.",
                "variant": "default",
            }),
        ),
        (
            "InputBlock",
            json!({ "label": "Email address", "placeholder": "you@example.com", "type": "email" }),
        ),
        (
            "TextareaBlock",
            json!({ "label": "Message", "placeholder": "Share more details here...", "rows": 4 }),
        ),
        ("CheckboxBlock", json!({ "label": "I agree to the terms", "defaultChecked": false })),
        ("SwitchBlock", json!({ "label": "Enable notifications", "defaultChecked": true })),
        ("ContainerBlock", json!({ "padding": "md", "maxWidth": "lg" })),
        ("SeparatorBlock", json!({ "orientation": "horizontal" })),
        ("SkeletonBlock", json!({ "skeletonWidth": "100%", "skeletonHeight": "24px" })),
        ("ProgressBlock", json!({ "value": 60, "label": "Progress" })),
        ("SpinnerBlock", json!({ "size": "md" })),
        (
            "AvatarBlock",
            json!({ "src": PLACEHOLDER_AVATAR, "alt": "Avatar preview", "fallback": "AB" }),
        ),
        (
            "ImageBlock",
            json!({ "src": PLACEHOLDER_IMAGE, "alt": "Placeholder image", "objectFit": "cover" }),
        ),
        (
            "AccordionBlock",
            json!({
                "items": [
                    { "title": "Accordion Item One", "content": "Add detailed content for item one." },
                    { "title": "Accordion Item Two", "content": "Provide more information for item two." },
                ]
            }),
        ),
        (
            "TabsBlock",
            json!({
                "tabs": [
                    { "label": "Tab One", "content": "This is the first tab content." },
                    { "label": "Tab Two", "content": "This is the second tab content." },
                ]
            }),
        ),
        (
            "ColumnsBlock",
            json!({ "columns": 2, "gap": "md", "distribution": "equal", "padding": "md" }),
        ),
        (
            "HeroBlock",
            json!({
                "title": "Build pages faster",
                "subtitle": "Compose, preview and publish without leaving the editor.",
                "ctaText": "Get started",
                "ctaHref": "#",
            }),
        ),
        (
            "FeatureGridBlock",
            json!({
                "features": [
                    { "title": "Fast", "description": "Loads only what the page needs." },
                    { "title": "Flexible", "description": "Mix core and library blocks." },
                    { "title": "Portable", "description": "Pages are plain JSON." },
                ]
            }),
        ),
        (
            "TestimonialBlock",
            json!({ "quote": "This changed how our team ships pages.", "author": "Jane Doe", "role": "Head of Marketing" }),
        ),
        (
            "PricingBlock",
            json!({
                "plan": "Pro",
                "price": "$29",
                "period": "month",
                "features": [
                    { "text": "Unlimited pages" },
                    { "text": "Custom domains" },
                ]
            }),
        ),
        (
            "CallToActionBlock",
            json!({ "title": "Ready to start?", "buttonText": "Sign up", "buttonHref": "#" }),
        ),
        (
            "NavbarBlock",
            json!({
                "brand": "Brand",
                "links": [
                    { "label": "Home", "href": "/" },
                    { "label": "About", "href": "/about" },
                ]
            }),
        ),
        (
            "FooterBlock",
            json!({
                "text": "© Your Company",
                "links": [
                    { "label": "Privacy", "href": "/privacy" },
                ]
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{instance_id, palette, ComponentLibrary};

    #[test]
    fn test_defaults_are_independent_copies() {
        let mut first = build_default_props("AccordionBlock");
        let second = build_default_props("AccordionBlock");
        assert_eq!(first, second);

        first["items"].as_array_mut().unwrap().push(json!({ "title": "Three" }));
        first["items"][0]["title"] = json!("Changed");

        let third = build_default_props("AccordionBlock");
        assert_eq!(second, third);
        assert_eq!(third["items"].as_array().unwrap().len(), 2);
        assert_eq!(third["items"][0]["title"], "Accordion Item One");
    }

    #[test]
    fn test_unknown_type_gets_only_an_id() {
        assert!(build_default_props("NoSuchBlock").is_empty());

        let props = build_default_props_with_id("NoSuchBlock");
        assert_eq!(props.len(), 1);
        assert!(instance_id(&props).unwrap().starts_with("NoSuchBlock-"));
    }

    #[test]
    fn test_with_id_keeps_defaults() {
        let props = build_default_props_with_id("HeadingBlock");
        assert_eq!(props["title"], "Welcome to your page");
        assert_eq!(props["level"], "h2");
        assert!(instance_id(&props).is_some());
    }

    #[test]
    fn test_supplied_record_keeps_props_and_gains_id() {
        let resolved = resolve_insert_props("HeadingBlock", Some(json!({ "title": "Hi" })), |_| false);

        assert_eq!(resolved.adjustment, Some(PropsAdjustment::MissingId));
        assert_eq!(resolved.props["title"], "Hi");
        assert!(resolved.props.get("level").is_none());
        assert!(instance_id(&resolved.props).unwrap().starts_with("HeadingBlock-"));
    }

    #[test]
    fn test_taken_id_is_replaced() {
        let supplied = json!({ "id": "HeadingBlock-1", "title": "Hi" });
        let resolved = resolve_insert_props("HeadingBlock", Some(supplied.clone()), |id| {
            id == "HeadingBlock-1"
        });
        assert_eq!(resolved.adjustment, Some(PropsAdjustment::DuplicateId));
        assert_ne!(instance_id(&resolved.props), Some("HeadingBlock-1"));
        assert_eq!(resolved.props["title"], "Hi");

        let free = resolve_insert_props("HeadingBlock", Some(supplied), |_| false);
        assert_eq!(free.adjustment, None);
        assert_eq!(instance_id(&free.props), Some("HeadingBlock-1"));
    }

    #[test]
    fn test_non_record_and_absent_use_defaults() {
        let resolved = resolve_insert_props("HeadingBlock", Some(json!("Hi")), |_| false);
        assert_eq!(resolved.adjustment, Some(PropsAdjustment::NotARecord));
        assert_eq!(resolved.props["title"], "Welcome to your page");

        let resolved = resolve_insert_props("HeadingBlock", None, |_| false);
        assert_eq!(resolved.adjustment, None);
        assert_eq!(resolved.props["level"], "h2");
        assert!(instance_id(&resolved.props).is_some());
    }

    #[test]
    fn test_standard_table_covers_palette_and_library() {
        let table = DefaultPropsTable::standard();
        for (id, _) in palette::schemas() {
            assert!(table.contains(&id), "{} has no insertion defaults", id);
        }
        for id in ComponentLibrary::standard().components.keys() {
            assert!(table.contains(id), "{} has no insertion defaults", id);
        }
    }

    #[test]
    fn test_custom_builders() {
        let mut table = DefaultPropsTable::empty();
        table.register("QuoteBlock", Arc::new(|| props_from_value(json!({ "text": "Hi" })).unwrap()));

        assert_eq!(table.build_default_props("QuoteBlock")["text"], "Hi");
        assert!(table.build_default_props("HeadingBlock").is_empty());
    }
}
