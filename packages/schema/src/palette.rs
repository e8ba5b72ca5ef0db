//! # Core Palette
//!
//! Block types available from process start. Each schema carries its field
//! definitions and schema defaults (including the shared CSS utility props);
//! render capabilities are attached by the renderer crate.

use crate::fields::{css_fields, default_css_props, string_options, value_options};
use crate::{props_from_value, BlockSchema, Category, FieldDefinition};
use serde_json::{json, Value};

/// Container blocks and the zone names they own.
///
/// `ColumnsBlock` owns `column-0..column-N` where N comes from its
/// `columns` prop; the names listed here are the fixed ones.
pub const CONTAINER_ZONES: &[(&str, &[&str])] = &[("ContainerBlock", &["container-content"])];

/// Upper bound for `ColumnsBlock.columns`
pub const MAX_COLUMNS: u64 = 4;

/// Zone names owned by a container block instance with the given props
pub fn zone_names(type_id: &str, props: &crate::PropertyMap) -> Vec<String> {
    if type_id == "ColumnsBlock" {
        let columns = props
            .get("columns")
            .and_then(Value::as_u64)
            .unwrap_or(2)
            .clamp(1, MAX_COLUMNS);
        return (0..columns).map(|i| format!("column-{}", i)).collect();
    }

    CONTAINER_ZONES
        .iter()
        .find(|(id, _)| *id == type_id)
        .map(|(_, zones)| zones.iter().map(|z| z.to_string()).collect())
        .unwrap_or_default()
}

fn schema(label: &str, category: &str, defaults: Value) -> BlockSchema {
    BlockSchema::new(label)
        .in_category(category)
        .fields(css_fields())
        .defaults(props_from_value(defaults).unwrap_or_default())
        .defaults(default_css_props())
}

fn spacing_scale() -> Vec<crate::FieldOption> {
    string_options(&[
        ("None", "none"),
        ("Small", "sm"),
        ("Medium", "md"),
        ("Large", "lg"),
        ("Extra Large", "xl"),
    ])
}

/// Core categories in palette order
pub fn categories() -> Vec<Category> {
    vec![
        Category::new("typography", "Typography", &["HeadingBlock", "TextBlock"]),
        Category::new(
            "forms",
            "Forms",
            &["InputBlock", "TextareaBlock", "CheckboxBlock", "SwitchBlock"],
        ),
        Category::new(
            "interactive",
            "Interactive",
            &["ButtonBlock", "AccordionBlock", "TabsBlock"],
        ),
        Category::new(
            "layout",
            "Layout",
            &["CardBlock", "ContainerBlock", "SeparatorBlock", "ColumnsBlock"],
        ),
        Category::new(
            "feedback",
            "Feedback",
            &["AlertBlock", "BadgeBlock", "ProgressBlock", "SpinnerBlock"],
        ),
        Category::new("media", "Media", &["AvatarBlock", "ImageBlock"]),
        Category::new("utilities", "Utilities", &["SkeletonBlock"]),
    ]
}

/// Core block schemas without render capabilities
pub fn schemas() -> Vec<(String, BlockSchema)> {
    let entries = vec![
        (
            "HeadingBlock",
            schema("Heading", "typography", json!({ "title": "Heading", "level": "h1" }))
                .field("title", FieldDefinition::text())
                .field(
                    "level",
                    FieldDefinition::select(string_options(&[
                        ("H1", "h1"),
                        ("H2", "h2"),
                        ("H3", "h3"),
                        ("H4", "h4"),
                        ("H5", "h5"),
                        ("H6", "h6"),
                    ])),
                ),
        ),
        (
            "TextBlock",
            schema(
                "Text",
                "typography",
                json!({ "content": "Your text goes here", "fontSize": "base" }),
            )
            .field("content", FieldDefinition::textarea())
            .field(
                "fontSize",
                FieldDefinition::select(string_options(&[
                    ("Small", "sm"),
                    ("Base", "base"),
                    ("Large", "lg"),
                    ("Extra Large", "xl"),
                    ("2X Large", "2xl"),
                ])),
            ),
        ),
        (
            "ButtonBlock",
            schema(
                "Button",
                "interactive",
                json!({ "text": "Click me", "variant": "default", "size": "default" }),
            )
            .field("text", FieldDefinition::text())
            .field(
                "variant",
                FieldDefinition::select(string_options(&[
                    ("Default", "default"),
                    ("Destructive", "destructive"),
                    ("Outline", "outline"),
                    ("Secondary", "secondary"),
                    ("Ghost", "ghost"),
                    ("Link", "link"),
                ])),
            )
            .field(
                "size",
                FieldDefinition::select(string_options(&[
                    ("Default", "default"),
                    ("Small", "sm"),
                    ("Large", "lg"),
                    ("Icon", "icon"),
                    ("Icon Small", "icon-sm"),
                    ("Icon Large", "icon-lg"),
                ])),
            ),
        ),
        (
            "BadgeBlock",
            schema("Badge", "feedback", json!({ "text": "Badge", "variant": "default" }))
                .field("text", FieldDefinition::text())
                .field(
                    "variant",
                    FieldDefinition::select(string_options(&[
                        ("Default", "default"),
                        ("Secondary", "secondary"),
                        ("Destructive", "destructive"),
                        ("Outline", "outline"),
                    ])),
                ),
        ),
        (
            "CardBlock",
            schema(
                "Card",
                "layout",
                json!({
                    "title": "Card Title",
                    "description": "Card description goes here",
                    "content": "Card content goes here",
                    "footerText": "Card footer",
                }),
            )
            .field("title", FieldDefinition::text())
            .field("description", FieldDefinition::textarea())
            .field("content", FieldDefinition::textarea())
            .field("footerText", FieldDefinition::text()),
        ),
        (
            "AlertBlock",
            schema(
                "Alert",
                "feedback",
                json!({
                    "title": "Alert Title",
                    "description": "Alert description goes here",
                    "variant": "default",
                }),
            )
            .field("title", FieldDefinition::text())
            .field("description", FieldDefinition::textarea())
            .field(
                "variant",
                FieldDefinition::select(string_options(&[
                    ("Default", "default"),
                    ("Destructive", "destructive"),
                ])),
            ),
        ),
        (
            "InputBlock",
            schema(
                "Input",
                "forms",
                json!({ "label": "Input Label", "placeholder": "Enter text...", "type": "text" }),
            )
            .field("label", FieldDefinition::text())
            .field("placeholder", FieldDefinition::text())
            .field(
                "type",
                FieldDefinition::select(string_options(&[
                    ("Text", "text"),
                    ("Email", "email"),
                    ("Password", "password"),
                    ("Number", "number"),
                ])),
            ),
        ),
        (
            "TextareaBlock",
            schema(
                "Textarea",
                "forms",
                json!({ "label": "Textarea Label", "placeholder": "Enter text...", "rows": 4 }),
            )
            .field("label", FieldDefinition::text())
            .field("placeholder", FieldDefinition::text())
            .field("rows", FieldDefinition::number(Some(1.0), None)),
        ),
        (
            "CheckboxBlock",
            schema(
                "Checkbox",
                "forms",
                json!({ "label": "Accept terms and conditions", "defaultChecked": false }),
            )
            .field("label", FieldDefinition::text())
            .field(
                "defaultChecked",
                FieldDefinition::radio(value_options(vec![
                    ("Checked", json!(true)),
                    ("Unchecked", json!(false)),
                ])),
            ),
        ),
        (
            "SwitchBlock",
            schema(
                "Switch",
                "forms",
                json!({ "label": "Enable notifications", "defaultChecked": false }),
            )
            .field("label", FieldDefinition::text())
            .field(
                "defaultChecked",
                FieldDefinition::radio(value_options(vec![
                    ("On", json!(true)),
                    ("Off", json!(false)),
                ])),
            ),
        ),
        (
            "ContainerBlock",
            schema("Container", "layout", json!({ "padding": "md", "maxWidth": "lg" }))
                .field("padding", FieldDefinition::select(spacing_scale()))
                .field(
                    "maxWidth",
                    FieldDefinition::select(string_options(&[
                        ("Small", "sm"),
                        ("Medium", "md"),
                        ("Large", "lg"),
                        ("Extra Large", "xl"),
                        ("2X Large", "2xl"),
                        ("Full Width", "full"),
                    ])),
                ),
        ),
        (
            "SeparatorBlock",
            schema("Separator", "layout", json!({ "orientation": "horizontal" })).field(
                "orientation",
                FieldDefinition::radio(string_options(&[
                    ("Horizontal", "horizontal"),
                    ("Vertical", "vertical"),
                ])),
            ),
        ),
        (
            "SkeletonBlock",
            schema(
                "Skeleton",
                "utilities",
                json!({ "skeletonWidth": "100%", "skeletonHeight": "20px" }),
            )
            .field("skeletonWidth", FieldDefinition::text().labelled("Skeleton Width"))
            .field("skeletonHeight", FieldDefinition::text().labelled("Skeleton Height")),
        ),
        (
            "ProgressBlock",
            schema("Progress", "feedback", json!({ "value": 50, "label": "Progress" }))
                .field("value", FieldDefinition::number(Some(0.0), Some(100.0)))
                .field("label", FieldDefinition::text()),
        ),
        (
            "SpinnerBlock",
            schema("Spinner", "feedback", json!({ "size": "md" })).field(
                "size",
                FieldDefinition::select(string_options(&[
                    ("Small", "sm"),
                    ("Medium", "md"),
                    ("Large", "lg"),
                ])),
            ),
        ),
        (
            "AvatarBlock",
            schema(
                "Avatar",
                "media",
                json!({ "src": "https://github.com/shadcn.png", "alt": "Avatar", "fallback": "CN" }),
            )
            .field("src", FieldDefinition::text())
            .field("alt", FieldDefinition::text())
            .field("fallback", FieldDefinition::text()),
        ),
        (
            "ImageBlock",
            schema(
                "Image",
                "media",
                json!({
                    "src": "https://via.placeholder.com/600x400",
                    "alt": "Placeholder image",
                    "objectFit": "cover",
                }),
            )
            .field("src", FieldDefinition::text())
            .field("alt", FieldDefinition::text())
            .field(
                "objectFit",
                FieldDefinition::select(string_options(&[
                    ("Contain", "contain"),
                    ("Cover", "cover"),
                    ("Fill", "fill"),
                    ("None", "none"),
                    ("Scale Down", "scale-down"),
                ])),
            ),
        ),
        (
            "AccordionBlock",
            schema(
                "Accordion",
                "interactive",
                json!({
                    "items": [
                        { "title": "Item 1", "content": "Content for item 1" },
                        { "title": "Item 2", "content": "Content for item 2" },
                    ]
                }),
            )
            .field(
                "items",
                FieldDefinition::array([
                    ("title", FieldDefinition::text()),
                    ("content", FieldDefinition::textarea()),
                ]),
            ),
        ),
        (
            "TabsBlock",
            schema(
                "Tabs",
                "interactive",
                json!({
                    "tabs": [
                        { "label": "Tab 1", "content": "Content for tab 1" },
                        { "label": "Tab 2", "content": "Content for tab 2" },
                    ]
                }),
            )
            .field(
                "tabs",
                FieldDefinition::array([
                    ("label", FieldDefinition::text()),
                    ("content", FieldDefinition::textarea()),
                ]),
            ),
        ),
        (
            "ColumnsBlock",
            schema(
                "Columns",
                "layout",
                json!({ "columns": 2, "gap": "md", "distribution": "equal", "padding": "md" }),
            )
            .field(
                "columns",
                FieldDefinition::select(value_options(vec![
                    ("2 Columns", json!(2)),
                    ("3 Columns", json!(3)),
                    ("4 Columns", json!(4)),
                ])),
            )
            .field("gap", FieldDefinition::select(spacing_scale()))
            .field(
                "distribution",
                FieldDefinition::select(string_options(&[
                    ("Equal Width", "equal"),
                    ("Sidebar Left (30/70)", "sidebar-left"),
                    ("Sidebar Right (70/30)", "sidebar-right"),
                    ("Custom", "custom"),
                ])),
            )
            .field("padding", FieldDefinition::select(spacing_scale())),
        ),
    ];

    entries
        .into_iter()
        .map(|(id, schema)| (id.to_string(), schema))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_categorised_type_has_a_schema() {
        let ids: HashSet<String> = schemas().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids.len(), 20);

        for category in categories() {
            for member in &category.components {
                assert!(ids.contains(member), "{} has no schema", member);
            }
        }
    }

    #[test]
    fn test_schema_category_matches_palette() {
        let palette = categories();
        for (id, schema) in schemas() {
            let owner = palette.iter().find(|c| c.contains(&id)).unwrap();
            assert_eq!(schema.category.as_deref(), Some(owner.id.as_str()));
        }
    }

    #[test]
    fn test_defaults_include_css_props() {
        let (_, heading) = schemas().into_iter().find(|(id, _)| id == "HeadingBlock").unwrap();

        assert_eq!(heading.default_props["title"], "Heading");
        assert_eq!(heading.default_props["textAlign"], "left");
        assert!(heading.fields.contains_key("customCss"));
    }

    #[test]
    fn test_zone_names() {
        let columns = props_from_value(json!({ "columns": 3 })).unwrap();
        assert_eq!(
            zone_names("ColumnsBlock", &columns),
            vec!["column-0", "column-1", "column-2"]
        );

        let oversized = props_from_value(json!({ "columns": 12 })).unwrap();
        assert_eq!(zone_names("ColumnsBlock", &oversized).len(), 4);

        let empty = crate::PropertyMap::new();
        assert_eq!(zone_names("ColumnsBlock", &empty).len(), 2);
        assert_eq!(zone_names("ContainerBlock", &empty), vec!["container-content"]);
        assert!(zone_names("HeadingBlock", &empty).is_empty());
    }
}
