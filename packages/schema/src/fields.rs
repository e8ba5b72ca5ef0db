//! # Field Definitions
//!
//! Describes how the editing surface presents each property of a block.
//! Also holds the CSS utility fields every core block shares.

use crate::PropertyMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// One editable property of a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldDefinition {
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },

    Textarea {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },

    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },

    Select {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        options: Vec<FieldOption>,
    },

    Radio {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        options: Vec<FieldOption>,
    },

    /// Ordered list of nested records (accordion items, tabs)
    Array {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(rename = "arrayFields")]
        array_fields: BTreeMap<String, FieldDefinition>,
    },
}

/// A selectable value with its display label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: Value,
}

impl FieldDefinition {
    pub fn text() -> Self {
        FieldDefinition::Text { label: None }
    }

    pub fn textarea() -> Self {
        FieldDefinition::Textarea { label: None }
    }

    pub fn number(min: Option<f64>, max: Option<f64>) -> Self {
        FieldDefinition::Number {
            label: None,
            min,
            max,
        }
    }

    pub fn select(options: Vec<FieldOption>) -> Self {
        FieldDefinition::Select {
            label: None,
            options,
        }
    }

    pub fn radio(options: Vec<FieldOption>) -> Self {
        FieldDefinition::Radio {
            label: None,
            options,
        }
    }

    pub fn array<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldDefinition)>,
        K: Into<String>,
    {
        FieldDefinition::Array {
            label: None,
            array_fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Override the display label
    pub fn labelled(mut self, text: &str) -> Self {
        let label = match &mut self {
            FieldDefinition::Text { label }
            | FieldDefinition::Textarea { label }
            | FieldDefinition::Number { label, .. }
            | FieldDefinition::Select { label, .. }
            | FieldDefinition::Radio { label, .. }
            | FieldDefinition::Array { label, .. } => label,
        };
        *label = Some(text.to_string());
        self
    }

    pub fn options(&self) -> &[FieldOption] {
        match self {
            FieldDefinition::Select { options, .. } | FieldDefinition::Radio { options, .. } => {
                options
            }
            _ => &[],
        }
    }
}

/// Build string-valued options from `(label, value)` pairs
pub fn string_options(pairs: &[(&str, &str)]) -> Vec<FieldOption> {
    pairs
        .iter()
        .map(|(label, value)| FieldOption {
            label: label.to_string(),
            value: Value::String(value.to_string()),
        })
        .collect()
}

/// Build options with arbitrary JSON values
pub fn value_options(pairs: Vec<(&str, Value)>) -> Vec<FieldOption> {
    pairs
        .into_iter()
        .map(|(label, value)| FieldOption {
            label: label.to_string(),
            value,
        })
        .collect()
}

fn spacing_options() -> Vec<FieldOption> {
    string_options(&[
        ("0", "0"),
        ("1 (0.25rem)", "1"),
        ("2 (0.5rem)", "2"),
        ("3 (0.75rem)", "3"),
        ("4 (1rem)", "4"),
        ("6 (1.5rem)", "6"),
        ("8 (2rem)", "8"),
        ("12 (3rem)", "12"),
        ("16 (4rem)", "16"),
        ("Auto", "auto"),
    ])
}

/// Spacing, sizing, alignment and colour fields shared by every core block
pub fn css_fields() -> BTreeMap<String, FieldDefinition> {
    let mut fields = BTreeMap::new();

    for name in [
        "marginTop",
        "marginBottom",
        "marginLeft",
        "marginRight",
        "paddingTop",
        "paddingBottom",
        "paddingLeft",
        "paddingRight",
    ] {
        fields.insert(name.to_string(), FieldDefinition::select(spacing_options()));
    }

    fields.insert("width".to_string(), FieldDefinition::text());
    fields.insert("height".to_string(), FieldDefinition::text());
    fields.insert(
        "textAlign".to_string(),
        FieldDefinition::radio(string_options(&[
            ("Left", "left"),
            ("Center", "center"),
            ("Right", "right"),
            ("Justify", "justify"),
        ])),
    );
    fields.insert("textColor".to_string(), FieldDefinition::text());
    fields.insert("backgroundColor".to_string(), FieldDefinition::text());
    fields.insert(
        "customCss".to_string(),
        FieldDefinition::textarea().labelled("Custom CSS Classes"),
    );

    fields
}

/// Schema defaults matching [`css_fields`]
pub fn default_css_props() -> PropertyMap {
    let value = json!({
        "marginTop": "0",
        "marginBottom": "0",
        "marginLeft": "0",
        "marginRight": "0",
        "paddingTop": "0",
        "paddingBottom": "0",
        "paddingLeft": "0",
        "paddingRight": "0",
        "width": "",
        "height": "",
        "textAlign": "left",
        "textColor": "",
        "backgroundColor": "",
        "customCss": "",
    });

    crate::props_from_value(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_serialization_shape() {
        let field = FieldDefinition::select(string_options(&[("H1", "h1")]));
        let json = serde_json::to_value(&field).unwrap();

        assert_eq!(json["type"], "select");
        assert_eq!(json["options"][0]["label"], "H1");
        assert_eq!(json["options"][0]["value"], "h1");
        assert!(json.get("label").is_none());
    }

    #[test]
    fn test_array_field_uses_camel_case_key() {
        let field = FieldDefinition::array([
            ("title", FieldDefinition::text()),
            ("content", FieldDefinition::textarea()),
        ]);
        let json = serde_json::to_value(&field).unwrap();

        assert_eq!(json["type"], "array");
        assert_eq!(json["arrayFields"]["content"]["type"], "textarea");
    }

    #[test]
    fn test_css_fields_match_defaults() {
        let fields = css_fields();
        let defaults = default_css_props();

        assert_eq!(fields.len(), defaults.len());
        for key in fields.keys() {
            assert!(defaults.contains_key(key), "missing default for {}", key);
        }
    }
}
