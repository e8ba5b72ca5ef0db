//! # Bridge Protocol
//!
//! Envelopes exchanged between the host page and the embedded editor.
//! Every envelope is a JSON object with a `type` discriminator:
//!
//! | Direction | `type` | Payload |
//! |---|---|---|
//! | embedded → host | `READY` | `categories`, `components` |
//! | host → embedded | `ADD_COMPONENT` | `componentType`, `componentLabel`, `defaultProps?` |
//! | embedded → host | `COMPONENT_ADDED` | `componentType`, `componentLabel`, `pagePath` |
//! | embedded → host | `DATA_CHANGED` | `data`, `pagePath` |
//! | embedded → host | `PUBLISH` | `data`, `pagePath` |
//!
//! The channel is shared with unrelated traffic, so parsing is lenient:
//! anything that is not a recognised host message is reported and skipped.

use pagewright_document::Document;
use pagewright_schema::{Category, LibraryComponent};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Messages the host sends to the embedded editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostMessage {
    #[serde(rename_all = "camelCase")]
    AddComponent {
        component_type: String,
        #[serde(default)]
        component_label: String,
        /// Kept raw; a payload that is not a record falls back to defaults
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_props: Option<Value>,
    },
}

/// Messages the embedded editor sends to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmbeddedMessage {
    Ready {
        categories: Vec<Category>,
        components: BTreeMap<String, LibraryComponent>,
    },

    #[serde(rename_all = "camelCase")]
    ComponentAdded {
        component_type: String,
        component_label: String,
        page_path: String,
    },

    #[serde(rename_all = "camelCase")]
    DataChanged { data: Document, page_path: String },

    #[serde(rename_all = "camelCase")]
    Publish { data: Document, page_path: String },
}

/// Why an inbound envelope was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NotAnObject,
    MissingType,
    UnknownType(String),
    Malformed { kind: String, reason: String },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::NotAnObject => write!(f, "envelope is not an object"),
            Rejection::MissingType => write!(f, "envelope has no string `type`"),
            Rejection::UnknownType(kind) => write!(f, "unknown message type {}", kind),
            Rejection::Malformed { kind, reason } => write!(f, "malformed {}: {}", kind, reason),
        }
    }
}

impl HostMessage {
    /// Discriminate an inbound envelope
    pub fn parse(envelope: &Value) -> Result<Self, Rejection> {
        let object = envelope.as_object().ok_or(Rejection::NotAnObject)?;
        let kind = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or(Rejection::MissingType)?;

        match kind {
            "ADD_COMPONENT" => {
                serde_json::from_value(envelope.clone()).map_err(|e| Rejection::Malformed {
                    kind: kind.to_string(),
                    reason: e.to_string(),
                })
            }
            other => Err(Rejection::UnknownType(other.to_string())),
        }
    }

    pub fn add_component(component_type: &str, component_label: &str) -> Self {
        HostMessage::AddComponent {
            component_type: component_type.to_string(),
            component_label: component_label.to_string(),
            default_props: None,
        }
    }
}

impl EmbeddedMessage {
    /// Lenient parse used on the host side
    pub fn parse(envelope: &Value) -> Option<Self> {
        serde_json::from_value(envelope.clone()).ok()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            EmbeddedMessage::Ready { .. } => "READY",
            EmbeddedMessage::ComponentAdded { .. } => "COMPONENT_ADDED",
            EmbeddedMessage::DataChanged { .. } => "DATA_CHANGED",
            EmbeddedMessage::Publish { .. } => "PUBLISH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_component_wire_shape() {
        let message = HostMessage::parse(&json!({
            "type": "ADD_COMPONENT",
            "componentType": "HeroBlock",
            "componentLabel": "Hero",
            "defaultProps": { "title": "Hi" },
        }))
        .unwrap();

        assert_eq!(
            message,
            HostMessage::AddComponent {
                component_type: "HeroBlock".to_string(),
                component_label: "Hero".to_string(),
                default_props: Some(json!({ "title": "Hi" })),
            }
        );
    }

    #[test]
    fn test_channel_noise_is_rejected() {
        assert_eq!(HostMessage::parse(&json!("hello")), Err(Rejection::NotAnObject));
        assert_eq!(
            HostMessage::parse(&json!({ "source": "devtools" })),
            Err(Rejection::MissingType)
        );
        assert_eq!(
            HostMessage::parse(&json!({ "type": "webpackOk" })),
            Err(Rejection::UnknownType("webpackOk".to_string()))
        );
        assert!(matches!(
            HostMessage::parse(&json!({ "type": "ADD_COMPONENT", "componentType": 7 })),
            Err(Rejection::Malformed { .. })
        ));
    }

    #[test]
    fn test_embedded_wire_shapes() {
        let added = EmbeddedMessage::ComponentAdded {
            component_type: "HeadingBlock".to_string(),
            component_label: "Heading".to_string(),
            page_path: "/".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&added).unwrap(),
            json!({
                "type": "COMPONENT_ADDED",
                "componentType": "HeadingBlock",
                "componentLabel": "Heading",
                "pagePath": "/",
            })
        );

        let changed = EmbeddedMessage::DataChanged {
            data: Document::with_title("Home"),
            page_path: "/about".to_string(),
        };
        let value = serde_json::to_value(&changed).unwrap();
        assert_eq!(value["type"], "DATA_CHANGED");
        assert_eq!(value["pagePath"], "/about");
        assert_eq!(value["data"]["root"]["props"]["title"], "Home");
        assert_eq!(EmbeddedMessage::parse(&value), Some(changed));
    }

    #[test]
    fn test_ready_payload() {
        let library = pagewright_schema::ComponentLibrary::standard();
        let ready = EmbeddedMessage::Ready {
            categories: library.categories.clone(),
            components: library.components.clone(),
        };
        let value = serde_json::to_value(&ready).unwrap();

        assert_eq!(value["type"], "READY");
        assert_eq!(value["categories"][0]["id"], "marketing");
        assert_eq!(value["components"]["HeroBlock"]["moduleId"], "hero");
        assert!(value["components"]["HeroBlock"].get("previewImage").is_none());
    }
}
