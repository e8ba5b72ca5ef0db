use serde_json::Value;

/// Property values of one block instance (or of the page root).
///
/// Values are plain data: primitives, nested records, or lists of records.
/// Keys the schema does not know about are kept as-is.
pub type PropertyMap = serde_json::Map<String, Value>;

/// Key holding a block instance's identifier
pub const ID_PROP: &str = "id";

/// Convert a JSON value into a property map.
///
/// Returns `None` for anything that is not a record.
pub fn props_from_value(value: Value) -> Option<PropertyMap> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// The instance identifier, if present and a non-empty string
pub fn instance_id(props: &PropertyMap) -> Option<&str> {
    props
        .get(ID_PROP)
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_props_from_value_rejects_non_records() {
        assert!(props_from_value(json!({"title": "Hi"})).is_some());
        assert!(props_from_value(json!("title")).is_none());
        assert!(props_from_value(json!([1, 2])).is_none());
        assert!(props_from_value(Value::Null).is_none());
    }

    #[test]
    fn test_instance_id_requires_non_empty_string() {
        let props = props_from_value(json!({"id": "HeadingBlock-1"})).unwrap();
        assert_eq!(instance_id(&props), Some("HeadingBlock-1"));

        let empty = props_from_value(json!({"id": ""})).unwrap();
        assert_eq!(instance_id(&empty), None);

        let numeric = props_from_value(json!({"id": 42})).unwrap();
        assert_eq!(instance_id(&numeric), None);
    }
}
