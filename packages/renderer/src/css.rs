//! CSS utility props → utility classes and inline styles

use crate::html::value_text;
use pagewright_schema::PropertyMap;

const SPACING: &[(&str, &str)] = &[
    ("marginTop", "mt"),
    ("marginBottom", "mb"),
    ("marginLeft", "ml"),
    ("marginRight", "mr"),
    ("paddingTop", "pt"),
    ("paddingBottom", "pb"),
    ("paddingLeft", "pl"),
    ("paddingRight", "pr"),
];

const STYLES: &[(&str, &str)] = &[
    ("width", "width"),
    ("height", "height"),
    ("textColor", "color"),
    ("backgroundColor", "background-color"),
];

fn prop(props: &PropertyMap, name: &str) -> String {
    value_text(props.get(name))
}

/// Utility classes for the spacing, alignment and custom class props.
///
/// `"0"` spacing and `left` alignment are the defaults and produce nothing.
pub fn css_classes(props: &PropertyMap) -> String {
    let mut classes = Vec::new();

    for (name, prefix) in SPACING {
        let value = prop(props, name);
        if value.is_empty() || value == "0" {
            continue;
        }
        classes.push(format!("{}-{}", prefix, value));
    }

    let align = prop(props, "textAlign");
    if !align.is_empty() && align != "left" {
        classes.push(format!("text-{}", align));
    }

    let custom = prop(props, "customCss");
    if !custom.trim().is_empty() {
        classes.push(custom.trim().to_string());
    }

    classes.join(" ")
}

/// Inline `style` declarations for the size and colour props
pub fn css_styles(props: &PropertyMap) -> String {
    STYLES
        .iter()
        .filter_map(|(name, property)| {
            let value = prop(props, name);
            (!value.is_empty()).then(|| format!("{}: {};", property, value))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewright_schema::{fields::default_css_props, props_from_value};
    use serde_json::json;

    #[test]
    fn test_defaults_produce_nothing() {
        let props = default_css_props();
        assert_eq!(css_classes(&props), "");
        assert_eq!(css_styles(&props), "");
    }

    #[test]
    fn test_classes() {
        let props = props_from_value(json!({
            "marginTop": "4",
            "marginLeft": "auto",
            "paddingBottom": "2",
            "textAlign": "center",
            "customCss": " shadow-lg ",
        }))
        .unwrap();

        assert_eq!(css_classes(&props), "mt-4 ml-auto pb-2 text-center shadow-lg");
    }

    #[test]
    fn test_styles() {
        let props = props_from_value(json!({
            "width": "50%",
            "textColor": "#333",
            "backgroundColor": "white",
        }))
        .unwrap();

        assert_eq!(
            css_styles(&props),
            "width: 50%; color: #333; background-color: white;"
        );
    }
}
