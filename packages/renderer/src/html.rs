//! Minimal HTML fragment builder used by the block components

use serde_json::Value;

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img" | "input" | "br" | "hr" | "meta" | "link" | "source" | "wbr"
    )
}

/// Text form of a prop value: strings as-is, numbers and booleans printed,
/// everything else empty
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

#[derive(Debug, Clone)]
pub struct Tag {
    name: String,
    attributes: Vec<(String, Option<String>)>,
    children: Vec<String>,
}

impl Tag {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), Some(value.to_string())));
        self
    }

    /// Boolean attribute, written without a value when set
    pub fn flag(mut self, name: &str, set: bool) -> Self {
        if set {
            self.attributes.push((name.to_string(), None));
        }
        self
    }

    /// `class`, skipped when every part is empty
    pub fn class<I, S>(self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = parts
            .into_iter()
            .filter(|p| !p.as_ref().trim().is_empty())
            .map(|p| p.as_ref().trim().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        if joined.is_empty() {
            self
        } else {
            self.attr("class", &joined)
        }
    }

    /// `style`, skipped when empty
    pub fn style(self, style: &str) -> Self {
        if style.is_empty() {
            self
        } else {
            self.attr("style", style)
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.children.push(escape_html(text));
        self
    }

    /// Already-rendered markup
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.children.push(html.into());
        self
    }

    pub fn child(self, tag: Tag) -> Self {
        let rendered = tag.render();
        self.html(rendered)
    }

    pub fn render(&self) -> String {
        let mut out = format!("<{}", self.name);
        for (name, value) in &self.attributes {
            match value {
                Some(value) => out.push_str(&format!(" {}=\"{}\"", name, escape_html(value))),
                None => out.push_str(&format!(" {}", name)),
            }
        }

        if self.children.is_empty() && is_self_closing(&self.name) {
            out.push_str(" />");
            return out;
        }

        out.push('>');
        for child in &self.children {
            out.push_str(child);
        }
        out.push_str(&format!("</{}>", self.name));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_escape_html_entities() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_tag_render() {
        let html = Tag::new("div")
            .class(["grid", "", " gap-2 "])
            .style("")
            .child(Tag::new("label").text("A < B"))
            .child(Tag::new("input").attr("type", "email").flag("disabled", true))
            .render();

        assert_eq!(
            html,
            r#"<div class="grid gap-2"><label>A &lt; B</label><input type="email" disabled /></div>"#
        );
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(Some(&json!("a"))), "a");
        assert_eq!(value_text(Some(&json!(4))), "4");
        assert_eq!(value_text(Some(&json!(true))), "true");
        assert_eq!(value_text(Some(&json!({ "x": 1 }))), "");
        assert_eq!(value_text(None), "");
    }
}
