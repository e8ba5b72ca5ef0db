//! Render components for the core palette.
//!
//! Each component wraps its markup in an element carrying the block's CSS
//! utility classes and inline styles.

use crate::css::{css_classes, css_styles};
use crate::html::{value_text, Tag};
use pagewright_schema::{PropertyMap, RenderCapability, SlotRenderer};
use serde_json::Value;
use std::sync::Arc;

fn text(props: &PropertyMap, name: &str) -> String {
    value_text(props.get(name))
}

fn items<'a>(props: &'a PropertyMap, name: &str) -> &'a [Value] {
    props
        .get(name)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn item_text(item: &Value, name: &str) -> String {
    value_text(item.get(name))
}

/// `<div>` carrying the block's utility classes and styles plus `extra` classes
fn wrapper(props: &PropertyMap, extra: &[&str]) -> Tag {
    let classes = css_classes(props);
    let mut parts: Vec<&str> = extra.to_vec();
    parts.push(&classes);
    Tag::new("div").class(parts).style(&css_styles(props))
}

fn lookup<'a>(table: &[(&str, &'a str)], key: &str, fallback: &'a str) -> &'a str {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or(fallback)
}

const PADDING: &[(&str, &str)] = &[
    ("none", "p-0"),
    ("sm", "p-4"),
    ("md", "p-8"),
    ("lg", "p-12"),
    ("xl", "p-16"),
];

fn heading(props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
    let level = text(props, "level");
    let tag = match level.as_str() {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => level.as_str(),
        _ => "h1",
    };
    Tag::new(tag)
        .class(["font-bold".to_string(), css_classes(props)])
        .style(&css_styles(props))
        .text(&text(props, "title"))
        .render()
}

fn paragraph(props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
    let size = lookup(
        &[
            ("sm", "text-sm"),
            ("base", "text-base"),
            ("lg", "text-lg"),
            ("xl", "text-xl"),
            ("2xl", "text-2xl"),
        ],
        &text(props, "fontSize"),
        "text-base",
    );
    Tag::new("p")
        .class([size.to_string(), css_classes(props)])
        .style(&css_styles(props))
        .text(&text(props, "content"))
        .render()
}

fn button(props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
    let variant = format!("btn-{}", text(props, "variant"));
    let size = format!("btn-size-{}", text(props, "size"));
    wrapper(props, &[])
        .child(
            Tag::new("button")
                .attr("type", "button")
                .class(["btn", variant.as_str(), size.as_str()])
                .text(&text(props, "text")),
        )
        .render()
}

fn badge(props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
    let variant = format!("badge-{}", text(props, "variant"));
    wrapper(props, &[])
        .child(
            Tag::new("span")
                .class(["badge", variant.as_str()])
                .text(&text(props, "text")),
        )
        .render()
}

fn card(props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
    let card = Tag::new("div")
        .class(["card"])
        .child(
            Tag::new("div")
                .class(["card-header"])
                .child(Tag::new("h3").class(["card-title"]).text(&text(props, "title")))
                .child(
                    Tag::new("p")
                        .class(["card-description"])
                        .text(&text(props, "description")),
                ),
        )
        .child(
            Tag::new("div")
                .class(["card-content"])
                .child(Tag::new("p").text(&text(props, "content"))),
        )
        .child(
            Tag::new("div")
                .class(["card-footer"])
                .text(&text(props, "footerText")),
        );
    wrapper(props, &[]).child(card).render()
}

fn alert(props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
    let variant = format!("alert-{}", text(props, "variant"));
    wrapper(props, &[])
        .child(
            Tag::new("div")
                .attr("role", "alert")
                .class(["alert", variant.as_str()])
                .child(Tag::new("h5").class(["alert-title"]).text(&text(props, "title")))
                .child(
                    Tag::new("div")
                        .class(["alert-description"])
                        .text(&text(props, "description")),
                ),
        )
        .render()
}

fn input(props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
    let kind = text(props, "type");
    wrapper(props, &["grid", "gap-2"])
        .child(
            Tag::new("label")
                .class(["text-sm", "font-medium"])
                .text(&text(props, "label")),
        )
        .child(
            Tag::new("input")
                .attr("type", if kind.is_empty() { "text" } else { &kind })
                .attr("placeholder", &text(props, "placeholder")),
        )
        .render()
}

fn textarea(props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
    let rows = props.get("rows").and_then(Value::as_u64).unwrap_or(4);
    wrapper(props, &["grid", "gap-2"])
        .child(
            Tag::new("label")
                .class(["text-sm", "font-medium"])
                .text(&text(props, "label")),
        )
        .child(
            Tag::new("textarea")
                .attr("placeholder", &text(props, "placeholder"))
                .attr("rows", &rows.to_string()),
        )
        .render()
}

fn toggle(props: &PropertyMap, role: &str, instance: &str) -> String {
    let checked = props
        .get("defaultChecked")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let id = format!("{}-{}", role, instance);
    let mut control = Tag::new("input")
        .attr("type", "checkbox")
        .attr("id", &id)
        .flag("checked", checked);
    if role == "switch" {
        control = control.attr("role", "switch");
    }
    wrapper(props, &["flex", "items-center", "gap-2"])
        .child(control)
        .child(
            Tag::new("label")
                .attr("for", &id)
                .class(["text-sm", "font-medium"])
                .text(&text(props, "label")),
        )
        .render()
}

fn checkbox(props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
    toggle(props, "checkbox", &text(props, "id"))
}

fn switch(props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
    toggle(props, "switch", &text(props, "id"))
}

fn container(props: &PropertyMap, slots: &dyn SlotRenderer) -> String {
    let padding = lookup(PADDING, &text(props, "padding"), "p-8");
    let max_width = lookup(
        &[
            ("sm", "max-w-screen-sm"),
            ("md", "max-w-screen-md"),
            ("lg", "max-w-screen-lg"),
            ("xl", "max-w-screen-xl"),
            ("2xl", "max-w-screen-2xl"),
            ("full", "max-w-full"),
        ],
        &text(props, "maxWidth"),
        "max-w-screen-lg",
    );
    wrapper(props, &["mx-auto", padding, max_width])
        .html(slots.render_zone("container-content"))
        .render()
}

fn separator(props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
    let orientation = text(props, "orientation");
    let vertical = orientation == "vertical";
    wrapper(props, &[])
        .child(
            Tag::new("div")
                .attr("role", "separator")
                .attr(
                    "aria-orientation",
                    if vertical { "vertical" } else { "horizontal" },
                )
                .class([
                    "bg-border",
                    if vertical { "h-full w-px" } else { "h-px w-full" },
                ]),
        )
        .render()
}

fn skeleton(props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
    let style = format!(
        "width: {}; height: {};",
        text(props, "skeletonWidth"),
        text(props, "skeletonHeight")
    );
    wrapper(props, &[])
        .child(
            Tag::new("div")
                .class(["animate-pulse", "rounded-md", "bg-muted"])
                .style(&style),
        )
        .render()
}

fn progress(props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
    let value = props
        .get("value")
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
        .clamp(0.0, 100.0);
    wrapper(props, &["grid", "gap-2"])
        .child(
            Tag::new("label")
                .class(["text-sm", "font-medium"])
                .text(&text(props, "label")),
        )
        .child(
            Tag::new("progress")
                .attr("max", "100")
                .attr("value", &value.to_string()),
        )
        .render()
}

fn spinner(props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
    let size = lookup(
        &[("sm", "size-4"), ("md", "size-6"), ("lg", "size-8")],
        &text(props, "size"),
        "size-6",
    );
    wrapper(props, &[])
        .child(
            Tag::new("div")
                .attr("role", "status")
                .attr("aria-label", "Loading")
                .class(["animate-spin", size]),
        )
        .render()
}

fn avatar(props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
    wrapper(props, &[])
        .child(
            Tag::new("span")
                .class(["avatar"])
                .child(
                    Tag::new("img")
                        .attr("src", &text(props, "src"))
                        .attr("alt", &text(props, "alt")),
                )
                .child(
                    Tag::new("span")
                        .class(["avatar-fallback"])
                        .text(&text(props, "fallback")),
                ),
        )
        .render()
}

fn image(props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
    let fit = text(props, "objectFit");
    let style = if fit.is_empty() {
        String::new()
    } else {
        format!("object-fit: {};", fit)
    };
    wrapper(props, &[])
        .child(
            Tag::new("img")
                .attr("src", &text(props, "src"))
                .attr("alt", &text(props, "alt"))
                .class(["w-full"])
                .style(&style),
        )
        .render()
}

fn accordion(props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
    let mut list = Tag::new("div").class(["accordion"]);
    for item in items(props, "items") {
        list = list.child(
            Tag::new("details")
                .class(["accordion-item"])
                .child(Tag::new("summary").text(&item_text(item, "title")))
                .child(
                    Tag::new("div")
                        .class(["accordion-content"])
                        .text(&item_text(item, "content")),
                ),
        );
    }
    wrapper(props, &[]).child(list).render()
}

fn tabs(props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
    let tabs = items(props, "tabs");

    let mut list = Tag::new("div").attr("role", "tablist").class(["tabs-list"]);
    let mut panels = Vec::new();
    for (index, tab) in tabs.iter().enumerate() {
        let value = format!("tab-{}", index);
        list = list.child(
            Tag::new("button")
                .attr("role", "tab")
                .attr("data-value", &value)
                .attr("aria-selected", if index == 0 { "true" } else { "false" })
                .text(&item_text(tab, "label")),
        );
        panels.push(
            Tag::new("div")
                .attr("role", "tabpanel")
                .attr("data-value", &value)
                .flag("hidden", index != 0)
                .text(&item_text(tab, "content")),
        );
    }

    let mut container = Tag::new("div").class(["tabs"]).child(list);
    for panel in panels {
        container = container.child(panel);
    }
    wrapper(props, &[]).child(container).render()
}

fn columns(props: &PropertyMap, slots: &dyn SlotRenderer) -> String {
    let count = pagewright_schema::palette::zone_names("ColumnsBlock", props).len();
    let distribution = text(props, "distribution");
    let grid = match (distribution.as_str(), count) {
        ("sidebar-left", 2) => "grid-cols-[30%_70%]".to_string(),
        ("sidebar-right", 2) => "grid-cols-[70%_30%]".to_string(),
        _ => format!("grid-cols-{}", count),
    };
    let gap = lookup(
        &[
            ("none", "gap-0"),
            ("sm", "gap-4"),
            ("md", "gap-6"),
            ("lg", "gap-8"),
            ("xl", "gap-12"),
        ],
        &text(props, "gap"),
        "gap-6",
    );
    let padding = lookup(PADDING, &text(props, "padding"), "p-8");
    let border = if slots.is_editing() {
        "min-h-[100px] border-2 border-dashed border-gray-300 rounded-lg p-4"
    } else {
        ""
    };

    let mut row = Tag::new("div").class(["grid", grid.as_str(), gap]);
    for index in 0..count {
        row = row.child(
            Tag::new("div")
                .class([border])
                .html(slots.render_zone(&format!("column-{}", index))),
        );
    }
    wrapper(props, &[padding]).child(row).render()
}

fn capability<F>(component: F) -> RenderCapability
where
    F: Fn(&PropertyMap, &dyn SlotRenderer) -> String + Send + Sync + 'static,
{
    Arc::new(component)
}

/// Render capabilities for every core block type
pub fn core_components() -> Vec<(&'static str, RenderCapability)> {
    vec![
        ("HeadingBlock", capability(heading)),
        ("TextBlock", capability(paragraph)),
        ("ButtonBlock", capability(button)),
        ("BadgeBlock", capability(badge)),
        ("CardBlock", capability(card)),
        ("AlertBlock", capability(alert)),
        ("InputBlock", capability(input)),
        ("TextareaBlock", capability(textarea)),
        ("CheckboxBlock", capability(checkbox)),
        ("SwitchBlock", capability(switch)),
        ("ContainerBlock", capability(container)),
        ("SeparatorBlock", capability(separator)),
        ("SkeletonBlock", capability(skeleton)),
        ("ProgressBlock", capability(progress)),
        ("SpinnerBlock", capability(spinner)),
        ("AvatarBlock", capability(avatar)),
        ("ImageBlock", capability(image)),
        ("AccordionBlock", capability(accordion)),
        ("TabsBlock", capability(tabs)),
        ("ColumnsBlock", capability(columns)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewright_schema::{palette, props_from_value, BlockComponent, NoSlots};
    use serde_json::json;

    fn render(type_id: &str, props: serde_json::Value) -> String {
        let props = props_from_value(props).unwrap();
        let (_, component) = core_components()
            .into_iter()
            .find(|(id, _)| *id == type_id)
            .unwrap();
        component.render(&props, &NoSlots)
    }

    struct Zones;

    impl SlotRenderer for Zones {
        fn render_zone(&self, zone: &str) -> String {
            format!("[{}]", zone)
        }

        fn is_editing(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_every_palette_type_has_a_component() {
        let components = core_components();
        for (id, _) in palette::schemas() {
            assert!(
                components.iter().any(|(c, _)| *c == id),
                "{} has no component",
                id
            );
        }
    }

    #[test]
    fn test_heading_level_and_css() {
        let html = render(
            "HeadingBlock",
            json!({ "title": "Hi <there>", "level": "h3", "marginTop": "4", "textColor": "red" }),
        );
        assert_eq!(
            html,
            r#"<h3 class="font-bold mt-4" style="color: red;">Hi &lt;there&gt;</h3>"#
        );
    }

    #[test]
    fn test_heading_rejects_unknown_level() {
        let html = render("HeadingBlock", json!({ "title": "x", "level": "script" }));
        assert!(html.starts_with("<h1"));
    }

    #[test]
    fn test_accordion_items() {
        let html = render(
            "AccordionBlock",
            json!({ "items": [{ "title": "One", "content": "1" }, { "title": "Two", "content": "2" }] }),
        );
        assert_eq!(html.matches("<details").count(), 2);
        assert!(html.contains("<summary>Two</summary>"));
    }

    #[test]
    fn test_columns_render_their_zones() {
        let props = props_from_value(json!({ "columns": 3, "gap": "sm" })).unwrap();
        let (_, component) = core_components()
            .into_iter()
            .find(|(id, _)| *id == "ColumnsBlock")
            .unwrap();
        let html = component.render(&props, &Zones);

        assert!(html.contains("grid-cols-3 gap-4"));
        assert!(html.contains("[column-0]"));
        assert!(html.contains("[column-2]"));
        assert!(!html.contains("[column-3]"));
        assert!(html.contains("border-dashed"));
    }

    #[test]
    fn test_container_renders_content_zone() {
        let props = props_from_value(json!({ "padding": "sm", "maxWidth": "full" })).unwrap();
        let (_, component) = core_components()
            .into_iter()
            .find(|(id, _)| *id == "ContainerBlock")
            .unwrap();
        let html = component.render(&props, &Zones);

        assert_eq!(
            html,
            r#"<div class="mx-auto p-4 max-w-full">[container-content]</div>"#
        );
    }
}
