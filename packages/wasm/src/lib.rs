use pagewright_document::{BlockInstance, Document, Mutation};
use pagewright_renderer::{core_registry, render_document, RenderOptions};
use pagewright_schema::{
    build_default_props, build_default_props_with_id, resolve_insert_props, Category,
    SchemaRegistry,
};
use serde::Serialize;
use std::sync::OnceLock;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn registry() -> &'static SchemaRegistry {
    static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
    REGISTRY.get_or_init(core_registry)
}

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, err))
}

#[derive(Serialize)]
struct PaletteEntry {
    id: String,
    label: String,
}

#[derive(Serialize)]
struct PaletteCategory {
    #[serde(flatten)]
    category: Category,
    blocks: Vec<PaletteEntry>,
}

/// Default props for a new block, including a fresh instance id
#[wasm_bindgen(js_name = defaultPropsWithId)]
pub fn default_props_with_id_js(block_type: &str) -> String {
    serde_json::Value::Object(build_default_props_with_id(block_type)).to_string()
}

#[wasm_bindgen(js_name = defaultProps)]
pub fn default_props_js(block_type: &str) -> String {
    serde_json::Value::Object(build_default_props(block_type)).to_string()
}

/// Core palette as JSON: categories with the label of every member
#[wasm_bindgen(js_name = palette)]
pub fn palette_js() -> Result<String, JsValue> {
    let registry = registry();
    let categories: Vec<PaletteCategory> = registry
        .list_categories()
        .into_iter()
        .map(|category| {
            let blocks = category
                .components
                .iter()
                .map(|id| PaletteEntry {
                    id: id.clone(),
                    label: registry
                        .get_schema(id)
                        .map(|s| s.label.clone())
                        .unwrap_or_else(|| id.clone()),
                })
                .collect();
            PaletteCategory { category, blocks }
        })
        .collect();

    serde_json::to_string(&categories).map_err(|e| js_error("Serialization error", e))
}

#[wasm_bindgen(js_name = newDocument)]
pub fn new_document_js(title: &str) -> Result<String, JsValue> {
    Document::with_title(title)
        .to_json()
        .map_err(|e| js_error("Serialization error", e))
}

/// Render a page document (JSON) to a full HTML page with the core palette
#[wasm_bindgen(js_name = renderDocument)]
pub fn render_document_js(document: &str, pretty: bool) -> Result<String, JsValue> {
    let doc = Document::from_json(document).map_err(|e| js_error("Parse error", e))?;
    let options = RenderOptions {
        pretty,
        ..RenderOptions::default()
    };

    render_document(&doc, registry(), options).map_err(|e| js_error("Render error", e))
}

/// Append a block and return the updated document. `props` is optional
/// JSON. A record is kept, gaining a fresh id when its own is missing or
/// taken; anything else falls back to the type's defaults.
#[wasm_bindgen(js_name = appendBlock)]
pub fn append_block_js(
    document: &str,
    block_type: &str,
    props: Option<String>,
) -> Result<String, JsValue> {
    let doc = Document::from_json(document).map_err(|e| js_error("Parse error", e))?;

    let supplied = match props {
        Some(source) => Some(
            serde_json::from_str::<serde_json::Value>(&source)
                .map_err(|e| js_error("Parse error", e))?,
        ),
        None => None,
    };
    let props = resolve_insert_props(block_type, supplied, |id| doc.contains_id(id)).props;

    let next = Mutation::AppendBlock {
        block: BlockInstance::new(block_type, props),
    }
    .apply(&doc)
    .map_err(|e| js_error("Mutation error", e))?;

    next.ensure_zones()
        .to_json()
        .map_err(|e| js_error("Serialization error", e))
}
