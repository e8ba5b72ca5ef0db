//! # Pagewright Renderer
//!
//! Static HTML output for page documents, plus the render capabilities of
//! the core palette.
//!
//! ```rust,ignore
//! use pagewright_renderer::{core_registry, render_document, RenderOptions};
//!
//! let registry = core_registry();
//! let html = render_document(&doc, &registry, RenderOptions::default())?;
//! ```

mod blocks;
mod css;
mod error;
mod html;
mod page;
mod template;


pub use blocks::core_components;
pub use css::{css_classes, css_styles};
pub use error::RenderError;
pub use html::escape_html;
pub use page::{render_blocks, render_document, RenderOptions};
pub use template::TemplateComponent;

use pagewright_schema::{palette, ComponentLibrary, SchemaRegistry};

/// Registry holding the core palette with render capabilities attached
pub fn core_registry() -> SchemaRegistry {
    let mut components = core_components();
    let schemas = palette::schemas().into_iter().map(|(id, schema)| {
        match components.iter().position(|(c, _)| *c == id) {
            Some(index) => {
                let (_, render) = components.swap_remove(index);
                (id, schema.render_with(render))
            }
            None => (id, schema),
        }
    });
    SchemaRegistry::from_parts(schemas.collect::<Vec<_>>(), palette::categories())
}

/// Core registry plus stubs for every block in `library`
pub fn standard_registry(library: &ComponentLibrary) -> SchemaRegistry {
    core_registry().with_stubs(library)
}
