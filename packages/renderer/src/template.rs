//! # Template Components
//!
//! Jinja-style markup templates, used for blocks whose render capability
//! arrives as data rather than code.
//!
//! ```text
//! <section class="hero">
//!   <h1>{{ title }}</h1>
//!   <ul>{% for link in links %}<li><a href="{{ link.href }}">{{ link.label }}</a></li>{% endfor %}</ul>
//! </section>
//! ```
//!
//! The block's props are the template context. Output is HTML-escaped and
//! missing values render as empty text.

use crate::RenderError;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use pagewright_schema::{BlockComponent, PropertyMap, SlotRenderer};

const TEMPLATE_NAME: &str = "block.html";

/// A compiled template, usable as a render capability
pub struct TemplateComponent {
    env: Environment<'static>,
    source: String,
}

impl TemplateComponent {
    pub fn parse(source: &str) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.set_undefined_behavior(UndefinedBehavior::Lenient);
        env.add_template_owned(TEMPLATE_NAME, source.to_string())?;

        Ok(Self {
            env,
            source: source.to_string(),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn try_render(&self, props: &PropertyMap) -> Result<String, RenderError> {
        let template = self.env.get_template(TEMPLATE_NAME)?;
        Ok(template.render(props)?)
    }

    /// Render, replacing a failed evaluation with an HTML comment
    pub fn render_props(&self, props: &PropertyMap) -> String {
        match self.try_render(props) {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!(%err, "template failed to render");
                "<!-- template error -->".to_string()
            }
        }
    }
}

impl BlockComponent for TemplateComponent {
    fn render(&self, props: &PropertyMap, _slots: &dyn SlotRenderer) -> String {
        self.render_props(props)
    }
}

impl std::fmt::Debug for TemplateComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateComponent")
            .field("source", &self.source)
            .finish()
    }
}
