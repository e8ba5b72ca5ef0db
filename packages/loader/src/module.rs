//! Template modules on disk.
//!
//! A library block with `moduleId: "hero"` is fetched from
//! `<modules dir>/hero.json`:
//!
//! ```json
//! { "template": "<section class=\"hero\"><h1>{{ title }}</h1>{% for l in links %}<a href=\"{{ l.href }}\">{{ l.label }}</a>{% endfor %}</section>" }
//! ```

use crate::{CapabilityMap, ComponentLoader, LoadError, LoadedModule};
use futures::FutureExt;
use pagewright_renderer::TemplateComponent;
use pagewright_schema::ComponentLibrary;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct ModuleFile {
    #[serde(default)]
    template: Option<String>,
}

pub fn module_path(modules_dir: &Path, module_id: &str) -> PathBuf {
    modules_dir.join(format!("{}.json", module_id))
}

/// Loader reading one template module
pub fn file_module_loader(type_id: &str, path: PathBuf) -> ComponentLoader {
    let type_id = type_id.to_string();
    Arc::new(move || {
        let type_id = type_id.clone();
        let path = path.clone();
        async move { load_module_file(&type_id, &path).await }.boxed()
    })
}

async fn load_module_file(type_id: &str, path: &Path) -> Result<LoadedModule, LoadError> {
    let source = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LoadError::fetch(type_id, format!("{}: {}", path.display(), e)))?;
    let module: ModuleFile =
        serde_json::from_str(&source).map_err(|e| LoadError::fetch(type_id, e))?;

    match module.template {
        Some(template) => {
            let component =
                TemplateComponent::parse(&template).map_err(|e| LoadError::fetch(type_id, e))?;
            Ok(LoadedModule::new(Arc::new(component)))
        }
        None => Ok(LoadedModule::empty()),
    }
}

impl CapabilityMap {
    /// One file loader per library block that names a module
    pub fn from_library(library: &ComponentLibrary, modules_dir: &Path) -> Self {
        let mut map = CapabilityMap::new();
        for (type_id, component) in &library.components {
            if let Some(module_id) = &component.module_id {
                map.register(
                    type_id,
                    file_module_loader(type_id, module_path(modules_dir, module_id)),
                );
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewright_schema::{BlockComponent, NoSlots, PropertyMap};
    use serde_json::json;

    #[tokio::test]
    async fn test_loads_template_module() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(
            dir.path().join("hero.json"),
            json!({
                "template": "<h1>{{ title }}</h1>{% for l in links %}<a>{{ l }}</a>{% endfor %}"
            })
            .to_string(),
        )?;

        let map = CapabilityMap::from_library(&ComponentLibrary::standard(), dir.path());
        assert_eq!(map.len(), 7);

        let loader = map.get("HeroBlock").unwrap();
        let module = loader().await?;
        let component = module.default.unwrap();

        let mut props = PropertyMap::new();
        props.insert("title".to_string(), json!("Launch"));
        props.insert("links".to_string(), json!(["Docs", "Blog"]));
        assert_eq!(
            component.render(&props, &NoSlots),
            "<h1>Launch</h1><a>Docs</a><a>Blog</a>"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_file_is_a_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = file_module_loader("NavbarBlock", module_path(dir.path(), "navbar"));

        assert!(matches!(loader().await, Err(LoadError::Fetch { .. })));
    }

    #[tokio::test]
    async fn test_invalid_template_is_a_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("pricing.json"),
            json!({ "template": "{% for plan in plans %}unclosed" }).to_string(),
        )
        .unwrap();
        let loader = file_module_loader("PricingBlock", module_path(dir.path(), "pricing"));

        assert!(matches!(loader().await, Err(LoadError::Fetch { .. })));
    }

    #[tokio::test]
    async fn test_module_without_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("footer.json"), "{}").unwrap();
        let loader = file_module_loader("FooterBlock", module_path(dir.path(), "footer"));

        let module = loader().await.unwrap();
        assert!(module.default.is_none());
    }
}
