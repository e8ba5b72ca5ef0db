use pagewright_schema::ComponentLibrary;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "pagewright.config.json";

/// Pagewright configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding page documents
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    /// Directory holding template modules for library blocks
    #[serde(default = "default_modules_dir")]
    pub modules_dir: String,

    /// Extension library manifest; the built-in library when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_manifest: Option<String>,
}

fn default_pages_dir() -> String {
    "pages".to_string()
}

fn default_modules_dir() -> String {
    "modules".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn get_pages_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.pages_dir)
    }

    pub fn get_modules_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.modules_dir)
    }

    pub fn load_library(&self, cwd: &str) -> anyhow::Result<ComponentLibrary> {
        match &self.library_manifest {
            Some(manifest) => Ok(ComponentLibrary::load(&PathBuf::from(cwd).join(manifest))?),
            None => Ok(ComponentLibrary::standard()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            modules_dir: default_modules_dir(),
            library_manifest: None,
        }
    }
}
