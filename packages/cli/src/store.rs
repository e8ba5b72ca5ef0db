//! Page documents on disk, keyed by page path.
//!
//! `/` maps to `index.json`, `/about/team` to `about/team.json`.

use pagewright_document::{Document, DocumentError};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const NEW_PAGE_TITLE: &str = "New Page";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid page path: {0}")]
    InvalidPath(String),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct PageStore {
    dir: PathBuf,
}

impl PageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn page_file(&self, page_path: &str) -> Result<PathBuf, StoreError> {
        let segments: Vec<&str> = page_path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.iter().any(|s| *s == "." || *s == ".." || s.contains('\\')) {
            return Err(StoreError::InvalidPath(page_path.to_string()));
        }

        let mut file = self.dir.clone();
        match segments.split_last() {
            None => file.push("index.json"),
            Some((last, parents)) => {
                for segment in parents {
                    file.push(segment);
                }
                file.push(format!("{}.json", last));
            }
        }
        Ok(file)
    }

    pub fn exists(&self, page_path: &str) -> bool {
        self.page_file(page_path).map(|f| f.exists()).unwrap_or(false)
    }

    /// Stored document, or a fresh titled page if none exists yet
    pub fn load(&self, page_path: &str) -> Result<Document, StoreError> {
        let file = self.page_file(page_path)?;
        if file.exists() {
            Ok(Document::load(&file)?)
        } else {
            tracing::debug!(page_path, "no stored page, starting a new one");
            Ok(Document::with_title(NEW_PAGE_TITLE))
        }
    }

    pub fn save(&self, page_path: &str, document: &Document) -> Result<PathBuf, StoreError> {
        let file = self.page_file(page_path)?;
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        document.save(&file)?;
        tracing::debug!(page_path, file = %file.display(), "page saved");
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewright_document::BlockInstance;
    use pagewright_schema::build_default_props_with_id;

    #[test]
    fn test_page_file_mapping() {
        let store = PageStore::new("/site/pages");

        assert_eq!(store.page_file("/").unwrap(), PathBuf::from("/site/pages/index.json"));
        assert_eq!(store.page_file("").unwrap(), PathBuf::from("/site/pages/index.json"));
        assert_eq!(store.page_file("/about").unwrap(), PathBuf::from("/site/pages/about.json"));
        assert_eq!(
            store.page_file("/about/team/").unwrap(),
            PathBuf::from("/site/pages/about/team.json")
        );
        assert!(matches!(
            store.page_file("/../secrets"),
            Err(StoreError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_missing_page_is_new() {
        let dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(dir.path());

        let doc = store.load("/pricing").unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.title(), Some(NEW_PAGE_TITLE));
        assert!(!store.exists("/pricing"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(dir.path());

        let doc = Document::with_title("Team").append_block(BlockInstance::new(
            "HeadingBlock",
            build_default_props_with_id("HeadingBlock"),
        ));
        let file = store.save("/about/team", &doc).unwrap();

        assert!(file.ends_with("about/team.json"));
        assert_eq!(store.load("/about/team").unwrap(), doc);
    }
}
