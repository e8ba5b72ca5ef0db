//! Error types for schema and library loading

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid library manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Library category {category} lists unknown component {component}")]
    UnknownComponent { category: String, component: String },
}
