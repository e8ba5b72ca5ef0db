use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Editor is no longer running")]
    Closed,

    #[error("Editor task failed: {0}")]
    Join(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
