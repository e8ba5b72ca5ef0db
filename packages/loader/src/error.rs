use thiserror::Error;

/// Why a block type could not be made renderable
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("No loader registered for {0}")]
    NoLoader(String),

    #[error("Failed to fetch {type_id}: {message}")]
    Fetch { type_id: String, message: String },

    #[error("Module for {0} has no default component")]
    MissingDefaultExport(String),
}

/// Failure classes reported to operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    UnknownType,
    LoadFailure,
}

impl LoadError {
    pub fn fetch(type_id: &str, message: impl std::fmt::Display) -> Self {
        LoadError::Fetch {
            type_id: type_id.to_string(),
            message: message.to_string(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            LoadError::NoLoader(_) => FailureKind::UnknownType,
            LoadError::Fetch { .. } | LoadError::MissingDefaultExport(_) => FailureKind::LoadFailure,
        }
    }
}
