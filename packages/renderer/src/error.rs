use thiserror::Error;

/// Errors that can occur during rendering
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Zone nesting deeper than {limit} at {zone}")]
    DepthExceeded { zone: String, limit: usize },

    #[error("Invalid template: {0}")]
    Template(#[from] minijinja::Error),
}
