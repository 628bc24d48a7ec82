//! Error types for model loading and generation

use std::path::PathBuf;

/// Errors raised by the model collaborator and the generation adapter.
///
/// A reply with no recognisable rows is not an error; see
/// [`crate::pipeline::PipelineOutcome::is_unparseable`].
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("model file not found at '{}'", .path.display())]
    ModelUnavailable { path: PathBuf },

    #[error("model load failed")]
    ModelLoad(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("generation failed")]
    Generation(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl AiError {
    pub(crate) fn generation(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        AiError::Generation(err.into())
    }
}

pub type Result<T> = std::result::Result<T, AiError>;
