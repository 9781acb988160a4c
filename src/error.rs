//! Error handling for the match scorer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    /// The model could not encode a text. Recovered by the semantic scorer.
    #[error("Embedding generation error: {0}")]
    Embedding(String),

    /// The embedding model could not be initialised. Never swallowed.
    #[error("Model loading error: {0}")]
    ModelLoading(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, MatchError>;

/// model2vec-rs reports load failures as anyhow errors
impl From<anyhow::Error> for MatchError {
    fn from(err: anyhow::Error) -> Self {
        MatchError::ModelLoading(format!("{:#}", err))
    }
}

impl MatchError {
    /// True when the error means no embedding model is available
    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, MatchError::ModelLoading(_) | MatchError::ModelNotFound(_))
    }
}
