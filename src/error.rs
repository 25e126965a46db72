//! Error handling for the skill gap analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillGapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Taxonomy error: {0}")]
    Taxonomy(String),

    /// A skill id was referenced that the taxonomy index does not contain.
    /// This means the index and its consumers disagree and is never recoverable.
    #[error("Skill '{0}' is not present in the taxonomy index")]
    UnknownSkill(String),

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Model loading error: {0}")]
    ModelLoading(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),
}

pub type Result<T> = std::result::Result<T, SkillGapError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for SkillGapError {
    fn from(err: anyhow::Error) -> Self {
        SkillGapError::AnalysisFailed(err.to_string())
    }
}

impl SkillGapError {
    /// Errors caused by the caller's input rather than by the service itself.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SkillGapError::InvalidInput(_) | SkillGapError::UnsupportedFormat(_)
        )
    }
}
