//! Document format detection from file extensions

use crate::error::{Result, SkillGapError};
use std::fmt;
use std::path::Path;

/// Document formats that can be read as resume or job text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Text,
    Markdown,
}

impl DocumentFormat {
    pub const SUPPORTED_EXTENSIONS: [&'static str; 4] = ["pdf", "txt", "md", "markdown"];

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "txt" => Some(DocumentFormat::Text),
            "md" | "markdown" => Some(DocumentFormat::Markdown),
            _ => None,
        }
    }

    pub fn detect(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                SkillGapError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Self::from_extension(extension).ok_or_else(|| {
            SkillGapError::UnsupportedFormat(format!(
                "Unsupported file extension .{} for {}. Allowed: {}",
                extension,
                path.display(),
                Self::SUPPORTED_EXTENSIONS.join(", ")
            ))
        })
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Text => "plain text",
            DocumentFormat::Markdown => "Markdown",
        };
        f.write_str(name)
    }
}
