//! Document input: format detection and text extraction

pub mod file_detector;
pub mod text_extractor;

pub use file_detector::DocumentFormat;

use crate::error::{Result, SkillGapError};
use std::path::Path;
use text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};

/// Read a resume or job document as plain text, dispatching on its extension.
pub async fn read_document(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(SkillGapError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        )));
    }

    let format = DocumentFormat::detect(path)?;
    log::info!("Reading {} document: {}", format, path.display());

    let text = match format {
        DocumentFormat::Pdf => PdfExtractor.extract(path).await?,
        DocumentFormat::Text => PlainTextExtractor.extract(path).await?,
        DocumentFormat::Markdown => MarkdownExtractor.extract(path).await?,
    };

    log::debug!("Read {} characters from {}", text.chars().count(), path.display());
    Ok(text)
}
