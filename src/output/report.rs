//! Report wrapper combining an analysis result with run metadata

use crate::processing::analyzer::AnalysisResult;
use crate::processing::extractor::ExtractorKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub extractor: ExtractorKind,
    pub model: Option<String>,
    pub resume_file: Option<String>,
    pub job_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub metadata: ReportMetadata,
}

impl AnalysisReport {
    pub fn new(result: AnalysisResult, extractor: ExtractorKind, model: Option<String>) -> Self {
        Self {
            result,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                extractor,
                model,
                resume_file: None,
                job_file: None,
            },
        }
    }

    pub fn with_sources(mut self, resume_file: impl Into<String>, job_file: impl Into<String>) -> Self {
        self.metadata.resume_file = Some(resume_file.into());
        self.metadata.job_file = Some(job_file.into());
        self
    }
}
