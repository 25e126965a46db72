//! Analysis request payload and its validation

use crate::error::{Result, SkillGapError};
use crate::taxonomy::Role;
use serde::{Deserialize, Serialize};

/// Minimum length of each text, in characters.
pub const MIN_TEXT_CHARS: usize = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub job_text: String,
    pub target_role: String,
}

impl AnalyzeRequest {
    pub fn new(resume_text: impl Into<String>, job_text: impl Into<String>, role: Role) -> Self {
        Self {
            resume_text: resume_text.into(),
            job_text: job_text.into(),
            target_role: role.as_str().to_string(),
        }
    }

    /// Check both texts and resolve the role. Runs before any analysis.
    pub fn validate(&self) -> Result<Role> {
        check_length("resume_text", &self.resume_text)?;
        check_length("job_text", &self.job_text)?;
        self.target_role.parse()
    }
}

fn check_length(field: &str, text: &str) -> Result<()> {
    let chars = text.chars().count();
    if chars < MIN_TEXT_CHARS {
        return Err(SkillGapError::InvalidInput(format!(
            "{} must be at least {} characters, got {}",
            field, MIN_TEXT_CHARS, chars
        )));
    }
    Ok(())
}
