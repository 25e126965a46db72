//! Skill extraction strategy shared by the lexical and semantic extractors

use crate::error::{Result, SkillGapError};
use crate::taxonomy::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Which extraction strategy is active. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    Lexical,
    Semantic,
}

impl ExtractorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractorKind::Lexical => "lexical",
            ExtractorKind::Semantic => "semantic",
        }
    }
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractorKind {
    type Err = SkillGapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lexical" | "regex" => Ok(ExtractorKind::Lexical),
            "semantic" | "ml" => Ok(ExtractorKind::Semantic),
            other => Err(SkillGapError::Configuration(format!(
                "Invalid extractor: {}. Supported: lexical, semantic",
                other
            ))),
        }
    }
}

/// Evidence that one skill appears in one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill_id: String,
    /// Distinct surface strings that matched, sorted.
    pub found_as: Vec<String>,
    /// Strength of the evidence in [0, 1].
    pub confidence: f64,
}

/// Extraction result keyed by skill id. Ordered so iteration is deterministic.
pub type SkillMatches = BTreeMap<String, SkillMatch>;

/// Text-to-skill extraction.
///
/// Implementations hold only read-only state built at startup, so a single
/// instance is shared across concurrent analyses.
pub trait SkillExtractor: Send + Sync {
    fn kind(&self) -> ExtractorKind;

    /// Detect skills tagged with `role` in `text`. Text with no usable content
    /// yields an empty map rather than an error.
    fn extract(&self, text: &str, role: Role) -> Result<SkillMatches>;

    /// Identity of the embedding model, for extractors that use one.
    fn model_name(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_kind_parsing() {
        assert_eq!("lexical".parse::<ExtractorKind>().unwrap(), ExtractorKind::Lexical);
        assert_eq!(" Semantic ".parse::<ExtractorKind>().unwrap(), ExtractorKind::Semantic);
        assert_eq!("ml".parse::<ExtractorKind>().unwrap(), ExtractorKind::Semantic);
        assert!("fuzzy".parse::<ExtractorKind>().is_err());
    }

    #[test]
    fn test_extractor_kind_serde() {
        assert_eq!(serde_json::to_string(&ExtractorKind::Semantic).unwrap(), "\"semantic\"");
    }
}
