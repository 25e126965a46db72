//! Loading the skill catalog from its JSON file

use crate::error::{Result, SkillGapError};
use crate::taxonomy::{Skill, TaxonomyIndex};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    skills: Vec<Skill>,
}

/// Parse a taxonomy document of the form `{"skills": [...]}`.
pub fn parse_taxonomy(json: &str) -> Result<TaxonomyIndex> {
    let file: TaxonomyFile = serde_json::from_str(json)
        .map_err(|e| SkillGapError::Taxonomy(format!("Failed to parse taxonomy: {}", e)))?;
    TaxonomyIndex::new(file.skills)
}

pub fn load_taxonomy(path: &Path) -> Result<TaxonomyIndex> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SkillGapError::Taxonomy(format!("Failed to read taxonomy '{}': {}", path.display(), e))
    })?;
    let index = parse_taxonomy(&content)?;
    log::info!("Loaded {} skills from {}", index.len(), path.display());
    Ok(index)
}
