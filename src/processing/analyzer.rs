//! Gap analysis: matched and missing skills between a resume and a job posting

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::processing::embeddings::{Embedder, Model2VecEmbedder, SkillVariantIndex};
use crate::processing::extractor::{ExtractorKind, SkillExtractor};
use crate::processing::importance::{priority, ImportanceScorer, Priority};
use crate::processing::lexical::LexicalExtractor;
use crate::processing::roadmap;
use crate::processing::semantic::SemanticExtractor;
use crate::taxonomy::{Role, TaxonomyIndex};
use serde::{Deserialize, Serialize, Serializer};
use std::sync::Arc;

pub const LEXICAL_REASON: &str =
    "Ranked by frequency + 'required/must' proximity in the job text (heuristic).";
pub const SEMANTIC_REASON: &str = "Analyzed via ML semantic similarity + requirement context.";

/// Two decimals, exact halves to even.
fn round2<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 100.0).round_ties_even() / 100.0)
}

/// A required skill the resume already shows, with resume-side evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedSkill {
    pub skill_id: String,
    pub skill: String,
    pub category: String,
    pub found_as: Vec<String>,
    #[serde(serialize_with = "round2")]
    pub confidence: f64,
}

/// A required skill the resume lacks, ranked by how urgently it should be learned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSkill {
    pub skill_id: String,
    pub skill: String,
    pub category: String,
    #[serde(serialize_with = "round2")]
    pub importance: f64,
    pub priority: Priority,
    pub reason: String,
    pub suggested_path: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub target_role: Role,
    pub matched_count: usize,
    pub missing_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub matched: Vec<MatchedSkill>,
    /// Sorted by importance descending, then skill id ascending.
    pub missing: Vec<MissingSkill>,
    pub summary: AnalysisSummary,
}

/// Runs the active extractor over both texts and ranks the gaps.
///
/// Holds only startup-built, read-only state; share it behind an `Arc`.
pub struct GapAnalyzer {
    taxonomy: Arc<TaxonomyIndex>,
    extractor: Arc<dyn SkillExtractor>,
    scorer: ImportanceScorer,
}

impl GapAnalyzer {
    pub fn new(taxonomy: Arc<TaxonomyIndex>, extractor: Arc<dyn SkillExtractor>) -> Result<Self> {
        let scorer = ImportanceScorer::new(&taxonomy, extractor.kind())?;
        Ok(Self {
            taxonomy,
            extractor,
            scorer,
        })
    }

    /// Build the configured extractor. For the semantic variant this loads the
    /// embedding model and encodes every skill variant, so failures here are fatal.
    pub fn from_config(config: &ExtractionConfig, taxonomy: Arc<TaxonomyIndex>) -> Result<Self> {
        let extractor: Arc<dyn SkillExtractor> = match config.extractor {
            ExtractorKind::Lexical => Arc::new(LexicalExtractor::new(taxonomy.clone())?),
            ExtractorKind::Semantic => {
                let embedder: Arc<dyn Embedder> = Arc::new(Model2VecEmbedder::load(
                    &config.embedding_model,
                    config.batch_size,
                )?);
                let variants = Arc::new(SkillVariantIndex::build(&taxonomy, embedder.as_ref())?);
                Arc::new(SemanticExtractor::new(
                    taxonomy.clone(),
                    embedder,
                    variants,
                    config.similarity_threshold,
                ))
            }
        };

        log::info!("Using {} skill extractor", extractor.kind());
        Self::new(taxonomy, extractor)
    }

    pub fn taxonomy(&self) -> &TaxonomyIndex {
        &self.taxonomy
    }

    pub fn extractor_kind(&self) -> ExtractorKind {
        self.extractor.kind()
    }

    pub fn model_name(&self) -> Option<&str> {
        self.extractor.model_name()
    }

    pub fn reason(&self) -> &'static str {
        match self.extractor.kind() {
            ExtractorKind::Lexical => LEXICAL_REASON,
            ExtractorKind::Semantic => SEMANTIC_REASON,
        }
    }

    pub fn suggested_path(&self, skill_id: &str) -> Result<Vec<String>> {
        roadmap::suggested_path(&self.taxonomy, skill_id)
    }

    pub fn analyze(&self, resume_text: &str, job_text: &str, role: Role) -> Result<AnalysisResult> {
        let resume_skills = self.extractor.extract(resume_text, role)?;
        let job_skills = self.extractor.extract(job_text, role)?;

        log::debug!(
            "Extracted {} resume skills and {} job skills for role {}",
            resume_skills.len(),
            job_skills.len(),
            role
        );

        // Both maps iterate in ascending id order.
        let mut matched = Vec::new();
        for skill_id in job_skills.keys().filter(|id| resume_skills.contains_key(*id)) {
            let skill = self.taxonomy.skill(skill_id)?;
            let evidence = &resume_skills[skill_id];
            matched.push(MatchedSkill {
                skill_id: skill_id.clone(),
                skill: skill.canonical_name.clone(),
                category: skill.category.clone(),
                found_as: evidence.found_as.clone(),
                confidence: evidence.confidence,
            });
        }

        let job = self.scorer.prepare(job_text);
        let mut ranked = Vec::new();
        for (skill_id, job_match) in job_skills.iter().filter(|(id, _)| !resume_skills.contains_key(*id)) {
            let skill = self.taxonomy.skill(skill_id)?;
            let importance = self.scorer.score(&job, skill, job_match.confidence)?;
            ranked.push((skill, importance));
        }
        // stable: equal importances keep ascending id order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let missing = ranked
            .into_iter()
            .map(|(skill, importance)| {
                Ok(MissingSkill {
                    skill_id: skill.id.clone(),
                    skill: skill.canonical_name.clone(),
                    category: skill.category.clone(),
                    importance,
                    priority: priority(importance),
                    reason: self.reason().to_string(),
                    suggested_path: self.suggested_path(&skill.id)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(AnalysisResult {
            summary: AnalysisSummary {
                target_role: role,
                matched_count: matched.len(),
                missing_count: missing.len(),
            },
            matched,
            missing,
        })
    }
}
