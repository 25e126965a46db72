//! Embedding-similarity skill extraction
//!
//! Every sentence-like chunk of the input is compared with every skill variant.
//! A variant's score is its best similarity over all chunks.

use crate::error::{Result, SkillGapError};
use crate::processing::embeddings::{unit_rows, Embedder, SkillVariantIndex};
use crate::processing::extractor::{ExtractorKind, SkillExtractor, SkillMatch, SkillMatches};
use crate::processing::normalizer::TextNormalizer;
use crate::taxonomy::{Role, TaxonomyIndex};
use ndarray::Axis;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.35;

pub struct SemanticExtractor {
    taxonomy: Arc<TaxonomyIndex>,
    embedder: Arc<dyn Embedder>,
    variants: Arc<SkillVariantIndex>,
    threshold: f64,
    normalizer: TextNormalizer,
}

impl SemanticExtractor {
    pub fn new(
        taxonomy: Arc<TaxonomyIndex>,
        embedder: Arc<dyn Embedder>,
        variants: Arc<SkillVariantIndex>,
        threshold: f64,
    ) -> Self {
        Self {
            taxonomy,
            embedder,
            variants,
            threshold,
            normalizer: TextNormalizer::new(),
        }
    }

    /// Best similarity of each variant over all chunks of `text`, in variant order.
    /// Empty when the text has no usable chunks.
    pub fn variant_scores(&self, text: &str) -> Result<Vec<f32>> {
        let chunks = self.normalizer.semantic_chunks(text);
        if chunks.is_empty() || self.variants.is_empty() {
            return Ok(Vec::new());
        }

        let vectors = self.embedder.embed(&chunks)?;
        if vectors.len() != chunks.len() {
            return Err(SkillGapError::Embedding(format!(
                "Embedder returned {} vectors for {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        let chunk_matrix = unit_rows(&vectors, self.variants.dimension())?;
        // chunks x variants
        let similarities = chunk_matrix.dot(&self.variants.embeddings().t());
        let best = similarities.fold_axis(Axis(0), f32::NEG_INFINITY, |&best, &score| best.max(score));

        log::debug!(
            "Scored {} chunks against {} skill variants",
            chunks.len(),
            self.variants.len()
        );

        Ok(best.to_vec())
    }
}

impl SkillExtractor for SemanticExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Semantic
    }

    fn extract(&self, text: &str, role: Role) -> Result<SkillMatches> {
        let scores = self.variant_scores(text)?;

        // skill id -> (best score, surviving variant strings)
        let mut grouped: BTreeMap<&str, (f64, BTreeSet<&str>)> = BTreeMap::new();

        for (variant, &score) in self.variants.variants().iter().zip(scores.iter()) {
            let score = f64::from(score);
            if score < self.threshold {
                continue;
            }

            let skill = self.taxonomy.skill(&variant.skill_id)?;
            if !skill.has_role(role) {
                continue;
            }

            let entry = grouped
                .entry(variant.skill_id.as_str())
                .or_insert((f64::NEG_INFINITY, BTreeSet::new()));
            entry.0 = entry.0.max(score);
            entry.1.insert(variant.text.as_str());
        }

        Ok(grouped
            .into_iter()
            .map(|(skill_id, (best, found_as))| {
                (
                    skill_id.to_string(),
                    SkillMatch {
                        skill_id: skill_id.to_string(),
                        found_as: found_as.into_iter().map(str::to_string).collect(),
                        confidence: best.min(1.0),
                    },
                )
            })
            .collect())
    }

    fn model_name(&self) -> Option<&str> {
        Some(self.embedder.model_name())
    }
}
