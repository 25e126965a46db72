//! Pattern-based skill extraction over normalized text

use crate::error::Result;
use crate::processing::alias_matcher::AliasMatcher;
use crate::processing::extractor::{ExtractorKind, SkillExtractor, SkillMatch, SkillMatches};
use crate::processing::normalizer::TextNormalizer;
use crate::taxonomy::{Role, TaxonomyIndex};
use std::sync::Arc;

const BASE_CONFIDENCE: f64 = 0.55;
const CONFIDENCE_PER_ALIAS: f64 = 0.08;

/// Confidence grows with the number of distinct surface forms found, capped at 1.0.
pub fn lexical_confidence(distinct_hits: usize) -> f64 {
    (BASE_CONFIDENCE + CONFIDENCE_PER_ALIAS * distinct_hits as f64).min(1.0)
}

pub struct LexicalExtractor {
    taxonomy: Arc<TaxonomyIndex>,
    normalizer: TextNormalizer,
    /// One matcher per skill, in catalog order.
    matchers: Vec<(String, AliasMatcher)>,
}

impl LexicalExtractor {
    pub fn new(taxonomy: Arc<TaxonomyIndex>) -> Result<Self> {
        let matchers = taxonomy
            .skills()
            .iter()
            .map(|skill| {
                let aliases = skill.aliases.iter().map(|a| a.to_lowercase());
                Ok((skill.id.clone(), AliasMatcher::new(aliases)?))
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Built lexical patterns for {} skills", matchers.len());

        Ok(Self {
            taxonomy,
            normalizer: TextNormalizer::new(),
            matchers,
        })
    }
}

impl SkillExtractor for LexicalExtractor {
    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Lexical
    }

    fn extract(&self, text: &str, role: Role) -> Result<SkillMatches> {
        let normalized = self.normalizer.normalize_lexical(text);
        let mut found = SkillMatches::new();
        if normalized.is_empty() {
            return Ok(found);
        }

        for (skill_id, matcher) in &self.matchers {
            let skill = self.taxonomy.skill(skill_id)?;
            if !skill.has_role(role) {
                continue;
            }

            let hits = matcher.matched_strings(&normalized);
            if hits.is_empty() {
                continue;
            }

            let confidence = lexical_confidence(hits.len());
            found.insert(
                skill_id.clone(),
                SkillMatch {
                    skill_id: skill_id.clone(),
                    found_as: hits.into_iter().collect(),
                    confidence,
                },
            );
        }

        Ok(found)
    }
}
