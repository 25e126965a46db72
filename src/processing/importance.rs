//! Importance scoring and priority tiers for missing skills
//!
//! The formulas are additive heuristics with fixed constants. Each boost is
//! applied and clamped in a fixed order, and downstream ranking depends on it.

use crate::error::{Result, SkillGapError};
use crate::processing::alias_matcher::AliasMatcher;
use crate::processing::extractor::ExtractorKind;
use crate::processing::normalizer::TextNormalizer;
use crate::taxonomy::{Skill, TaxonomyIndex};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Words that mark a requirement when they appear near a skill name.
pub const REQUIREMENT_KEYWORDS: [&str; 6] = [
    "required",
    "must",
    "essential",
    "mandatory",
    "need to",
    "strongly preferred",
];

/// Maximum distance in characters between a requirement keyword and a skill name.
pub const PROXIMITY_WINDOW: usize = 110;

const OCCURRENCE_BASE: f64 = 0.25;
const OCCURRENCE_STEP: f64 = 0.12;
const PROXIMITY_BOOST: f64 = 0.25;
const CORE_BOOST: f64 = 0.1;

const HIGH_THRESHOLD: f64 = 0.78;
const MEDIUM_THRESHOLD: f64 = 0.55;

/// How urgently a missing skill should be learned. Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        };
        f.write_str(label)
    }
}

pub fn priority(importance: f64) -> Priority {
    if importance >= HIGH_THRESHOLD {
        Priority::High
    } else if importance >= MEDIUM_THRESHOLD {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Job text prepared once per analysis for repeated scoring.
pub struct JobText {
    haystack: String,
}

struct SkillPatterns {
    /// One matcher per alias; occurrences are counted per alias and summed.
    occurrences: Vec<AliasMatcher>,
    /// Matches any requirement keyword within the window of any skill name.
    proximity: Option<Regex>,
}

pub struct ImportanceScorer {
    kind: ExtractorKind,
    normalizer: TextNormalizer,
    patterns: HashMap<String, SkillPatterns>,
}

impl ImportanceScorer {
    /// Precompile per-skill patterns for the given extraction strategy.
    ///
    /// The lexical variant works on lexically normalized text and names, the
    /// semantic variant only lower-cases them.
    pub fn new(taxonomy: &TaxonomyIndex, kind: ExtractorKind) -> Result<Self> {
        let normalizer = TextNormalizer::new();
        let mut patterns = HashMap::with_capacity(taxonomy.len());

        for skill in taxonomy.skills() {
            let occurrences = match kind {
                ExtractorKind::Lexical => skill
                    .aliases
                    .iter()
                    .map(|alias| AliasMatcher::new([normalizer.normalize_lexical(alias)]))
                    .collect::<Result<Vec<_>>>()?,
                ExtractorKind::Semantic => Vec::new(),
            };

            let names: Vec<String> = skill
                .names()
                .map(|name| match kind {
                    ExtractorKind::Lexical => normalizer.normalize_lexical(name),
                    ExtractorKind::Semantic => name.to_lowercase(),
                })
                .filter(|name| !name.is_empty())
                .collect();

            let proximity = proximity_regex(&names)
                .map_err(|e| {
                    SkillGapError::Taxonomy(format!(
                        "Failed to build proximity pattern for '{}': {}",
                        skill.id, e
                    ))
                })?;

            patterns.insert(
                skill.id.clone(),
                SkillPatterns {
                    occurrences,
                    proximity,
                },
            );
        }

        Ok(Self {
            kind,
            normalizer,
            patterns,
        })
    }

    pub fn prepare(&self, job_text: &str) -> JobText {
        let haystack = match self.kind {
            ExtractorKind::Lexical => self.normalizer.normalize_lexical(job_text),
            ExtractorKind::Semantic => job_text.to_lowercase(),
        };
        JobText { haystack }
    }

    /// Importance of learning `skill` for this job, in [0, 1].
    ///
    /// `job_confidence` is the skill's confidence from the job-text extraction run.
    /// Only the semantic variant uses it as its base; the lexical variant counts
    /// alias occurrences instead.
    pub fn score(&self, job: &JobText, skill: &Skill, job_confidence: f64) -> Result<f64> {
        let patterns = self
            .patterns
            .get(&skill.id)
            .ok_or_else(|| SkillGapError::UnknownSkill(skill.id.clone()))?;

        let mut score = match self.kind {
            ExtractorKind::Lexical => {
                let count: usize = patterns
                    .occurrences
                    .iter()
                    .map(|matcher| matcher.count(&job.haystack))
                    .sum();
                clamp(OCCURRENCE_BASE + OCCURRENCE_STEP * count as f64)
            }
            ExtractorKind::Semantic => clamp(job_confidence),
        };

        let near_requirement = patterns
            .proximity
            .as_ref()
            .map(|regex| regex.is_match(&job.haystack))
            .unwrap_or(false);
        if near_requirement {
            score = clamp(score + PROXIMITY_BOOST);
        }

        if skill.is_core() {
            score = clamp(score + CORE_BOOST);
        }

        Ok(score)
    }

    /// Convenience wrapper that prepares the job text for a single score.
    pub fn score_text(&self, job_text: &str, skill: &Skill, job_confidence: f64) -> Result<f64> {
        self.score(&self.prepare(job_text), skill, job_confidence)
    }
}

fn clamp(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// `keyword .{0,W} name | name .{0,W} keyword` over every keyword and name.
/// `.` does not cross line breaks.
fn proximity_regex(names: &[String]) -> std::result::Result<Option<Regex>, regex::Error> {
    if names.is_empty() {
        return Ok(None);
    }

    let keywords = REQUIREMENT_KEYWORDS
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    let names = names
        .iter()
        .map(|n| regex::escape(n))
        .collect::<Vec<_>>()
        .join("|");

    let pattern = format!(
        "(?:{k}).{{0,{w}}}(?:{n})|(?:{n}).{{0,{w}}}(?:{k})",
        k = keywords,
        n = names,
        w = PROXIMITY_WINDOW
    );
    Regex::new(&pattern).map(Some)
}
