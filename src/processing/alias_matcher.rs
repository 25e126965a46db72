//! Word-bounded literal alias matching
//!
//! An alias only counts when it is not directly preceded or followed by an ASCII
//! letter or digit, so `go` matches in `go developer` but not in `golang` or
//! `django`, while symbols inside an alias (`c++`, `c#`, `node.js`) still match.
//!
//! Aliases behave like an ordered alternation: the text is scanned left to right,
//! at the first position where some alias matches with valid boundaries the
//! earliest-declared alias wins, and scanning resumes after that match.

use crate::error::{Result, SkillGapError};
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasHit {
    pub alias_index: usize,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone)]
pub struct AliasMatcher {
    automaton: Option<AhoCorasick>,
}

impl AliasMatcher {
    /// Build a matcher over `aliases` in declaration order. Empty aliases are ignored.
    pub fn new<I, S>(aliases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let aliases: Vec<String> = aliases
            .into_iter()
            .map(|a| a.as_ref().to_string())
            .filter(|a| !a.is_empty())
            .collect();

        if aliases.is_empty() {
            return Ok(Self { automaton: None });
        }

        // Standard semantics are required for overlapping search; the ordered
        // alternation is resolved afterwards in `find_bounded`.
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&aliases)
            .map_err(|e| {
                SkillGapError::Taxonomy(format!("Failed to build alias matcher: {}", e))
            })?;

        Ok(Self {
            automaton: Some(automaton),
        })
    }

    /// Non-overlapping, word-bounded matches in scan order.
    pub fn find_bounded(&self, text: &str) -> Vec<AliasHit> {
        let Some(automaton) = &self.automaton else {
            return Vec::new();
        };
        let bytes = text.as_bytes();

        let mut candidates: Vec<AliasHit> = automaton
            .find_overlapping_iter(text)
            .filter(|m| is_bounded(bytes, m.start(), m.end()))
            .map(|m| AliasHit {
                alias_index: m.pattern().as_usize(),
                start: m.start(),
                end: m.end(),
            })
            .collect();
        candidates.sort_by_key(|hit| (hit.start, hit.alias_index));

        let mut hits = Vec::new();
        let mut cursor = 0;
        for candidate in candidates {
            if candidate.start >= cursor {
                cursor = candidate.end;
                hits.push(candidate);
            }
        }
        hits
    }

    /// Distinct matched substrings of `text`, sorted.
    pub fn matched_strings(&self, text: &str) -> BTreeSet<String> {
        self.find_bounded(text)
            .into_iter()
            .map(|hit| text[hit.start..hit.end].to_string())
            .collect()
    }

    /// Number of word-bounded occurrences, repeats included.
    pub fn count(&self, text: &str) -> usize {
        self.find_bounded(text).len()
    }
}

fn is_bounded(bytes: &[u8], start: usize, end: usize) -> bool {
    let clear_before = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
    let clear_after = end >= bytes.len() || !bytes[end].is_ascii_alphanumeric();
    clear_before && clear_after
}
