//! Shared helpers for integration tests

#![allow(dead_code)]

use skill_gap::error::Result;
use skill_gap::processing::analyzer::GapAnalyzer;
use skill_gap::processing::embeddings::{Embedder, SkillVariantIndex};
use skill_gap::processing::lexical::LexicalExtractor;
use skill_gap::processing::semantic::SemanticExtractor;
use skill_gap::taxonomy::loader::load_taxonomy;
use skill_gap::taxonomy::TaxonomyIndex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

pub fn taxonomy() -> Arc<TaxonomyIndex> {
    Arc::new(load_taxonomy(&fixture("taxonomy.json")).unwrap())
}

/// Deterministic embedder: one dimension per keyword, valued by how often the
/// keyword occurs in the lower-cased text.
pub struct KeywordEmbedder {
    keywords: Vec<&'static str>,
}

impl KeywordEmbedder {
    pub fn new() -> Self {
        Self {
            keywords: vec!["python", "go", "docker", "kubernetes", "postgres", "aws", "react"],
        }
    }
}

impl Embedder for KeywordEmbedder {
    fn model_name(&self) -> &str {
        "keyword-test-embedder"
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                let lower = text.to_lowercase();
                self.keywords
                    .iter()
                    .map(|keyword| lower.matches(keyword).count() as f32)
                    .collect()
            })
            .collect())
    }
}

pub fn lexical_analyzer() -> GapAnalyzer {
    let taxonomy = taxonomy();
    let extractor = Arc::new(LexicalExtractor::new(taxonomy.clone()).unwrap());
    GapAnalyzer::new(taxonomy, extractor).unwrap()
}

pub fn semantic_analyzer(threshold: f64) -> GapAnalyzer {
    let taxonomy = taxonomy();
    let embedder: Arc<dyn Embedder> = Arc::new(KeywordEmbedder::new());
    let variants = Arc::new(SkillVariantIndex::build(&taxonomy, embedder.as_ref()).unwrap());
    let extractor = Arc::new(SemanticExtractor::new(taxonomy.clone(), embedder, variants, threshold));
    GapAnalyzer::new(taxonomy, extractor).unwrap()
}
