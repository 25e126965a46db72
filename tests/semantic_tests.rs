//! Semantic pipeline tests with a deterministic keyword embedder

mod common;

use common::{fixture, semantic_analyzer, taxonomy, KeywordEmbedder};
use skill_gap::input::read_document;
use skill_gap::processing::analyzer::SEMANTIC_REASON;
use skill_gap::processing::embeddings::{Embedder, SkillVariantIndex};
use skill_gap::processing::extractor::{ExtractorKind, SkillExtractor};
use skill_gap::processing::importance::Priority;
use skill_gap::processing::semantic::{SemanticExtractor, DEFAULT_SIMILARITY_THRESHOLD};
use skill_gap::taxonomy::Role;
use std::sync::Arc;

fn extractor(threshold: f64) -> SemanticExtractor {
    let taxonomy = taxonomy();
    let embedder: Arc<dyn Embedder> = Arc::new(KeywordEmbedder::new());
    let variants = Arc::new(SkillVariantIndex::build(&taxonomy, embedder.as_ref()).unwrap());
    SemanticExtractor::new(taxonomy, embedder, variants, threshold)
}

#[tokio::test]
async fn test_semantic_documents_to_result() {
    let resume = read_document(&fixture("sample_resume.txt")).await.unwrap();
    let job = read_document(&fixture("sample_job.md")).await.unwrap();

    let analyzer = semantic_analyzer(DEFAULT_SIMILARITY_THRESHOLD);
    assert_eq!(analyzer.extractor_kind(), ExtractorKind::Semantic);
    assert_eq!(analyzer.model_name(), Some("keyword-test-embedder"));

    let result = analyzer.analyze(&resume, &job, Role::Backend).unwrap();

    let matched: Vec<&str> = result.matched.iter().map(|m| m.skill_id.as_str()).collect();
    let mut missing: Vec<&str> = result.missing.iter().map(|m| m.skill_id.as_str()).collect();
    missing.sort();
    assert_eq!(matched, vec!["docker", "postgresql"]);
    assert_eq!(missing, vec!["aws", "python"]);

    for skill in &result.missing {
        // cosine 1/sqrt(5), then requirement and core boosts
        assert!((skill.importance - 0.797).abs() < 1e-3);
        assert_eq!(skill.priority, Priority::High);
        assert_eq!(skill.reason, SEMANTIC_REASON);
    }
    for skill in &result.matched {
        assert!((0.0..=1.0).contains(&skill.confidence));
    }
}

#[test]
fn test_variants_cover_canonical_and_aliases() {
    let taxonomy = taxonomy();
    let index = SkillVariantIndex::build(&taxonomy, &KeywordEmbedder::new()).unwrap();

    let expected: usize = taxonomy.skills().iter().map(|s| 1 + s.aliases.len()).sum();
    assert_eq!(index.len(), expected);
    assert_eq!(index.dimension(), 7);
}

#[test]
fn test_threshold_boundary() {
    let text = "Docker and Kubernetes on AWS.";
    let probe = extractor(DEFAULT_SIMILARITY_THRESHOLD);
    let scores = probe.variant_scores(text).unwrap();
    let best = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let best = f64::from(best);

    let at = extractor(best).extract(text, Role::CloudDevops).unwrap();
    assert_eq!(at.keys().map(String::as_str).collect::<Vec<_>>(), vec!["aws", "docker", "kubernetes"]);

    let above = extractor(best + 1e-6).extract(text, Role::CloudDevops).unwrap();
    assert!(above.is_empty());
}

#[test]
fn test_empty_text_matches_nothing() {
    let extractor = extractor(0.0);
    assert!(extractor.extract("", Role::Backend).unwrap().is_empty());
    assert!(extractor.extract(" \n\t ", Role::Fullstack).unwrap().is_empty());
}

#[test]
fn test_semantic_extract_is_deterministic() {
    let extractor = extractor(DEFAULT_SIMILARITY_THRESHOLD);
    let text = "React dashboards. Python services on AWS.";

    let first = extractor.extract(text, Role::Fullstack).unwrap();
    assert_eq!(extractor.extract(text, Role::Fullstack).unwrap(), first);
    assert!(first.contains_key("react"));
    assert!(first.contains_key("python"));
}
