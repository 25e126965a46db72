//! Skill extraction, importance scoring and gap analysis

pub mod alias_matcher;
pub mod analyzer;
pub mod embeddings;
pub mod extractor;
pub mod importance;
pub mod lexical;
pub mod normalizer;
pub mod roadmap;
pub mod semantic;
