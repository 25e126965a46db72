//! Text embeddings and the precomputed skill variant matrix

use crate::error::{Result, SkillGapError};
use crate::taxonomy::TaxonomyIndex;
use model2vec_rs::model::StaticModel;
use ndarray::Array2;
use std::time::Instant;

/// A text embedding function with a fixed output dimension.
pub trait Embedder: Send + Sync {
    fn model_name(&self) -> &str;

    /// Embed every text, returning one vector per input in the same order.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Model2Vec static embeddings, loaded from a local folder or the HuggingFace Hub.
pub struct Model2VecEmbedder {
    model: StaticModel,
    model_name: String,
    batch_size: usize,
}

impl Model2VecEmbedder {
    pub fn load(model_name: &str, batch_size: usize) -> Result<Self> {
        let start_time = Instant::now();
        log::info!("Loading Model2Vec embedding model: {}", model_name);

        let model = StaticModel::from_pretrained(
            model_name,
            None, // token
            None, // normalize
            None, // subfolder
        )
        .map_err(|e| SkillGapError::ModelLoading(format!("Failed to load model '{}': {}", model_name, e)))?;

        log::info!("Model loaded in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            model_name: model_name.to_string(),
            batch_size: batch_size.max(1),
        })
    }
}

impl Embedder for Model2VecEmbedder {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.batch_size) {
            embeddings.extend(self.model.encode(batch));
        }
        Ok(embeddings)
    }
}

/// Stack vectors into a matrix of unit-length rows so that a matrix product
/// yields cosine similarities. Zero vectors stay zero.
pub fn unit_rows(vectors: &[Vec<f32>], dimension: usize) -> Result<Array2<f32>> {
    let mut matrix = Array2::<f32>::zeros((vectors.len(), dimension));

    for (i, vector) in vectors.iter().enumerate() {
        if vector.len() != dimension {
            return Err(SkillGapError::Embedding(format!(
                "Embedding dimensions don't match: expected {}, got {}",
                dimension,
                vector.len()
            )));
        }
        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm == 0.0 {
            continue;
        }
        for (j, value) in vector.iter().enumerate() {
            matrix[[i, j]] = value / norm;
        }
    }

    Ok(matrix)
}

/// A surface form of a skill that takes part in semantic matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVariant {
    pub skill_id: String,
    pub text: String,
}

/// Embeddings of every skill variant, computed once at startup and read-only after.
#[derive(Debug, Clone)]
pub struct SkillVariantIndex {
    variants: Vec<SkillVariant>,
    embeddings: Array2<f32>,
}

impl SkillVariantIndex {
    /// Embed the canonical name and every alias of every skill, in catalog order.
    pub fn build(taxonomy: &TaxonomyIndex, embedder: &dyn Embedder) -> Result<Self> {
        let start_time = Instant::now();

        let variants: Vec<SkillVariant> = taxonomy
            .skills()
            .iter()
            .flat_map(|skill| {
                skill.names().filter(|name| !name.trim().is_empty()).map(|name| SkillVariant {
                    skill_id: skill.id.clone(),
                    text: name.to_string(),
                })
            })
            .collect();

        if variants.is_empty() {
            log::warn!("Taxonomy has no skill variants to embed");
            return Ok(Self {
                variants,
                embeddings: Array2::zeros((0, 0)),
            });
        }

        let texts: Vec<String> = variants.iter().map(|v| v.text.clone()).collect();
        let vectors = embedder.embed(&texts)?;
        if vectors.len() != variants.len() {
            return Err(SkillGapError::Embedding(format!(
                "Embedder returned {} vectors for {} skill variants",
                vectors.len(),
                variants.len()
            )));
        }

        let dimension = vectors[0].len();
        if dimension == 0 {
            return Err(SkillGapError::Embedding(
                "Embedder produced zero-dimensional vectors".to_string(),
            ));
        }
        let embeddings = unit_rows(&vectors, dimension)?;

        log::info!(
            "Encoded {} skill variants ({} dims) in {:.2?}",
            variants.len(),
            dimension,
            start_time.elapsed()
        );

        Ok(Self {
            variants,
            embeddings,
        })
    }

    pub fn variants(&self) -> &[SkillVariant] {
        &self.variants
    }

    /// Unit-length variant embeddings, one row per variant.
    pub fn embeddings(&self) -> &Array2<f32> {
        &self.embeddings
    }

    pub fn dimension(&self) -> usize {
        self.embeddings.ncols()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
