//! Configuration management for the skill gap analyzer

use crate::error::{Result, SkillGapError};
use crate::processing::extractor::ExtractorKind;
use crate::processing::semantic::DEFAULT_SIMILARITY_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub taxonomy: TaxonomyConfig,
    pub extraction: ExtractionConfig,
    pub server: ServerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub extractor: ExtractorKind,
    pub similarity_threshold: f64,
    pub embedding_model: String,
    pub batch_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub cors_allowed_origin_regex: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("skills_taxonomy.json"),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            extractor: ExtractorKind::Lexical,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            embedding_model: "minishlab/potion-base-8M".to_string(),
            batch_size: 32,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_allowed_origins: vec!["http://localhost:5173".to_string()],
            cors_allowed_origin_regex: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
        }
    }
}

/// Split a comma-separated origin list. `*` stands for any origin.
pub fn parse_cors_origins(origins: &str) -> Vec<String> {
    let origins = origins.trim();
    if origins.is_empty() {
        return Vec::new();
    }
    if origins == "*" {
        return vec!["*".to_string()];
    }
    origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Load from the default location, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| SkillGapError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SkillGapError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-gap")
            .join("config.toml")
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("SKILLS_TAXONOMY_PATH") {
            self.taxonomy.path = PathBuf::from(path);
        }

        if let Some(extractor) = lookup("SKILL_EXTRACTOR") {
            match extractor.parse() {
                Ok(kind) => self.extraction.extractor = kind,
                Err(e) => log::warn!("Ignoring SKILL_EXTRACTOR: {}", e),
            }
        }

        if let Some(model) = lookup("ML_MODEL_NAME") {
            self.extraction.embedding_model = model;
        }

        if let Some(threshold) = lookup("ML_SIMILARITY_THRESHOLD") {
            match threshold.trim().parse::<f64>() {
                Ok(value) => self.extraction.similarity_threshold = value,
                Err(_) => log::warn!(
                    "Ignoring unparsable ML_SIMILARITY_THRESHOLD '{}', keeping {}",
                    threshold,
                    self.extraction.similarity_threshold
                ),
            }
        }

        if let Some(origins) = lookup("CORS_ALLOWED_ORIGINS") {
            self.server.cors_allowed_origins = parse_cors_origins(&origins);
        }

        if let Some(regex) = lookup("CORS_ALLOWED_ORIGIN_REGEX") {
            let regex = regex.trim();
            self.server.cors_allowed_origin_regex = (!regex.is_empty()).then(|| regex.to_string());
        }

        if let Some(port) = lookup("PORT") {
            match port.trim().parse::<u16>() {
                Ok(value) => self.server.port = value,
                Err(_) => log::warn!("Ignoring invalid PORT '{}'", port),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.extraction.similarity_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(SkillGapError::Configuration(format!(
                "similarity_threshold must be within [0, 1], got {}",
                threshold
            )));
        }

        if self.extraction.batch_size == 0 {
            return Err(SkillGapError::Configuration(
                "batch_size must be greater than zero".to_string(),
            ));
        }

        if self.extraction.embedding_model.trim().is_empty()
            && self.extraction.extractor == ExtractorKind::Semantic
        {
            return Err(SkillGapError::Configuration(
                "embedding_model is required for the semantic extractor".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.extraction.extractor, ExtractorKind::Lexical);
        assert_eq!(config.extraction.similarity_threshold, 0.35);
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.cors_allowed_origins, vec!["http://localhost:5173"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_cors_origins() {
        assert!(parse_cors_origins("  ").is_empty());
        assert_eq!(parse_cors_origins("*"), vec!["*"]);
        assert_eq!(
            parse_cors_origins("https://a.example, ,http://localhost:5173,"),
            vec!["https://a.example", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("SKILLS_TAXONOMY_PATH", "/data/taxonomy.json"),
            ("SKILL_EXTRACTOR", "semantic"),
            ("ML_MODEL_NAME", "minishlab/potion-base-32M"),
            ("ML_SIMILARITY_THRESHOLD", "0.4"),
            ("CORS_ALLOWED_ORIGINS", "https://app.example"),
            ("CORS_ALLOWED_ORIGIN_REGEX", r"https://.*\.vercel\.app"),
            ("PORT", "9090"),
        ]));

        assert_eq!(config.taxonomy.path, PathBuf::from("/data/taxonomy.json"));
        assert_eq!(config.extraction.extractor, ExtractorKind::Semantic);
        assert_eq!(config.extraction.embedding_model, "minishlab/potion-base-32M");
        assert_eq!(config.extraction.similarity_threshold, 0.4);
        assert_eq!(config.server.cors_allowed_origins, vec!["https://app.example"]);
        assert!(config.server.cors_allowed_origin_regex.is_some());
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_invalid_threshold_override_keeps_value() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("ML_SIMILARITY_THRESHOLD", "high"), ("SKILL_EXTRACTOR", "fuzzy")]));

        assert_eq!(config.extraction.similarity_threshold, 0.35);
        assert_eq!(config.extraction.extractor, ExtractorKind::Lexical);
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        config.extraction.similarity_threshold = 1.5;
        assert!(matches!(config.validate(), Err(SkillGapError::Configuration(_))));

        let mut config = Config::default();
        config.extraction.batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.extraction.extractor = ExtractorKind::Semantic;
        config.output.format = OutputFormat::Markdown;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.extraction.extractor, ExtractorKind::Semantic);
        assert_eq!(loaded.output.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 7000\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.extraction.batch_size, 32);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/skill-gap.toml")).unwrap();
        assert_eq!(config.taxonomy.path, PathBuf::from("skills_taxonomy.json"));
    }
}
