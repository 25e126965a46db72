//! CLI interface for the skill gap analyzer

use crate::processing::extractor::ExtractorKind;
use crate::taxonomy::Role;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skill-gap")]
#[command(about = "Resume vs job description skill gap analyzer")]
#[command(long_about = "Find the skills a job asks for that a resume lacks, rank them by importance and suggest a learning path for each")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume against a job description
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Target role: backend, fullstack, cloud_devops
        #[arg(long, value_parser = parse_role)]
        role: Role,

        /// Skill extractor: lexical or semantic
        #[arg(short, long, value_parser = parse_extractor)]
        extractor: Option<ExtractorKind>,

        /// Similarity threshold for the semantic extractor
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        format: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Start the HTTP API
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Inspect the skill taxonomy
    Taxonomy {
        #[command(subcommand)]
        action: TaxonomyAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum TaxonomyAction {
    /// List skills in the taxonomy
    List {
        /// Only skills tagged with this role
        #[arg(long, value_parser = parse_role)]
        role: Option<Role>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

fn parse_role(value: &str) -> Result<Role, String> {
    value.parse().map_err(|e: crate::error::SkillGapError| e.to_string())
}

fn parse_extractor(value: &str) -> Result<ExtractorKind, String> {
    value
        .parse()
        .map_err(|e: crate::error::SkillGapError| e.to_string())
}

/// Shorten text to at most `max_chars` characters for previews.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "skill-gap", "analyze", "--resume", "cv.pdf", "--job", "job.md", "--role", "cloud_devops",
            "--extractor", "semantic", "--threshold", "0.4",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze { role, extractor, threshold, format, .. } => {
                assert_eq!(role, Role::CloudDevops);
                assert_eq!(extractor, Some(ExtractorKind::Semantic));
                assert_eq!(threshold, Some(0.4));
                assert!(format.is_none());
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_invalid_role_rejected() {
        let parsed = Cli::try_parse_from([
            "skill-gap", "analyze", "--resume", "a.txt", "--job", "b.txt", "--role", "data",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["skill-gap", "serve", "--port", "9000", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Serve { port: Some(9000), .. }));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefgh", 3), "abc...");
    }
}
