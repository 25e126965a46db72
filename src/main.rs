//! Skill gap: resume vs job description skill gap analyzer

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use skill_gap::cli::{self, Cli, Commands, ConfigAction, TaxonomyAction};
use skill_gap::config::Config;
use skill_gap::error::{Result, SkillGapError};
use skill_gap::input::read_document;
use skill_gap::output::formatter::{parse_output_format, save_report_to_file};
use skill_gap::output::{AnalysisReport, ReportGenerator};
use skill_gap::processing::analyzer::GapAnalyzer;
use skill_gap::processing::extractor::ExtractorKind;
use skill_gap::request::AnalyzeRequest;
use skill_gap::server;
use skill_gap::taxonomy::loader::load_taxonomy;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // .env is optional
    dotenvy::dotenv().ok();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env_overrides();
    Ok(config)
}

async fn run_command(command: Commands, mut config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            role,
            extractor,
            threshold,
            format,
            save,
        } => {
            if let Some(extractor) = extractor {
                config.extraction.extractor = extractor;
            }
            if let Some(threshold) = threshold {
                config.extraction.similarity_threshold = threshold;
            }
            let output_format = match format {
                Some(format) => parse_output_format(&format)?,
                None => config.output.format,
            };
            config.validate()?;

            let request = AnalyzeRequest::new(
                read_document(&resume).await?,
                read_document(&job).await?,
                role,
            );
            log::debug!("Resume preview: {}", cli::truncate_text(&request.resume_text, 200));
            log::debug!("Job preview: {}", cli::truncate_text(&request.job_text, 200));
            let role = request.validate()?;

            let analyzer = build_analyzer(&config).await?;
            let result = analyzer.analyze(&request.resume_text, &request.job_text, role)?;

            let report = AnalysisReport::new(
                result,
                analyzer.extractor_kind(),
                analyzer.model_name().map(str::to_string),
            )
            .with_sources(resume.to_string_lossy(), job.to_string_lossy());

            let generator = ReportGenerator::new(config.output.color_output && save.is_none());
            let rendered = generator.generate_report(&report, output_format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)?;
                    info!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            // a model that fails to load stops startup here
            let analyzer = Arc::new(build_analyzer(&config).await?);
            server::serve(&config.server, analyzer).await?;
        }

        Commands::Taxonomy { action } => match action {
            TaxonomyAction::List { role } => {
                let taxonomy = load_taxonomy(&config.taxonomy.path)?;
                let skills: Vec<_> = match role {
                    Some(role) => taxonomy.skills_for_role(role).collect(),
                    None => taxonomy.skills().iter().collect(),
                };

                for skill in &skills {
                    println!(
                        "{:<20} {:<24} {:<26} {}{}",
                        skill.id,
                        skill.canonical_name,
                        skill.category,
                        skill.roles.join(","),
                        if skill.is_core() { " (core)" } else { "" }
                    );
                }
                println!("\n{} skills", skills.len());
            }
        },

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let rendered = toml::to_string_pretty(&config).map_err(|e| {
                    SkillGapError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", rendered);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.unwrap_or_else(Config::config_path).display());
            }

            Some(ConfigAction::Reset) => {
                let path = config_path.unwrap_or_else(Config::config_path);
                Config::default().save_to(&path)?;
                println!("Configuration reset: {}", path.display());
            }
        },
    }

    Ok(())
}

/// Load the taxonomy and build the configured extractor. Loading an embedding
/// model can take a while, so it runs off the async runtime behind a spinner.
async fn build_analyzer(config: &Config) -> Result<GapAnalyzer> {
    let taxonomy = Arc::new(load_taxonomy(&config.taxonomy.path)?);
    let extraction = config.extraction.clone();

    let spinner = (extraction.extractor == ExtractorKind::Semantic).then(|| {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(format!("Loading embedding model {}", extraction.embedding_model));
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    });

    let analyzer = tokio::task::spawn_blocking(move || GapAnalyzer::from_config(&extraction, taxonomy))
        .await
        .map_err(|e| SkillGapError::AnalysisFailed(format!("Analyzer setup failed: {}", e)))?;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    analyzer
}
