//! Report formatters: colored console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::{Result, SkillGapError};
use crate::output::report::AnalysisReport;
use crate::processing::importance::Priority;
use colored::{Color, Colorize};
use std::fmt::Write;
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
}

/// Emits the analysis result only, in the same shape the HTTP endpoint returns.
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".blue().bold(), title.blue().bold())
        } else {
            format!("\n▓ {}\n", title)
        }
    }

    fn priority_badge(&self, priority: Priority) -> String {
        let color = match priority {
            Priority::High => Color::Red,
            Priority::Medium => Color::Yellow,
            Priority::Low => Color::Green,
        };
        let label = format!("[{}]", priority.to_string().to_uppercase());
        if self.use_colors {
            label.color(color).bold().to_string()
        } else {
            label
        }
    }
}

fn fmt_err(e: std::fmt::Error) -> SkillGapError {
    SkillGapError::OutputFormatting(e.to_string())
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut out = String::new();

        out.push_str(&self.header("SKILL GAP ANALYSIS"));
        writeln!(
            out,
            "Role: {} | Extractor: {}{}",
            self.colorize(result.summary.target_role.as_str(), Color::Cyan),
            report.metadata.extractor,
            report
                .metadata
                .model
                .as_deref()
                .map(|m| format!(" ({})", m))
                .unwrap_or_default()
        )
        .map_err(fmt_err)?;
        writeln!(
            out,
            "Matched: {} | Missing: {}",
            self.colorize(&result.summary.matched_count.to_string(), Color::Green),
            self.colorize(&result.summary.missing_count.to_string(), Color::Red)
        )
        .map_err(fmt_err)?;

        out.push_str(&self.header("Matched Skills"));
        if result.matched.is_empty() {
            out.push_str("  (none)\n");
        }
        for skill in &result.matched {
            writeln!(
                out,
                "  ✓ {} [{}] confidence {:.2} (found as: {})",
                self.colorize(&skill.skill, Color::Green),
                skill.category,
                skill.confidence,
                skill.found_as.join(", ")
            )
            .map_err(fmt_err)?;
        }

        out.push_str(&self.header("Missing Skills"));
        if result.missing.is_empty() {
            out.push_str("  (none)\n");
        }
        for (i, skill) in result.missing.iter().enumerate() {
            writeln!(
                out,
                "  {}. {} {} [{}] importance {:.2}",
                i + 1,
                self.priority_badge(skill.priority),
                skill.skill,
                skill.category,
                skill.importance
            )
            .map_err(fmt_err)?;
            writeln!(out, "     Path: {}", skill.suggested_path.join(" → ")).map_err(fmt_err)?;
        }

        if let Some(first) = result.missing.first() {
            writeln!(out, "\n{}", self.colorize(&first.reason, Color::BrightBlack)).map_err(fmt_err)?;
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(&report.result)?)
        } else {
            Ok(serde_json::to_string(&report.result)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn file_name(path: &str) -> String {
        Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string())
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let meta = &report.metadata;
        let mut out = String::new();

        out.push_str("# Skill Gap Analysis\n\n");

        if self.include_metadata {
            writeln!(
                out,
                "**Generated:** {} | **Extractor:** {}",
                meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                meta.extractor
            )
            .map_err(fmt_err)?;
            if let Some(model) = &meta.model {
                writeln!(out, "**Model:** `{}`", model).map_err(fmt_err)?;
            }
            if let (Some(resume), Some(job)) = (&meta.resume_file, &meta.job_file) {
                writeln!(
                    out,
                    "**Resume:** `{}` | **Job:** `{}`",
                    Self::file_name(resume),
                    Self::file_name(job)
                )
                .map_err(fmt_err)?;
            }
            out.push('\n');
        }

        out.push_str("## Summary\n\n");
        writeln!(out, "- **Target role:** {}", result.summary.target_role).map_err(fmt_err)?;
        writeln!(out, "- **Matched skills:** {}", result.summary.matched_count).map_err(fmt_err)?;
        writeln!(out, "- **Missing skills:** {}\n", result.summary.missing_count).map_err(fmt_err)?;

        out.push_str("## Matched Skills\n\n");
        if result.matched.is_empty() {
            out.push_str("_None._\n\n");
        } else {
            out.push_str("| Skill | Category | Confidence | Found as |\n");
            out.push_str("|-------|----------|------------|----------|\n");
            for skill in &result.matched {
                writeln!(
                    out,
                    "| {} | {} | {:.2} | {} |",
                    skill.skill,
                    skill.category,
                    skill.confidence,
                    skill.found_as.join(", ")
                )
                .map_err(fmt_err)?;
            }
            out.push('\n');
        }

        out.push_str("## Missing Skills\n\n");
        if result.missing.is_empty() {
            out.push_str("_None._\n");
        }
        for skill in &result.missing {
            writeln!(
                out,
                "### {} ({} priority, importance {:.2})\n",
                skill.skill, skill.priority, skill.importance
            )
            .map_err(fmt_err)?;
            writeln!(out, "_{}_ · {}\n", skill.category, skill.reason).map_err(fmt_err)?;
            for (i, step) in skill.suggested_path.iter().enumerate() {
                writeln!(out, "{}. {}", i + 1, step).map_err(fmt_err)?;
            }
            out.push('\n');
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

/// Coordinates the formatters for each output format.
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ReportGenerator {
    pub fn new(use_colors: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(true)
    }
}

pub fn parse_output_format(format: &str) -> Result<OutputFormat> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(SkillGapError::InvalidInput(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        ))),
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::{AnalysisResult, AnalysisSummary, MatchedSkill, MissingSkill};
    use crate::processing::extractor::ExtractorKind;
    use crate::taxonomy::Role;

    fn report() -> AnalysisReport {
        let result = AnalysisResult {
            matched: vec![MatchedSkill {
                skill_id: "java".into(),
                skill: "Java".into(),
                category: "APIs & Integration".into(),
                found_as: vec!["java".into()],
                confidence: 0.634,
            }],
            missing: vec![MissingSkill {
                skill_id: "python".into(),
                skill: "Python".into(),
                category: "APIs & Integration".into(),
                importance: 0.72,
                priority: Priority::Medium,
                reason: "heuristic".into(),
                suggested_path: vec!["REST design".into(), "Validation".into()],
            }],
            summary: AnalysisSummary {
                target_role: Role::Backend,
                matched_count: 1,
                missing_count: 1,
            },
        };
        AnalysisReport::new(result, ExtractorKind::Lexical, None).with_sources("cv/resume.pdf", "job.md")
    }

    #[test]
    fn test_console_without_colors() {
        let text = ConsoleFormatter::new(false).format_report(&report()).unwrap();
        assert!(text.contains("Role: backend | Extractor: lexical"));
        assert!(text.contains("✓ Java [APIs & Integration] confidence 0.63 (found as: java)"));
        assert!(text.contains("1. [MEDIUM] Python [APIs & Integration] importance 0.72"));
        assert!(text.contains("REST design → Validation"));
    }

    #[test]
    fn test_json_is_the_result_shape() {
        let text = JsonFormatter::new(false).format_report(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["matched"][0]["confidence"], serde_json::json!(0.63));
        assert_eq!(value["summary"]["missing_count"], 1);
        assert!(value.get("metadata").is_none());
    }

    #[test]
    fn test_markdown_sections() {
        let text = MarkdownFormatter::new(true).format_report(&report()).unwrap();
        assert!(text.starts_with("# Skill Gap Analysis"));
        assert!(text.contains("**Resume:** `resume.pdf` | **Job:** `job.md`"));
        assert!(text.contains("| Java | APIs & Integration | 0.63 | java |"));
        assert!(text.contains("### Python (Medium priority, importance 0.72)"));
        assert!(text.contains("2. Validation"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::new(false);
        let report = report();
        for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Markdown] {
            assert!(!generator.generate_report(&report, format).unwrap().is_empty());
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD").unwrap(), OutputFormat::Markdown);
        assert_eq!(parse_output_format("json").unwrap(), OutputFormat::Json);
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_save_report_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("gap.md");
        save_report_to_file("# report", &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# report");
    }
}
