//! Output formatters for match reports

use crate::config::OutputFormat;
use crate::error::{MatchError, Result};
use crate::processing::analyzer::MatchReport;
use crate::processing::scoring::MatchScore;
use crate::processing::semantic::SemanticOutcome;
use colored::{Color, Colorize};
use std::fmt::Write;

/// Keywords listed per text in detailed output
const DETAILED_KEYWORDS: usize = 15;

pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    detailed: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn score_color(score: MatchScore) -> Color {
        match score.value() {
            s if s >= 75.0 => Color::Green,
            s if s >= 50.0 => Color::Cyan,
            s if s >= 25.0 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn paint(&self, score: MatchScore) -> String {
        let text = score.to_string();
        if self.use_colors {
            text.color(Self::score_color(score)).bold().to_string()
        } else {
            text
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().underline().to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut out = String::new();
        let fmt_err = |e: std::fmt::Error| MatchError::OutputFormatting(e.to_string());

        writeln!(out, "{}", self.heading("Match Scores")).map_err(fmt_err)?;
        writeln!(out, "  ATS match score:      {}", self.paint(report.lexical_score)).map_err(fmt_err)?;

        match &report.semantic {
            Some(SemanticOutcome::Scored { score }) => {
                writeln!(out, "  Semantic match score: {}", self.paint(*score)).map_err(fmt_err)?;
            }
            Some(SemanticOutcome::Fallback { score, reason }) => {
                writeln!(out, "  Semantic match score: {} (fallback: {})", self.paint(*score), reason)
                    .map_err(fmt_err)?;
            }
            None => {
                writeln!(out, "  Semantic match score: unavailable").map_err(fmt_err)?;
            }
        }

        match report.combined_score {
            Some(combined) => {
                writeln!(out, "  Combined match score: {}", self.paint(combined)).map_err(fmt_err)?;
            }
            None => {
                writeln!(out, "  Combined match score: unavailable (lexical only)").map_err(fmt_err)?;
            }
        }

        writeln!(out).map_err(fmt_err)?;
        writeln!(out, "{}", self.heading("Keywords")).map_err(fmt_err)?;
        if report.matching_keywords.is_empty() {
            writeln!(out, "  Matching: none").map_err(fmt_err)?;
        } else {
            writeln!(out, "  Matching: {}", report.matching_keywords.join(", ")).map_err(fmt_err)?;
        }

        if self.detailed {
            if !report.missing_keywords.is_empty() {
                writeln!(out, "  Missing:  {}", report.missing_keywords.join(", ")).map_err(fmt_err)?;
            }

            writeln!(out).map_err(fmt_err)?;
            writeln!(out, "{}", self.heading("Top Job Keywords")).map_err(fmt_err)?;
            for (i, keyword) in report.job_keywords.entries().iter().take(DETAILED_KEYWORDS).enumerate() {
                writeln!(out, "  {:>2}. {} ({})", i + 1, keyword.term, keyword.count).map_err(fmt_err)?;
            }

            writeln!(out).map_err(fmt_err)?;
            writeln!(out, "{}", self.heading("Top Resume Keywords")).map_err(fmt_err)?;
            for (i, keyword) in report.resume_keywords.entries().iter().take(DETAILED_KEYWORDS).enumerate() {
                writeln!(out, "  {:>2}. {} ({})", i + 1, keyword.term, keyword.count).map_err(fmt_err)?;
            }

            writeln!(out).map_err(fmt_err)?;
            if let Some(model) = &report.embedding_model {
                writeln!(out, "Embedding model: {}", model).map_err(fmt_err)?;
            }
            writeln!(out, "Processing time: {}ms", report.processing_time_ms).map_err(fmt_err)?;
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
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(detailed: bool) -> Self {
        Self { detailed }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut out = String::new();
        let fmt_err = |e: std::fmt::Error| MatchError::OutputFormatting(e.to_string());
        let unavailable = || "n/a".to_string();

        writeln!(out, "# Resume Match Report").map_err(fmt_err)?;
        writeln!(out).map_err(fmt_err)?;
        writeln!(out, "_Generated {}_", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")).map_err(fmt_err)?;
        writeln!(out).map_err(fmt_err)?;
        writeln!(out, "| Score | Value |").map_err(fmt_err)?;
        writeln!(out, "|-------|-------|").map_err(fmt_err)?;
        writeln!(out, "| ATS | {} |", report.lexical_score).map_err(fmt_err)?;
        writeln!(
            out,
            "| Semantic | {} |",
            report.semantic_score().map(|s| s.to_string()).unwrap_or_else(unavailable)
        )
        .map_err(fmt_err)?;
        writeln!(
            out,
            "| Combined | {} |",
            report.combined_score.map(|s| s.to_string()).unwrap_or_else(unavailable)
        )
        .map_err(fmt_err)?;

        if let Some(SemanticOutcome::Fallback { reason, .. }) = &report.semantic {
            writeln!(out).map_err(fmt_err)?;
            writeln!(out, "> Semantic score fell back to zero: {}", reason).map_err(fmt_err)?;
        }

        writeln!(out).map_err(fmt_err)?;
        writeln!(out, "## Matching Keywords").map_err(fmt_err)?;
        writeln!(out).map_err(fmt_err)?;
        for keyword in &report.matching_keywords {
            writeln!(out, "- {}", keyword).map_err(fmt_err)?;
        }

        if self.detailed && !report.missing_keywords.is_empty() {
            writeln!(out).map_err(fmt_err)?;
            writeln!(out, "## Missing Keywords").map_err(fmt_err)?;
            writeln!(out).map_err(fmt_err)?;
            for keyword in &report.missing_keywords {
                writeln!(out, "- {}", keyword).map_err(fmt_err)?;
            }
        }

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

/// Pick the formatter for an output format
pub fn formatter_for(format: OutputFormat, use_colors: bool, detailed: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors, detailed)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(detailed)),
    }
}
