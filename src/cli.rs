//! CLI interface for the match scorer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "coldmail-match")]
#[command(about = "Score how well a resume matches a job posting")]
#[command(long_about = "Compute ATS keyword, semantic and combined match scores for a resume and job posting, and assemble cold email or cover letter prompts")]
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
    /// Score a resume against a job description
    Score {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD, HTML)
        #[arg(short, long)]
        job: PathBuf,

        /// Skip the embedding model (ATS score only)
        #[arg(long)]
        lexical_only: bool,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Show keyword breakdown
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// List the top keywords of a file
    Keywords {
        /// Path to a resume or job description
        file: PathBuf,

        /// Number of keywords to show (at most 50)
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },

    /// Build the cold email or cover letter prompt for a resume and job
    Prompt {
        #[arg(short, long)]
        resume: PathBuf,

        #[arg(short, long)]
        job: PathBuf,

        /// Write a cover letter instead of a cold email
        #[arg(long)]
        cover_letter: bool,

        /// professional, friendly, persuasive or formal
        #[arg(long)]
        tone: Option<String>,

        /// 100 to 400 in steps of 50
        #[arg(long)]
        word_limit: Option<u32>,

        #[arg(long, default_value = "")]
        recipient: String,

        #[arg(long, default_value = "")]
        position: String,

        #[arg(long, default_value = "")]
        company: String,

        #[arg(long)]
        message: Option<String>,

        #[arg(long, default_value = "")]
        linkedin: String,

        #[arg(long, default_value = "")]
        github: String,

        #[arg(long, default_value = "")]
        portfolio: String,
    },

    /// Embedding model management
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List registered embedding models
    List,

    /// Download a model
    Download {
        /// Model name or HuggingFace repo ID
        model: String,

        /// Force re-download if model exists
        #[arg(short, long)]
        force: bool,
    },

    /// Show model information
    Info {
        model: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
