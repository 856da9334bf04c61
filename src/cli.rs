//! CLI interface for cv-tailor

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

pub const CV_EXTENSIONS: &[&str] = &["pdf", "txt", "md"];
pub const JOB_EXTENSIONS: &[&str] = &["pdf", "txt", "md"];
pub const DATASET_EXTENSIONS: &[&str] = &["csv"];

#[derive(Parser)]
#[command(name = "cv-tailor")]
#[command(about = "Tailor a CV to a job posting and explore tabular data")]
#[command(long_about = "Generate a tailored summary, skills list, cover letter and LinkedIn message from a CV and job description, or preview CSV files with join hints and SQL/DAX/chart suggestions")]
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
    /// Generate tailored application content from a CV and job description
    Tailor {
        /// Path to CV file (PDF, TXT, MD)
        #[arg(long)]
        cv: PathBuf,

        /// Job title applied for
        #[arg(short, long)]
        title: String,

        /// Company name
        #[arg(long)]
        company: String,

        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long, conflicts_with = "job_text", required_unless_present = "job_text")]
        job: Option<PathBuf>,

        /// Job description passed inline
        #[arg(long)]
        job_text: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Directory to write the four text artifacts into
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Leave out the summary and skills found in the uploaded CV
        #[arg(long)]
        hide_original: bool,
    },

    /// Preview CSV files, detect join keys and suggest queries
    Explore {
        /// One or more CSV files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Plain-English question about the data
        #[arg(short, long)]
        question: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Number of rows shown per dataset preview
        #[arg(long)]
        preview_rows: Option<usize>,

        /// Save the rendered report to a file, or into a directory under a generated name
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if allowed_extensions.contains(&ext.to_lowercase().as_str()) => Ok(()),
        Some(ext) => Err(format!(
            "Unsupported file extension: .{}. Allowed: {}",
            ext,
            allowed_extensions.join(", ")
        )),
        None => Err("File has no extension".to_string()),
    }
}
