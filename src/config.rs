//! Configuration management for cv-tailor

use crate::error::{CvTailorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub tailor: TailorConfig,
    pub explorer: ExplorerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailorConfig {
    /// Upper bound on lines in the generated skills section
    pub max_skills: usize,
    /// How many detected technologies the summary names
    pub max_summary_technologies: usize,
    /// Characters of the job description quoted in the cover letter
    pub excerpt_chars: usize,
    /// Phrase used when no technology or skill keyword is found
    pub fallback_focus: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    pub preview_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for TailorConfig {
    fn default() -> Self {
        Self {
            max_skills: 10,
            max_summary_technologies: 4,
            excerpt_chars: 120,
            fallback_focus: "data science and analytics".to_string(),
        }
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self { preview_rows: 5 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tailor: TailorConfig::default(),
            explorer: ExplorerConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load the user config, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            CvTailorError::Configuration(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CvTailorError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("cv-tailor")
            .join("config.toml")
    }
}
