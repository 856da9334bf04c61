//! Error handling for cv-tailor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvTailorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document unreadable: {0}")]
    DocumentUnreadable(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dataset unreadable: {0}")]
    DatasetUnreadable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, CvTailorError>;

