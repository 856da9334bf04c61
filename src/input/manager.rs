//! Reads uploads from disk and caches their extracted text

use crate::error::{CvTailorError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{extract_document, UploadedDocument};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a file from disk as an upload, keeping only its file name
    pub async fn read_upload(path: &Path) -> Result<UploadedDocument> {
        if !path.exists() {
            return Err(CvTailorError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| CvTailorError::InvalidInput(format!("Not a file: {}", path.display())))?;
        let bytes = fs::read(path).await?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());

        Ok(UploadedDocument::new(name, bytes))
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        // Reject before reading the file
        let file_type = FileType::from_name(&path_str);
        if matches!(file_type, FileType::Unknown | FileType::Csv) {
            return Err(CvTailorError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            )));
        }

        let document = Self::read_upload(path).await?;
        info!("Extracting {:?} text from: {}", file_type, path.display());
        let text = extract_document(&document)?;

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
