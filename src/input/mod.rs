//! Uploaded documents: type detection, text extraction and caching

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
pub use text_extractor::UploadedDocument;
