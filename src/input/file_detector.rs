//! File type detection

use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Csv,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            "csv" => FileType::Csv,
            _ => FileType::Unknown,
        }
    }

    /// Detect from a file name; names without an extension are `Unknown`
    pub fn from_name(name: &str) -> Self {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_is_case_insensitive() {
        assert_eq!(FileType::from_name("CV.PDF"), FileType::Pdf);
        assert_eq!(FileType::from_name("resume.Md"), FileType::Markdown);
        assert_eq!(FileType::from_name("sales.csv"), FileType::Csv);
        assert_eq!(FileType::from_name("notes"), FileType::Unknown);
        assert_eq!(FileType::from_name("archive.zip"), FileType::Unknown);
    }
}
