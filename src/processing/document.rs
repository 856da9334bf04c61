//! CV section extraction

use serde::{Deserialize, Serialize};

/// Lines kept per section
const MAX_SECTION_LINES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionType {
    Summary,
    Skills,
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionType::Summary => write!(f, "Summary"),
            SectionType::Skills => write!(f, "Skills"),
        }
    }
}

/// Summary and skills lines as they appear in the original CV
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvSections {
    pub summary: Vec<String>,
    pub skills: Vec<String>,
}

impl CvSections {
    fn section_mut(&mut self, section: SectionType) -> &mut Vec<String> {
        match section {
            SectionType::Summary => &mut self.summary,
            SectionType::Skills => &mut self.skills,
        }
    }

    /// First three summary lines joined into one paragraph
    pub fn summary_preview(&self) -> String {
        self.summary.iter().take(3).cloned().collect::<Vec<_>>().join(" ")
    }

    /// First five skills lines
    pub fn skills_preview(&self) -> String {
        self.skills.iter().take(5).cloned().collect::<Vec<_>>().join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.skills.is_empty()
    }
}

/// Split a CV into its summary and skills sections.
///
/// Any line mentioning "summary" (or else "skills") starts that section and is
/// itself dropped. Content before the first header is ignored.
pub fn extract_sections(text: &str) -> CvSections {
    let mut sections = CvSections::default();
    let mut current: Option<SectionType> = None;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let lower = line.to_lowercase();
        if lower.contains("summary") {
            current = Some(SectionType::Summary);
        } else if lower.contains("skills") {
            current = Some(SectionType::Skills);
        } else if let Some(section) = current {
            let lines = sections.section_mut(section);
            if lines.len() < MAX_SECTION_LINES {
                lines.push(line.to_string());
            }
        }
    }

    sections
}
