//! Report structures for the tailored application package and data exploration

use crate::explorer::dataset::{ColumnSummary, Dataset, DatasetCollection};
use crate::explorer::relationships::{detect_relationships, JoinKeys};
use crate::explorer::suggest::QuerySuggester;
use crate::processing::document::{extract_sections, CvSections};
use crate::processing::tailor::{Tailor, TailoringRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SUMMARY_FILE: &str = "professional_summary.txt";
pub const SKILLS_FILE: &str = "tailored_skills.txt";
pub const COVER_LETTER_FILE: &str = "cover_letter.txt";
pub const LINKEDIN_FILE: &str = "linkedin_message.txt";

/// One downloadable text artifact
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifact {
    pub title: &'static str,
    pub file_name: &'static str,
    pub content: String,
}

/// Everything generated for one job application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationPackage {
    pub job_title: String,
    pub company: String,

    /// Tailored professional summary paragraph
    pub summary: String,

    /// Bullet list, one skill per line
    pub skills: String,

    pub cover_letter: String,
    pub linkedin_message: String,

    /// Summary and skills as found in the uploaded CV, for comparison
    pub original_sections: CvSections,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    /// Files the report was built from
    pub sources: Vec<String>,
}

impl ReportMetadata {
    pub fn new(sources: Vec<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            sources,
        }
    }
}

impl ApplicationPackage {
    pub fn generate(tailor: &Tailor, request: &TailoringRequest, source: &str) -> Self {
        let jd = &request.job_description;
        let cv = &request.cv_text;

        Self {
            job_title: request.job_title.clone(),
            company: request.company.clone(),
            summary: tailor.generate_tailored_summary(jd, cv),
            skills: tailor.generate_tailored_skills(jd, cv),
            cover_letter: tailor.generate_cover_letter(jd, cv, &request.company, &request.job_title),
            linkedin_message: tailor.generate_linkedin_message(&request.job_title, &request.company, jd),
            original_sections: extract_sections(cv),
            metadata: ReportMetadata::new(vec![source.to_string()]),
        }
    }

    /// The four artifacts in display order, with their fixed file names
    pub fn artifacts(&self) -> Vec<Artifact> {
        vec![
            Artifact {
                title: "Professional Summary",
                file_name: SUMMARY_FILE,
                content: self.summary.clone(),
            },
            Artifact {
                title: "Skills Section",
                file_name: SKILLS_FILE,
                content: self.skills.clone(),
            },
            Artifact {
                title: "Cover Letter",
                file_name: COVER_LETTER_FILE,
                content: self.cover_letter.clone(),
            },
            Artifact {
                title: "LinkedIn Message",
                file_name: LINKEDIN_FILE,
                content: self.linkedin_message.clone(),
            },
        ]
    }
}

/// Preview and statistics of one uploaded dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetOverview {
    pub name: String,
    pub row_count: usize,
    pub headers: Vec<String>,
    pub preview: Vec<Vec<String>>,
    pub summary: Vec<ColumnSummary>,
}

impl DatasetOverview {
    pub fn from_dataset(dataset: &Dataset, preview_rows: usize) -> Self {
        Self {
            name: dataset.name.clone(),
            row_count: dataset.row_count(),
            headers: dataset.headers.clone(),
            preview: dataset.preview(preview_rows).to_vec(),
            summary: dataset.describe(),
        }
    }
}

/// Answers to a plain-English question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    pub question: String,
    pub sql: String,
    pub dax: String,
    pub chart: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorationReport {
    pub datasets: Vec<DatasetOverview>,
    pub join_keys: JoinKeys,
    pub suggestions: Option<Suggestions>,
    pub metadata: ReportMetadata,
}

impl ExplorationReport {
    pub fn generate(
        datasets: &DatasetCollection,
        question: Option<&str>,
        suggester: &QuerySuggester,
        preview_rows: usize,
    ) -> Self {
        let join_keys = detect_relationships(datasets);

        let suggestions = question
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| Suggestions {
                question: q.to_string(),
                sql: suggester.generate_sql(q, datasets, &join_keys),
                dax: suggester.suggest_dax(q),
                chart: suggester.recommend_chart(q),
            });

        Self {
            datasets: datasets
                .iter()
                .map(|dataset| DatasetOverview::from_dataset(dataset, preview_rows))
                .collect(),
            join_keys,
            suggestions,
            metadata: ReportMetadata::new(datasets.iter().map(|d| d.name.clone()).collect()),
        }
    }
}
