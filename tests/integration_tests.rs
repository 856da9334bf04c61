//! Integration tests for cv-tailor

use cv_tailor::config::OutputFormat;
use cv_tailor::error::CvTailorError;
use cv_tailor::explorer::dataset::{ColumnStats, DatasetLoader};
use cv_tailor::explorer::relationships::detect_relationships;
use cv_tailor::explorer::suggest::QuerySuggester;
use cv_tailor::input::manager::InputManager;
use cv_tailor::output::formatter::{save_artifacts, save_report_to_file, ReportGenerator};
use cv_tailor::output::report::{ApplicationPackage, ExplorationReport};
use cv_tailor::processing::tailor::{Tailor, TailoringRequest, ESSENTIAL_SKILLS};
use std::path::Path;

const CV_TXT: &str = "tests/fixtures/sample_cv.txt";
const CV_MD: &str = "tests/fixtures/sample_cv.md";
const JOB_TXT: &str = "tests/fixtures/sample_job.txt";
const SALES_CSV: &str = "tests/fixtures/sales.csv";
const CUSTOMERS_CSV: &str = "tests/fixtures/customers.csv";

async fn tailoring_request(cv: &str) -> TailoringRequest {
    let mut manager = InputManager::new();
    TailoringRequest {
        cv_text: manager.extract_text(Path::new(cv)).await.unwrap(),
        job_title: "Data Scientist".to_string(),
        company: "Northwind".to_string(),
        job_description: manager.extract_text(Path::new(JOB_TXT)).await.unwrap(),
    }
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let text = manager.extract_text(Path::new(CV_TXT)).await.unwrap();

    assert!(text.contains("Jane Doe"));
    assert!(text.contains("Technical Skills"));
    assert!(text.contains("PostgreSQL"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let text = manager.extract_text(Path::new(CV_MD)).await.unwrap();

    assert!(text.contains("Jane Doe"));
    assert!(text.contains("Senior data scientist"));
    assert!(text.contains("Tableau"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    assert!(!text.contains('`'));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new(CV_TXT);

    let first = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let second = manager.extract_text(path).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();

    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(matches!(result, Err(CvTailorError::UnsupportedFormat(_))));

    let result = manager.extract_text(Path::new(SALES_CSV)).await;
    assert!(matches!(result, Err(CvTailorError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/missing.txt")).await;
    assert!(matches!(result, Err(CvTailorError::InvalidInput(_))));
}

#[tokio::test]
async fn test_tailored_package_from_fixtures() {
    let request = tailoring_request(CV_TXT).await;
    request.validate().unwrap();
    let tailor = Tailor::new().unwrap();
    let package = ApplicationPackage::generate(&tailor, &request, CV_TXT);

    assert!(package.summary.starts_with(
        "Senior-Level Leadership Data Scientist with comprehensive expertise in Python, SQL, Machine Learning, Tableau."
    ));

    let skills: Vec<&str> = package.skills.lines().collect();
    assert_eq!(skills.len(), 10);
    assert_eq!(skills[0], "• Python (Pandas, NumPy, Scikit-learn, Matplotlib, Seaborn)");
    assert_eq!(skills[1], "• SQL (Complex queries, database optimization, ETL processes)");
    assert_eq!(skills[2], "• R (tidyverse, ggplot2, statistical analysis, data visualization)");
    assert!(skills.contains(&"• Big Data Technologies (Apache Spark, Hadoop, Distributed Computing)"));
    assert!(package.skills.ends_with(ESSENTIAL_SKILLS[2]));
    assert!(!package.skills.contains(ESSENTIAL_SKILLS[3]));

    let excerpt: String = request.job_description.chars().take(120).collect();
    assert!(package.cover_letter.starts_with("NORTHWIND\nHiring Manager\n"));
    assert!(package.cover_letter.contains(&format!("{}...", excerpt)));
    assert!(package.cover_letter.contains(
        "expertise in Python programming, SQL and database management, machine learning model development, data visualization, cloud platform experience,"
    ));

    assert!(package.linkedin_message.contains("your team's focus on machine learning initiatives."));

    assert_eq!(package.original_sections.summary.len(), 2);
    assert_eq!(package.original_sections.skills[0], "Python (Pandas, NumPy, scikit-learn)");
}

#[tokio::test]
async fn test_markdown_cv_yields_same_sections() {
    let request = tailoring_request(CV_MD).await;
    let tailor = Tailor::new().unwrap();
    let package = ApplicationPackage::generate(&tailor, &request, CV_MD);

    assert!(package.original_sections.summary[0].starts_with("Senior data scientist"));
    assert_eq!(package.original_sections.skills.last().map(String::as_str), Some("Tableau"));
}

#[tokio::test]
async fn test_empty_company_rejected() {
    let mut request = tailoring_request(CV_TXT).await;
    request.company = "   ".to_string();
    assert!(matches!(request.validate(), Err(CvTailorError::InvalidInput(_))));
}

#[tokio::test]
async fn test_save_artifacts_to_directory() {
    let request = tailoring_request(CV_TXT).await;
    let package = ApplicationPackage::generate(&Tailor::new().unwrap(), &request, CV_TXT);
    let dir = tempfile::tempdir().unwrap();

    let written = save_artifacts(&package, &dir.path().join("out")).unwrap();
    assert_eq!(written.len(), 4);

    let skills = std::fs::read_to_string(dir.path().join("out/tailored_skills.txt")).unwrap();
    assert_eq!(skills, package.skills);
    let summary = std::fs::read_to_string(dir.path().join("out/professional_summary.txt")).unwrap();
    assert_eq!(summary, package.summary);
}

#[tokio::test]
async fn test_load_datasets_and_detect_join_keys() {
    let datasets = DatasetLoader::load_all(&[SALES_CSV, CUSTOMERS_CSV]).await.unwrap();
    assert_eq!(datasets.len(), 2);

    let sales = datasets.get("sales.csv").unwrap();
    assert_eq!(sales.row_count(), 6);
    assert_eq!(sales.table_name(), "sales");

    let keys = detect_relationships(&datasets);
    let shared = keys.columns_between("customers.csv", "sales.csv").unwrap();
    assert_eq!(shared.iter().collect::<Vec<_>>(), vec!["customer_id"]);
}

#[tokio::test]
async fn test_describe_amount_column() {
    let datasets = DatasetLoader::load_all(&[SALES_CSV]).await.unwrap();
    let summary = datasets.first().unwrap().describe();
    let amount = summary.iter().find(|column| column.name == "amount").unwrap();

    assert_eq!(amount.count, 6);
    match &amount.stats {
        ColumnStats::Numeric { min, median, max, .. } => {
            assert_eq!(*min, 50.0);
            assert_eq!(*median, 110.0);
            assert_eq!(*max, 200.0);
        }
        other => panic!("expected numeric stats, got {:?}", other),
    }

    let region = summary.iter().find(|column| column.name == "region").unwrap();
    assert_eq!(
        region.stats,
        ColumnStats::Categorical {
            unique: 3,
            top: Some("North".to_string()),
            freq: 3
        }
    );
}

#[tokio::test]
async fn test_exploration_report_with_question() {
    let datasets = DatasetLoader::load_all(&[SALES_CSV, CUSTOMERS_CSV]).await.unwrap();
    let suggester = QuerySuggester::new().unwrap();
    let report = ExplorationReport::generate(&datasets, Some("total amount by region over time"), &suggester, 3);

    assert_eq!(report.datasets[0].preview.len(), 3);
    let suggestions = report.suggestions.as_ref().unwrap();
    assert!(suggestions.sql.contains("FROM sales t1\nJOIN customers t2 ON t1.customer_id = t2.customer_id"));
    assert_eq!(suggestions.dax, "DAX Suggestion: `Total Sales = SUM(Sales[Amount])`");
    assert_eq!(suggestions.chart, "📈 Recommended Chart: Line Chart (showing trends over time)");
}

#[tokio::test]
async fn test_render_and_save_exploration_report() {
    let datasets = DatasetLoader::load_all(&[SALES_CSV, CUSTOMERS_CSV]).await.unwrap();
    let report = ExplorationReport::generate(&datasets, Some("count customers"), &QuerySuggester::new().unwrap(), 5);
    let generator = ReportGenerator::with_options(false, true, false, true);

    let json = generator.render_exploration(&report, &OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["join_keys"]["candidates"][0]["columns"][0], "customer_id");

    let html = generator.render_exploration(&report, &OutputFormat::Html).unwrap();
    assert!(html.contains("DISTINCTCOUNT(Customer[ID])"));

    let markdown = generator.render_exploration(&report, &OutputFormat::Markdown).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports/exploration.md");
    save_report_to_file(&markdown, &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), markdown);
}
