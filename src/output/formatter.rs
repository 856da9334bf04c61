//! Output formatters for application packages and exploration reports

use crate::config::OutputFormat;
use crate::error::{CvTailorError, Result};
use crate::explorer::dataset::{ColumnStats, ColumnSummary};
use crate::output::report::*;
use askama::Template;
use colored::{Color, Colorize};
use log::info;
use std::path::{Path, PathBuf};

/// Columns of the describe table, one row per dataset column
pub const DESCRIBE_HEADERS: [&str; 12] = [
    "column", "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max",
];

/// Trait for rendering reports in one output format
pub trait OutputFormatter {
    fn format_package(&self, package: &ApplicationPackage) -> Result<String>;
    fn format_exploration(&self, report: &ExplorationReport) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

const HTML_STYLES: &str = r#"
        body { font-family: 'Segoe UI', sans-serif; color: #2c3e50; max-width: 960px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 15px; box-shadow: 0 10px 30px rgba(0,0,0,0.1); }
        h1 { border-bottom: 3px solid #27ae60; padding-bottom: 10px; }
        h2 { color: #219653; }
        pre { background: #e9f5ee; border-left: 5px solid #28a745; border-radius: 6px; padding: 1em; white-space: pre-wrap; }
        table { border-collapse: collapse; margin: 10px 0; }
        th, td { border: 1px solid #e0e0e0; padding: 4px 8px; text-align: left; }
        .metadata { background: #e9ecef; padding: 15px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
"#;

struct HtmlArtifact {
    title: String,
    file_name: String,
    content: String,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Application Package: {{ job_title }} at {{ company }}</title>
    {% if include_styles %}<style>{{ styles|safe }}</style>{% endif %}
</head>
<body>
    <div class="container">
        <h1>🎯 {{ job_title }} at {{ company }}</h1>
        {% for artifact in artifacts %}
        <div class="section">
            <h2>{{ artifact.title }}</h2>
            <p><small>{{ artifact.file_name }}</small></p>
            <pre>{{ artifact.content }}</pre>
        </div>
        {% endfor %}
        {% if has_original %}
        <div class="section">
            <h2>🔍 Original CV Content</h2>
            {% if !original_summary.is_empty() %}<h3>Original Summary</h3><pre>{{ original_summary }}</pre>{% endif %}
            {% if !original_skills.is_empty() %}<h3>Original Skills (sample)</h3><pre>{{ original_skills }}</pre>{% endif %}
        </div>
        {% endif %}
        <div class="metadata">
            <p>Generated {{ generated_at }} by cv-tailor v{{ version }}</p>
        </div>
    </div>
</body>
</html>"#
)]
struct PackageHtml {
    include_styles: bool,
    styles: &'static str,
    job_title: String,
    company: String,
    artifacts: Vec<HtmlArtifact>,
    has_original: bool,
    original_summary: String,
    original_skills: String,
    generated_at: String,
    version: String,
}

struct HtmlDataset {
    name: String,
    row_count: usize,
    headers: Vec<String>,
    preview: Vec<Vec<String>>,
    describe: Vec<Vec<String>>,
}

struct HtmlJoin {
    left: String,
    right: String,
    columns: String,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Data Exploration Report</title>
    {% if include_styles %}<style>{{ styles|safe }}</style>{% endif %}
</head>
<body>
    <div class="container">
        <h1>🤖 Data Exploration Report</h1>
        {% for dataset in datasets %}
        <div class="section">
            <h2>Dataset: {{ dataset.name }} ({{ dataset.row_count }} rows)</h2>
            <table>
                <tr>{% for header in dataset.headers %}<th>{{ header }}</th>{% endfor %}</tr>
                {% for row in dataset.preview %}<tr>{% for cell in row %}<td>{{ cell }}</td>{% endfor %}</tr>
                {% endfor %}
            </table>
            <h3>Summary</h3>
            <table>
                <tr>{% for header in describe_headers %}<th>{{ header }}</th>{% endfor %}</tr>
                {% for row in dataset.describe %}<tr>{% for cell in row %}<td>{{ cell }}</td>{% endfor %}</tr>
                {% endfor %}
            </table>
        </div>
        {% endfor %}
        {% if !joins.is_empty() %}
        <div class="section">
            <h2>🔗 Suggested JOIN Relationships</h2>
            <ul>
            {% for join in joins %}<li><strong>{{ join.left }}</strong> ⟷ <strong>{{ join.right }}</strong> → Possible JOIN keys: <code>{{ join.columns }}</code></li>
            {% endfor %}
            </ul>
        </div>
        {% endif %}
        {% if has_suggestions %}
        <div class="section">
            <h2>💬 {{ question }}</h2>
            <h3>🧩 Suggested SQL Query</h3>
            <pre>{{ sql }}</pre>
            <h3>📊 Suggested DAX Measure</h3>
            <p>{{ dax }}</p>
            <h3>🪄 Chart Recommendation</h3>
            <p>{{ chart }}</p>
        </div>
        {% endif %}
        <div class="metadata">
            <p>Generated {{ generated_at }} by cv-tailor v{{ version }}</p>
        </div>
    </div>
</body>
</html>"#
)]
struct ExplorationHtml {
    include_styles: bool,
    styles: &'static str,
    datasets: Vec<HtmlDataset>,
    describe_headers: Vec<&'static str>,
    joins: Vec<HtmlJoin>,
    has_suggestions: bool,
    question: String,
    sql: String,
    dax: String,
    chart: String,
    generated_at: String,
    version: String,
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.4}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// One describe-table row; cells that do not apply to the column kind are empty
pub fn describe_row(summary: &ColumnSummary) -> Vec<String> {
    let mut row = vec![summary.name.clone(), summary.count.to_string()];
    match &summary.stats {
        ColumnStats::Numeric { mean, std, min, q25, median, q75, max } => {
            row.extend([String::new(), String::new(), String::new()]);
            row.push(format_number(*mean));
            row.push(std.map(format_number).unwrap_or_default());
            row.extend([min, q25, median, q75, max].iter().map(|v| format_number(**v)));
        }
        ColumnStats::Categorical { unique, top, freq } => {
            row.push(unique.to_string());
            row.push(top.clone().unwrap_or_default());
            row.push(freq.to_string());
            row.extend(std::iter::repeat(String::new()).take(7));
        }
    }
    row
}

/// Fixed-width text table
fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: &[String]| -> String {
        widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!("{:<width$}", cell, width = *width)
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render_row(headers)];
    lines.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));
    lines.extend(rows.iter().map(|row| render_row(row)));
    lines.join("\n")
}

fn markdown_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let escape = |cell: &str| cell.replace('|', "\\|");
    let mut lines = vec![
        format!("| {} |", headers.iter().map(|h| escape(h)).collect::<Vec<_>>().join(" | ")),
        format!("|{}|", vec!["---"; headers.len()].join("|")),
    ];
    for row in rows {
        let cells: Vec<String> = (0..headers.len())
            .map(|i| escape(row.get(i).map(String::as_str).unwrap_or("")))
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }
    lines.join("\n")
}

fn describe_headers() -> Vec<String> {
    DESCRIBE_HEADERS.iter().map(|h| h.to_string()).collect()
}

fn join_columns(columns: &std::collections::BTreeSet<String>) -> String {
    columns.iter().cloned().collect::<Vec<_>>().join(", ")
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        match level {
            1 => {
                let line = "═".repeat(title.chars().count() + 4);
                if self.use_colors {
                    format!("{}\n  {}\n{}\n", line.bright_green(), title.bold().bright_white(), line.bright_green())
                } else {
                    format!("{}\n  {}\n{}\n", line, title, line)
                }
            }
            _ => {
                if self.use_colors {
                    format!("\n{}\n", title.bold().green())
                } else {
                    format!("\n{}\n", title)
                }
            }
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_package(&self, package: &ApplicationPackage) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.format_header(
            &format!("🎯 Tailored content for {} at {}", package.job_title, package.company),
            1,
        ));

        for artifact in package.artifacts() {
            output.push_str(&self.format_header(&artifact.title, 2));
            output.push_str(&self.colorize(&format!("({})", artifact.file_name), Color::BrightBlack));
            output.push_str("\n\n");
            output.push_str(&artifact.content);
            output.push('\n');
        }

        let original = &package.original_sections;
        if !original.is_empty() {
            output.push_str(&self.format_header("🔍 Original CV Content (for reference)", 2));
            if !original.summary.is_empty() {
                output.push_str(&self.colorize("Original Summary:", Color::Cyan));
                output.push('\n');
                output.push_str(&original.summary_preview());
                output.push('\n');
            }
            if !original.skills.is_empty() {
                output.push_str(&self.colorize("Original Skills (sample):", Color::Cyan));
                output.push('\n');
                output.push_str(&original.skills_preview());
                output.push('\n');
            }
        }

        Ok(output)
    }

    fn format_exploration(&self, report: &ExplorationReport) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.format_header("🤖 Data Exploration", 1));

        for dataset in &report.datasets {
            output.push_str(&self.format_header(
                &format!("Dataset: {} ({} rows)", dataset.name, dataset.row_count),
                2,
            ));
            output.push_str(&render_table(&dataset.headers, &dataset.preview));
            output.push_str("\n\n");
            output.push_str(&self.colorize("Summary:", Color::Cyan));
            output.push('\n');
            let rows: Vec<Vec<String>> = dataset.summary.iter().map(describe_row).collect();
            output.push_str(&render_table(&describe_headers(), &rows));
            output.push('\n');
        }

        if !report.join_keys.is_empty() {
            output.push_str(&self.format_header("🔗 Suggested JOIN Relationships", 2));
            for candidate in &report.join_keys.candidates {
                output.push_str(&format!(
                    "{} ⟷ {} → Possible JOIN keys: {}\n",
                    self.colorize(&candidate.left, Color::Yellow),
                    self.colorize(&candidate.right, Color::Yellow),
                    join_columns(&candidate.columns)
                ));
            }
        }

        if let Some(suggestions) = &report.suggestions {
            output.push_str(&self.format_header("🧩 Suggested SQL Query", 2));
            output.push_str(&self.colorize(&suggestions.sql, Color::BrightBlue));
            output.push('\n');
            output.push_str(&self.format_header("📊 Suggested DAX Measure", 2));
            output.push_str(&suggestions.dax);
            output.push('\n');
            output.push_str(&self.format_header("🪄 Chart Recommendation", 2));
            output.push_str(&suggestions.chart);
            output.push('\n');
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_package(&self, package: &ApplicationPackage) -> Result<String> {
        self.to_json(package)
    }

    fn format_exploration(&self, report: &ExplorationReport) -> Result<String> {
        self.to_json(report)
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn metadata_line(&self, metadata: &ReportMetadata) -> String {
        if !self.include_metadata {
            return String::new();
        }
        format!(
            "**Generated:** {} | **Sources:** {}\n\n",
            metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            metadata
                .sources
                .iter()
                .map(|s| format!("`{}`", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_package(&self, package: &ApplicationPackage) -> Result<String> {
        let mut output = format!("# 🎯 {} at {}\n\n", package.job_title, package.company);
        output.push_str(&self.metadata_line(&package.metadata));

        for artifact in package.artifacts() {
            output.push_str(&format!("## {}\n\n", artifact.title));
            output.push_str(&format!("_File: `{}`_\n\n", artifact.file_name));
            output.push_str(&format!("```text\n{}\n```\n\n", artifact.content));
        }

        let original = &package.original_sections;
        if !original.is_empty() {
            output.push_str("## 🔍 Original CV Content\n\n");
            if !original.summary.is_empty() {
                output.push_str(&format!("**Original Summary:** {}\n\n", original.summary_preview()));
            }
            if !original.skills.is_empty() {
                output.push_str("**Original Skills (sample):**\n\n");
                for skill in original.skills.iter().take(5) {
                    output.push_str(&format!("- {}\n", skill));
                }
                output.push('\n');
            }
        }

        Ok(output)
    }

    fn format_exploration(&self, report: &ExplorationReport) -> Result<String> {
        let mut output = String::from("# 🤖 Data Exploration Report\n\n");
        output.push_str(&self.metadata_line(&report.metadata));

        for dataset in &report.datasets {
            output.push_str(&format!("## Dataset: {} ({} rows)\n\n", dataset.name, dataset.row_count));
            output.push_str(&markdown_table(&dataset.headers, &dataset.preview));
            output.push_str("\n\n**Summary:**\n\n");
            let rows: Vec<Vec<String>> = dataset.summary.iter().map(describe_row).collect();
            output.push_str(&markdown_table(&describe_headers(), &rows));
            output.push_str("\n\n");
        }

        if !report.join_keys.is_empty() {
            output.push_str("## 🔗 Suggested JOIN Relationships\n\n");
            for candidate in &report.join_keys.candidates {
                output.push_str(&format!(
                    "- **{}** ⟷ **{}** → Possible JOIN keys: `{}`\n",
                    candidate.left,
                    candidate.right,
                    join_columns(&candidate.columns)
                ));
            }
            output.push('\n');
        }

        if let Some(suggestions) = &report.suggestions {
            output.push_str(&format!("## 💬 {}\n\n", suggestions.question));
            output.push_str(&format!("### 🧩 Suggested SQL Query\n\n```sql\n{}\n```\n\n", suggestions.sql));
            output.push_str(&format!("### 📊 Suggested DAX Measure\n\n{}\n\n", suggestions.dax));
            output.push_str(&format!("### 🪄 Chart Recommendation\n\n{}\n", suggestions.chart));
        }

        Ok(output)
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_package(&self, package: &ApplicationPackage) -> Result<String> {
        let template = PackageHtml {
            include_styles: self.include_styles,
            styles: HTML_STYLES,
            job_title: package.job_title.clone(),
            company: package.company.clone(),
            artifacts: package
                .artifacts()
                .into_iter()
                .map(|a| HtmlArtifact {
                    title: a.title.to_string(),
                    file_name: a.file_name.to_string(),
                    content: a.content,
                })
                .collect(),
            has_original: !package.original_sections.is_empty(),
            original_summary: package.original_sections.summary_preview(),
            original_skills: package.original_sections.skills_preview(),
            generated_at: package.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            version: package.metadata.tool_version.clone(),
        };

        template
            .render()
            .map_err(|e| CvTailorError::OutputFormatting(e.to_string()))
    }

    fn format_exploration(&self, report: &ExplorationReport) -> Result<String> {
        let suggestions = report.suggestions.clone();
        let template = ExplorationHtml {
            include_styles: self.include_styles,
            styles: HTML_STYLES,
            datasets: report
                .datasets
                .iter()
                .map(|d| HtmlDataset {
                    name: d.name.clone(),
                    row_count: d.row_count,
                    headers: d.headers.clone(),
                    preview: d.preview.clone(),
                    describe: d.summary.iter().map(describe_row).collect(),
                })
                .collect(),
            describe_headers: DESCRIBE_HEADERS.to_vec(),
            joins: report
                .join_keys
                .candidates
                .iter()
                .map(|c| HtmlJoin {
                    left: c.left.clone(),
                    right: c.right.clone(),
                    columns: join_columns(&c.columns),
                })
                .collect(),
            has_suggestions: suggestions.is_some(),
            question: suggestions.as_ref().map(|s| s.question.clone()).unwrap_or_default(),
            sql: suggestions.as_ref().map(|s| s.sql.clone()).unwrap_or_default(),
            dax: suggestions.as_ref().map(|s| s.dax.clone()).unwrap_or_default(),
            chart: suggestions.as_ref().map(|s| s.chart.clone()).unwrap_or_default(),
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            version: report.metadata.tool_version.clone(),
        };

        template
            .render()
            .map_err(|e| CvTailorError::OutputFormatting(e.to_string()))
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true, true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool, include_metadata: bool, include_html_styles: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    fn formatter(&self, format: &OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        }
    }

    pub fn render_package(&self, package: &ApplicationPackage, format: &OutputFormat) -> Result<String> {
        self.formatter(format).format_package(package)
    }

    pub fn render_exploration(&self, report: &ExplorationReport, format: &OutputFormat) -> Result<String> {
        self.formatter(format).format_exploration(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// Write the four artifacts into `dir` under their fixed names
pub fn save_artifacts(package: &ApplicationPackage, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for artifact in package.artifacts() {
        let path = dir.join(artifact.file_name);
        std::fs::write(&path, &artifact.content)?;
        info!("Saved {}", path.display());
        written.push(path);
    }
    Ok(written)
}

pub fn suggest_filename(format: &OutputFormat, base_name: &str, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}{}.md", base_name, timestamp_suffix),
        OutputFormat::Html => format!("{}{}.html", base_name, timestamp_suffix),
    }
}

/// Report file for `target`: a directory gets a timestamped name inside it
pub fn report_path(target: &Path, format: &OutputFormat, base_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(suggest_filename(format, base_name, true))
    } else {
        target.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::dataset::{Dataset, DatasetCollection};
    use crate::explorer::suggest::QuerySuggester;
    use crate::processing::tailor::{Tailor, TailoringRequest};

    fn package() -> ApplicationPackage {
        let request = TailoringRequest {
            cv_text: "Summary\nAnalyst <script>\nSkills\nSQL".into(),
            job_title: "Data Analyst".into(),
            company: "Acme & Co".into(),
            job_description: "SQL reporting with Power BI".into(),
        };
        ApplicationPackage::generate(&Tailor::new().unwrap(), &request, "cv.txt")
    }

    fn exploration() -> ExplorationReport {
        let datasets: DatasetCollection = vec![
            Dataset::from_csv("orders.csv", b"id,amount\n1,5\n2,7\n").unwrap(),
            Dataset::from_csv("customers.csv", b"id,name\n1,Ann\n").unwrap(),
        ]
        .into_iter()
        .collect();
        ExplorationReport::generate(&datasets, Some("average amount by customer"), &QuerySuggester::new().unwrap(), 5)
    }

    #[test]
    fn test_describe_row_layout() {
        let dataset = Dataset::from_csv("t.csv", b"n,c\n1,a\n2,a\n").unwrap();
        let summaries = dataset.describe();

        let numeric = describe_row(&summaries[0]);
        assert_eq!(numeric.len(), DESCRIBE_HEADERS.len());
        assert_eq!(numeric[5], "1.5");
        assert_eq!(numeric[7], "1");

        let categorical = describe_row(&summaries[1]);
        assert_eq!(categorical.len(), DESCRIBE_HEADERS.len());
        assert_eq!(&categorical[2..5], &["1".to_string(), "a".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_console_package_without_colors() {
        let output = ConsoleFormatter::new(false).format_package(&package()).unwrap();
        assert!(output.contains("Professional Summary"));
        assert!(output.contains("(cover_letter.txt)"));
        assert!(output.contains("ACME & CO"));
        assert!(output.contains("Original Summary:\nAnalyst <script>"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_console_exploration_lists_joins_and_suggestions() {
        let output = ConsoleFormatter::new(false).format_exploration(&exploration()).unwrap();
        assert!(output.contains("orders.csv ⟷ customers.csv → Possible JOIN keys: id"));
        assert!(output.contains("AVERAGE(Sales[Amount])"));
        assert!(output.contains("Bar Chart"));
        assert!(output.contains("id | amount"));
    }

    #[test]
    fn test_json_package_roundtrip() {
        let original = package();
        let json = JsonFormatter::new(false).format_package(&original).unwrap();
        let parsed: ApplicationPackage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.cover_letter, original.cover_letter);
    }

    #[test]
    fn test_markdown_exploration() {
        let output = MarkdownFormatter::new(false).format_exploration(&exploration()).unwrap();
        assert!(output.starts_with("# 🤖 Data Exploration Report\n\n## Dataset: orders.csv (2 rows)"));
        assert!(output.contains("```sql\n-- Auto-generated JOIN query"));
        assert!(output.contains("| id | amount |"));
    }

    #[test]
    fn test_html_escapes_content() {
        let output = HtmlFormatter::new(true).format_package(&package()).unwrap();
        assert!(output.contains("ACME &#38; CO"));
        assert!(output.contains("Analyst &#60;script&#62;"));
        assert!(!output.contains("<script>"));
        assert!(output.contains("<style>"));
    }

    #[test]
    fn test_html_exploration_renders_tables() {
        let output = HtmlFormatter::new(false).format_exploration(&exploration()).unwrap();
        assert!(output.contains("<th>amount</th>"));
        assert!(output.contains("Possible JOIN keys: <code>id</code>"));
        assert!(!output.contains("<style>"));
    }

    #[test]
    fn test_save_artifacts_writes_fixed_names() {
        let dir = tempfile::tempdir().unwrap();
        let written = save_artifacts(&package(), dir.path()).unwrap();

        assert_eq!(written.len(), 4);
        let letter = std::fs::read_to_string(dir.path().join("cover_letter.txt")).unwrap();
        assert!(letter.starts_with("ACME & CO\n"));
        assert!(dir.path().join("linkedin_message.txt").exists());
    }

    #[test]
    fn test_report_path_for_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();

        let inside = report_path(dir.path(), &OutputFormat::Json, "exploration_report");
        assert_eq!(inside.parent(), Some(dir.path()));
        let name = inside.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("exploration_report_") && name.ends_with(".json"));

        let file = dir.path().join("report.md");
        assert_eq!(report_path(&file, &OutputFormat::Markdown, "exploration_report"), file);
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(&OutputFormat::Markdown, "exploration", false), "exploration.md");
        assert!(suggest_filename(&OutputFormat::Html, "package", true).ends_with(".html"));
    }
}
