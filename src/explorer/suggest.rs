//! Canned SQL, DAX and chart suggestions for a plain-English question

use crate::error::Result;
use crate::explorer::dataset::{table_name, DatasetCollection};
use crate::explorer::relationships::JoinKeys;
use crate::processing::keywords::KeywordClassifier;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DaxMeasure {
    Average,
    Total,
    DistinctCount,
    Ratio,
}

impl DaxMeasure {
    pub fn suggestion(&self) -> &'static str {
        match self {
            DaxMeasure::Average => "DAX Suggestion: `Average Sales = AVERAGE(Sales[Amount])`",
            DaxMeasure::Total => "DAX Suggestion: `Total Sales = SUM(Sales[Amount])`",
            DaxMeasure::DistinctCount => "DAX Suggestion: `Customer Count = DISTINCTCOUNT(Customer[ID])`",
            DaxMeasure::Ratio => "DAX Suggestion: Try `Measure = SUM(Table[Metric]) / COUNT(Table[ID])`",
        }
    }
}

const DAX_MEASURES: &[(&str, DaxMeasure)] = &[
    ("average", DaxMeasure::Average),
    ("total", DaxMeasure::Total),
    ("sum", DaxMeasure::Total),
    ("count", DaxMeasure::DistinctCount),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Line,
    Bar,
    Histogram,
    Scatter,
    Summary,
}

impl ChartKind {
    pub fn recommendation(&self) -> &'static str {
        match self {
            ChartKind::Line => "📈 Recommended Chart: Line Chart (showing trends over time)",
            ChartKind::Bar => "📊 Recommended Chart: Bar Chart (compare categories)",
            ChartKind::Histogram => "📦 Recommended Chart: Histogram",
            ChartKind::Scatter => "🔗 Recommended Chart: Scatter Plot",
            ChartKind::Summary => "🧭 Recommended Chart: Summary Table or Pie Chart",
        }
    }
}

/// Time wording outranks comparison wording
const CHART_KINDS: &[(&str, ChartKind)] = &[
    ("trend", ChartKind::Line),
    ("over time", ChartKind::Line),
    ("date", ChartKind::Line),
    ("compare", ChartKind::Bar),
    ("by", ChartKind::Bar),
    ("distribution", ChartKind::Histogram),
    ("correlation", ChartKind::Scatter),
];

pub const SQL_PROMPT: &str = "Type a question above and upload data.";

/// Shape of the generated SQL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlShape {
    Prompt,
    SingleTable { table: String },
    Join { left: String, right: String, column: String },
}

pub struct QuerySuggester {
    dax: KeywordClassifier<DaxMeasure>,
    chart: KeywordClassifier<ChartKind>,
}

impl QuerySuggester {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dax: KeywordClassifier::new(DAX_MEASURES)?,
            chart: KeywordClassifier::new(CHART_KINDS)?,
        })
    }

    pub fn dax_measure(&self, question: &str) -> DaxMeasure {
        self.dax.first_match(question).unwrap_or(DaxMeasure::Ratio)
    }

    pub fn chart_kind(&self, question: &str) -> ChartKind {
        self.chart.first_match(question).unwrap_or(ChartKind::Summary)
    }

    pub fn suggest_dax(&self, question: &str) -> String {
        self.dax_measure(question).suggestion().to_string()
    }

    pub fn recommend_chart(&self, question: &str) -> String {
        self.chart_kind(question).recommendation().to_string()
    }

    pub fn sql_shape(&self, question: &str, datasets: &DatasetCollection, join_keys: &JoinKeys) -> SqlShape {
        if question.is_empty() || datasets.is_empty() {
            return SqlShape::Prompt;
        }

        if datasets.len() > 1 {
            let join = join_keys.first().and_then(|candidate| {
                candidate.join_column().map(|column| SqlShape::Join {
                    left: table_name(&candidate.left),
                    right: table_name(&candidate.right),
                    column: column.to_string(),
                })
            });
            if let Some(shape) = join {
                return shape;
            }
            debug!("No shared columns across {} datasets, using the first table", datasets.len());
        }

        match datasets.first() {
            Some(dataset) => SqlShape::SingleTable {
                table: dataset.table_name(),
            },
            None => SqlShape::Prompt,
        }
    }

    pub fn generate_sql(&self, question: &str, datasets: &DatasetCollection, join_keys: &JoinKeys) -> String {
        let shape = self.sql_shape(question, datasets, join_keys);
        let mut sql_parts: Vec<String> = Vec::new();

        match shape {
            SqlShape::Prompt => return SQL_PROMPT.to_string(),
            SqlShape::SingleTable { table } => {
                if datasets.len() > 1 {
                    sql_parts.push("-- No shared columns between uploaded tables".to_string());
                }
                sql_parts.push(format!("-- Single table query for {}", table));
                sql_parts.push("SELECT column1, column2, AVG(column3) AS avg_value".to_string());
                sql_parts.push(format!("FROM {}", table));
                sql_parts.push("WHERE date BETWEEN [start] AND [end]".to_string());
                sql_parts.push("GROUP BY column1, column2;".to_string());
            }
            SqlShape::Join { left, right, column } => {
                sql_parts.push("-- Auto-generated JOIN query".to_string());
                sql_parts.push("SELECT t1.columnA, t2.columnB, SUM(t1.metric) AS total_metric".to_string());
                sql_parts.push(format!("FROM {} t1", left));
                sql_parts.push(format!("JOIN {} t2 ON t1.{} = t2.{}", right, column, column));
                sql_parts.push("WHERE t1.date BETWEEN [start] AND [end]".to_string());
                sql_parts.push("GROUP BY t1.columnA, t2.columnB;".to_string());
            }
        }

        sql_parts.join("\n")
    }
}
