//! CSV datasets and their descriptive statistics

use crate::error::{CvTailorError, Result};
use crate::input::InputManager;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Cell values read as missing, matching the usual CSV-to-dataframe defaults
pub const MISSING: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A named table of string cells, as uploaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    /// Non-missing cells
    pub count: usize,
    pub stats: ColumnStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnStats {
    Numeric {
        mean: f64,
        /// Sample standard deviation, absent below two values
        std: Option<f64>,
        min: f64,
        q25: f64,
        median: f64,
        q75: f64,
        max: f64,
    },
    Categorical {
        unique: usize,
        top: Option<String>,
        freq: usize,
    },
}

impl Dataset {
    /// Parse CSV bytes whose first record is the header row.
    ///
    /// Short rows are kept and read as missing trailing cells; a row longer
    /// than the header makes the file unreadable.
    pub fn from_csv(name: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let name = name.into();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| CvTailorError::DatasetUnreadable(format!("{}: {}", name, e)))?
            .iter()
            .map(str::to_string)
            .collect();

        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(CvTailorError::DatasetUnreadable(format!("{}: no columns to parse", name)));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| CvTailorError::DatasetUnreadable(format!("{}: {}", name, e)))?;
            if record.len() > headers.len() {
                return Err(CvTailorError::DatasetUnreadable(format!(
                    "{}: expected {} fields, saw {} on line {}",
                    name,
                    headers.len(),
                    record.len(),
                    record.position().map_or(0, |p| p.line())
                )));
            }
            rows.push(record.iter().map(str::to_string).collect());
        }

        debug!("Parsed {}: {} columns, {} rows", name, headers.len(), rows.len());
        Ok(Self { name, headers, rows })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Table name for SQL: the dataset name with every ".csv" removed
    pub fn table_name(&self) -> String {
        table_name(&self.name)
    }

    pub fn preview(&self, rows: usize) -> &[Vec<String>] {
        &self.rows[..rows.min(self.rows.len())]
    }

    /// Present values of one column, missing markers removed
    fn column(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter_map(move |row| row.get(index))
            .map(|cell| cell.trim())
            .filter(|cell| !MISSING.contains(cell))
    }

    /// Per-column statistics; numeric columns get moments and quantiles,
    /// everything else gets unique/top/freq
    pub fn describe(&self) -> Vec<ColumnSummary> {
        self.headers
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let cells: Vec<&str> = self.column(index).collect();
                let numbers: Option<Vec<f64>> = cells.iter().map(|cell| cell.parse::<f64>().ok()).collect();

                let stats = match numbers {
                    Some(values) if !values.is_empty() => numeric_stats(values),
                    _ => categorical_stats(&cells),
                };

                ColumnSummary {
                    name: name.clone(),
                    count: cells.len(),
                    stats,
                }
            })
            .collect()
    }
}

pub fn table_name(dataset_name: &str) -> String {
    dataset_name.replace(".csv", "")
}

fn numeric_stats(mut values: Vec<f64>) -> ColumnStats {
    values.sort_by(|a, b| a.total_cmp(b));
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = if values.len() > 1 {
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        Some(variance.sqrt())
    } else {
        None
    };

    ColumnStats::Numeric {
        mean,
        std,
        min: values[0],
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values[values.len() - 1],
    }
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}

fn categorical_stats(cells: &[&str]) -> ColumnStats {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for &cell in cells {
        let count = counts.entry(cell).or_insert(0);
        if *count == 0 {
            order.push(cell);
        }
        *count += 1;
    }

    // Ties resolve to the value seen first
    let mut top: Option<(&str, usize)> = None;
    for &value in &order {
        let count = counts[value];
        if top.map_or(true, |(_, best)| count > best) {
            top = Some((value, count));
        }
    }

    ColumnStats::Categorical {
        unique: order.len(),
        top: top.map(|(value, _)| value.to_string()),
        freq: top.map_or(0, |(_, count)| count),
    }
}

/// Uploaded datasets in upload order
#[derive(Debug, Clone, Default)]
pub struct DatasetCollection {
    datasets: Vec<Dataset>,
}

impl DatasetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dataset; a dataset with the same name is replaced in place
    pub fn insert(&mut self, dataset: Dataset) {
        match self.datasets.iter_mut().find(|d| d.name == dataset.name) {
            Some(existing) => *existing = dataset,
            None => self.datasets.push(dataset),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.name == name)
    }

    pub fn first(&self) -> Option<&Dataset> {
        self.datasets.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.iter()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl FromIterator<Dataset> for DatasetCollection {
    fn from_iter<I: IntoIterator<Item = Dataset>>(iter: I) -> Self {
        let mut collection = Self::new();
        for dataset in iter {
            collection.insert(dataset);
        }
        collection
    }
}

pub struct DatasetLoader;

impl DatasetLoader {
    pub async fn load(path: &Path) -> Result<Dataset> {
        let upload = InputManager::read_upload(path).await?;
        info!("Loading dataset: {}", upload.name);
        Dataset::from_csv(upload.name, &upload.bytes)
    }

    pub async fn load_all(paths: &[impl AsRef<Path>]) -> Result<DatasetCollection> {
        let mut collection = DatasetCollection::new();
        for path in paths {
            collection.insert(Self::load(path.as_ref()).await?);
        }
        Ok(collection)
    }
}
