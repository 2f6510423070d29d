//! Raw and cleaned table representations.

use crate::error::{PipelineError, PipelineResult};
use crate::models::{CampaignRecord, Dimension};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Cell markers read as missing values.
const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns true if the cell text denotes a missing value.
pub fn is_null_cell(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || NA_MARKERS.contains(&trimmed)
}

/// A parsed CSV before cleaning.
///
/// Cells are `None` where the input had a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Read and parse a CSV file.
    pub fn read(path: &Path) -> PipelineResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, path)
    }

    /// Parse CSV text. `origin` is only used in error messages.
    pub fn parse(text: &str, origin: &Path) -> PipelineResult<Self> {
        // Strip UTF-8 BOM if present
        let text = text.trim_start_matches('\u{FEFF}');

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let to_pipeline_err = |source: csv::Error| PipelineError::Csv {
            path: origin.to_path_buf(),
            source,
        };

        let headers: Vec<String> = reader
            .headers()
            .map_err(to_pipeline_err)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(to_pipeline_err)?;

            if record.len() > headers.len() {
                return Err(PipelineError::RaggedRow {
                    row: index + 1,
                    expected: headers.len(),
                    found: record.len(),
                });
            }

            // Short records are padded with missing values
            let mut row: Vec<Option<String>> = record
                .iter()
                .map(|cell| (!is_null_cell(cell)).then(|| cell.to_string()))
                .collect();
            row.resize(headers.len(), None);
            rows.push(row);
        }

        debug!(
            "Parsed {} rows x {} columns from {}",
            rows.len(),
            headers.len(),
            origin.display()
        );

        Ok(Self { headers, rows })
    }
}

/// A cleaned row: the typed record plus the original cell text of every
/// retained column, kept for preview and export.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignRow {
    pub record: CampaignRecord,
    pub cells: Vec<String>,
}

/// The cleaned (or filtered) campaign table.
///
/// Rows are never mutated once built; filtering yields a new table.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignTable {
    columns: Vec<String>,
    rows: Vec<CampaignRow>,
}

/// First rows of a table as display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CampaignTable {
    pub(crate) fn new(columns: Vec<String>, rows: Vec<CampaignRow>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[CampaignRow] {
        &self.rows
    }

    pub fn records(&self) -> impl Iterator<Item = &CampaignRecord> {
        self.rows.iter().map(|r| &r.record)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct values of a dimension in first-appearance order.
    pub fn distinct_values(&self, dimension: Dimension) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records()
            .map(|r| dimension.value_of(r))
            .filter(|v| seen.insert(*v))
            .map(String::from)
            .collect()
    }

    /// The first `n` rows as display text.
    pub fn preview(&self, n: usize) -> TablePreview {
        TablePreview {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).map(|r| r.cells.clone()).collect(),
        }
    }

    /// Write the table as CSV: header row, then every row, no index column.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.columns)?;
        for row in &self.rows {
            csv_writer.write_record(&row.cells)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
