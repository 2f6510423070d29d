//! Per-session dashboard state.
//!
//! A session owns the cleaned table for one input file. Each render
//! takes an explicit [`FilterSelection`] and returns a fresh
//! [`DashboardView`]; nothing in the session changes between renders.

use crate::analysis::{filter, summarize, FilterSelection};
use crate::config::FiltersConfig;
use crate::data::{self, CampaignTable, TablePreview};
use crate::error::PipelineResult;
use crate::models::{DataSource, Dimension, Summary};
use serde::Serialize;
use tracing::debug;

/// Number of raw rows shown in the preview by default.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Everything a presentation layer needs for one render.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// The selection this view was computed for.
    pub selection: FilterSelection,
    /// Aggregates over the filtered rows.
    pub summary: Summary,
    /// First rows of the cleaned, unfiltered table.
    pub preview: TablePreview,
    /// The filtered rows.
    #[serde(skip)]
    pub filtered: CampaignTable,
}

/// Options for rendering a view.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub top_n: usize,
    pub preview_rows: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            top_n: crate::analysis::DEFAULT_TOP_N,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

/// One loaded dataset.
#[derive(Debug, Clone)]
pub struct Session {
    source: DataSource,
    table: CampaignTable,
}

impl Session {
    /// Load and clean the source once.
    pub fn load(source: DataSource) -> PipelineResult<Self> {
        let raw = data::load(&source)?;
        let table = data::clean(raw)?;
        Ok(Self { source, table })
    }

    /// Build a session from an already cleaned table.
    #[cfg(test)]
    pub fn from_table(source: DataSource, table: CampaignTable) -> Self {
        Self { source, table }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// The cleaned, unfiltered table.
    pub fn table(&self) -> &CampaignTable {
        &self.table
    }

    /// Distinct values per dimension, as offered by the filter controls.
    pub fn options(&self) -> Vec<(Dimension, Vec<String>)> {
        Dimension::ALL
            .iter()
            .map(|d| (*d, self.table.distinct_values(*d)))
            .collect()
    }

    /// Default selection narrowed by any configured filters.
    pub fn selection(&self, filters: &FiltersConfig) -> FilterSelection {
        Dimension::ALL
            .iter()
            .fold(FilterSelection::all(&self.table), |selection, d| {
                match filters.get(*d) {
                    Some(values) => selection.with(*d, values),
                    None => selection,
                }
            })
    }

    /// Filter and summarize for one selection.
    pub fn run(&self, selection: &FilterSelection, options: RenderOptions) -> DashboardView {
        let filtered = filter(&self.table, selection);
        debug!(
            "Selection kept {} of {} rows",
            filtered.len(),
            self.table.len()
        );

        DashboardView {
            selection: selection.clone(),
            summary: summarize(&filtered, options.top_n),
            preview: self.table.preview(options.preview_rows),
            filtered,
        }
    }
}
