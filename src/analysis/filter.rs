//! Categorical filtering of the cleaned table.

use crate::data::{CampaignRow, CampaignTable};
use crate::models::{CampaignRecord, Dimension};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Allowed values per dimension.
///
/// Rows must match every dimension (AND); within a dimension any listed
/// value matches (OR). An empty set matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub platforms: BTreeSet<String>,
    pub products: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub genders: BTreeSet<String>,
}

impl FilterSelection {
    /// Select every distinct value present in the table.
    pub fn all(table: &CampaignTable) -> Self {
        let mut selection = Self::default();
        for dimension in Dimension::ALL {
            *selection.values_mut(dimension) = table.distinct_values(dimension).into_iter().collect();
        }
        selection
    }

    /// Replace the allowed values for one dimension.
    ///
    /// Values are trimmed and blank entries dropped, so passing only
    /// blanks yields an empty set.
    pub fn with<I, S>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        *self.values_mut(dimension) = values
            .into_iter()
            .map(|v| v.as_ref().trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        self
    }

    pub fn values(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Platform => &self.platforms,
            Dimension::Product => &self.products,
            Dimension::Category => &self.categories,
            Dimension::Gender => &self.genders,
        }
    }

    fn values_mut(&mut self, dimension: Dimension) -> &mut BTreeSet<String> {
        match dimension {
            Dimension::Platform => &mut self.platforms,
            Dimension::Product => &mut self.products,
            Dimension::Category => &mut self.categories,
            Dimension::Gender => &mut self.genders,
        }
    }

    /// Whether a record passes every dimension.
    pub fn matches(&self, record: &CampaignRecord) -> bool {
        Dimension::ALL
            .iter()
            .all(|d| self.values(*d).contains(d.value_of(record)))
    }
}

/// Restrict the table to rows matching the selection.
///
/// Row order is preserved; an empty result is valid.
pub fn filter(table: &CampaignTable, selection: &FilterSelection) -> CampaignTable {
    let rows: Vec<CampaignRow> = table
        .rows()
        .iter()
        .filter(|row| selection.matches(&row.record))
        .cloned()
        .collect();

    CampaignTable::new(table.columns().to_vec(), rows)
}
