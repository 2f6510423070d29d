//! Data models for the campaign dashboard.
//!
//! This module contains the core data structures used throughout
//! the application for representing campaign records, aggregates
//! and report metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

/// Return on ad spend (revenue / payout).
///
/// A zero payout makes the ratio undefined; this is carried as a value
/// rather than a float NaN so ordering and rendering stay explicit.
/// Serialized as a JSON number, or `null` when undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Roas {
    Value(f64),
    Undefined,
}

impl Roas {
    /// Compute ROAS from summed revenue and payout.
    pub fn from_totals(revenue: f64, payout: f64) -> Self {
        if payout > 0.0 {
            Roas::Value(revenue / payout)
        } else {
            Roas::Undefined
        }
    }

    /// Returns the ratio, if defined.
    pub fn value(&self) -> Option<f64> {
        match self {
            Roas::Value(v) => Some(*v),
            Roas::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Roas::Undefined)
    }

    /// Ascending order with every undefined value after all defined ones.
    pub fn cmp_undefined_last(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Roas::Value(a), Roas::Value(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Roas::Value(_), Roas::Undefined) => Ordering::Less,
            (Roas::Undefined, Roas::Value(_)) => Ordering::Greater,
            (Roas::Undefined, Roas::Undefined) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Roas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Roas::Value(v) => write!(f, "{:.2}", v),
            Roas::Undefined => write!(f, "undefined"),
        }
    }
}

impl From<Option<f64>> for Roas {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Roas::Value(v),
            _ => Roas::Undefined,
        }
    }
}

impl From<Roas> for Option<f64> {
    fn from(roas: Roas) -> Self {
        roas.value()
    }
}

/// One row of the campaign table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub influencer_id: String,
    pub name: String,
    pub platform: String,
    pub product: String,
    pub category: String,
    pub gender: String,
    pub revenue: f64,
    pub orders: u64,
    pub total_payout: f64,
}

/// A categorical dimension the table can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Platform,
    Product,
    Category,
    Gender,
}

impl Dimension {
    /// All filterable dimensions in display order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Platform,
        Dimension::Product,
        Dimension::Category,
        Dimension::Gender,
    ];

    /// The record's value for this dimension.
    pub fn value_of<'a>(&self, record: &'a CampaignRecord) -> &'a str {
        match self {
            Dimension::Platform => &record.platform,
            Dimension::Product => &record.product,
            Dimension::Category => &record.category,
            Dimension::Gender => &record.gender,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Platform => write!(f, "Platform"),
            Dimension::Product => write!(f, "Product"),
            Dimension::Category => write!(f, "Influencer Category"),
            Dimension::Gender => write!(f, "Gender"),
        }
    }
}

/// An influencer's summed revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluencerRevenue {
    pub influencer_id: String,
    pub name: String,
    pub revenue: f64,
}

/// An influencer's summed revenue, payout and orders with the resulting ROAS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluencerRoas {
    pub influencer_id: String,
    pub name: String,
    pub revenue: f64,
    pub total_payout: f64,
    pub orders: u64,
    pub roas: Roas,
}

/// Revenue summed per platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRevenue {
    pub platform: String,
    pub revenue: f64,
}

/// Row count per influencer category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    /// Percentage of filtered rows in this category (0-100).
    pub share_percent: f64,
}

/// Aggregates computed from a filtered table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_revenue: f64,
    pub total_orders: u64,
    pub total_payout: f64,
    pub roas: Roas,
    pub top_influencers_by_revenue: Vec<InfluencerRevenue>,
    pub bottom_influencers_by_roas: Vec<InfluencerRoas>,
    pub revenue_by_platform: Vec<PlatformRevenue>,
    pub category_distribution: Vec<CategoryShare>,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            total_revenue: 0.0,
            total_orders: 0,
            total_payout: 0.0,
            roas: Roas::Undefined,
            top_influencers_by_revenue: Vec::new(),
            bottom_influencers_by_roas: Vec::new(),
            revenue_by_platform: Vec::new(),
            category_distribution: Vec::new(),
        }
    }
}

/// Where the session's table came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum DataSource {
    /// File supplied explicitly by the user.
    Upload(PathBuf),
    /// Fallback default file.
    Default(PathBuf),
}

impl DataSource {
    pub fn path(&self) -> &std::path::Path {
        match self {
            DataSource::Upload(p) | DataSource::Default(p) => p,
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Upload(p) => write!(f, "{}", p.display()),
            DataSource::Default(p) => write!(f, "{} (default file)", p.display()),
        }
    }
}

/// An exported CSV artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportInfo {
    pub path: PathBuf,
    pub mime_type: String,
    pub rows: usize,
}

/// Metadata about the dashboard report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Input the table was loaded from.
    pub source: DataSource,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Rows in the cleaned table.
    pub rows_cleaned: usize,
    /// Rows after filtering.
    pub rows_filtered: usize,
    /// Filtered CSV written alongside the report, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportInfo>,
}
