//! Dashboard report generation.
//!
//! This module renders a [`DashboardView`] as a Markdown dashboard or
//! as JSON.

use crate::config::ReportConfig;
use crate::data::TablePreview;
use crate::models::{
    CategoryShare, Dimension, InfluencerRevenue, InfluencerRoas, PlatformRevenue, ReportMetadata,
    Summary,
};
use crate::report::format::{bar, format_amount, format_currency, format_percent, table_cell};
use crate::session::DashboardView;
use anyhow::Result;
use serde::Serialize;

/// Fixed insights shown at the end of the dashboard.
pub const INSIGHTS: [&str; 5] = [
    "**Top Influencers:** See the revenue ranking for those driving the most revenue.",
    "**Poor ROI:** Influencers with the lowest ROAS are listed for review.",
    "**Platform Performance:** The platform chart shows which platforms are most effective.",
    "**Category Distribution:** The category breakdown shows the influencer type mix.",
    "**Use filters** to drill down by brand, platform, or persona.",
];

/// The complete dashboard report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Metadata about the report.
    pub metadata: ReportMetadata,
    /// Filtered aggregates and the raw preview.
    #[serde(flatten)]
    pub view: DashboardView,
    /// Static insights text.
    pub insights: Vec<String>,
}

impl Report {
    pub fn new(metadata: ReportMetadata, view: DashboardView) -> Self {
        Self {
            metadata,
            view,
            insights: INSIGHTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Generate a complete Markdown dashboard.
pub fn generate_markdown_report(report: &Report, settings: &ReportConfig) -> String {
    let mut output = String::new();
    let summary = &report.view.summary;

    // Title
    output.push_str("# Influencer Marketing ROI Dashboard\n\n");
    output.push_str("Track, analyze, and optimize your influencer campaigns.\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_filters_section(report));
    output.push_str(&generate_metrics_section(summary));
    output.push_str(&generate_top_revenue_section(
        &summary.top_influencers_by_revenue,
        settings.top_n,
    ));
    output.push_str(&generate_bottom_roas_section(
        &summary.bottom_influencers_by_roas,
        settings.top_n,
    ));
    output.push_str(&generate_platform_section(
        &summary.revenue_by_platform,
        settings.bar_width,
    ));
    output.push_str(&generate_category_section(&summary.category_distribution));

    if settings.include_preview {
        output.push_str(&generate_preview_section(&report.view.preview));
    }
    if settings.include_insights {
        output.push_str(&generate_insights_section(&report.insights));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Data Source:** `{}`\n", metadata.source));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Rows (cleaned):** {}\n", metadata.rows_cleaned));
    section.push_str(&format!(
        "- **Rows (filtered):** {}\n",
        metadata.rows_filtered
    ));
    if let Some(ref export) = metadata.export {
        section.push_str(&format!(
            "- **Filtered Data Export:** `{}` ({}, {} rows)\n",
            export.path.display(),
            export.mime_type,
            export.rows
        ));
    }
    section.push('\n');

    section
}

/// Generate the active filters section.
fn generate_filters_section(report: &Report) -> String {
    let mut section = String::new();

    section.push_str("## Filters\n\n");
    for dimension in Dimension::ALL {
        let values = report.view.selection.values(dimension);
        let shown = if values.is_empty() {
            "*(none selected)*".to_string()
        } else {
            values.iter().cloned().collect::<Vec<_>>().join(", ")
        };
        section.push_str(&format!("- **{}:** {}\n", dimension, shown));
    }
    section.push('\n');

    section
}

/// Generate the four metric cards.
fn generate_metrics_section(summary: &Summary) -> String {
    let mut section = String::new();

    section.push_str("## Campaign Performance Metrics\n\n");
    section.push_str("| Total Revenue | Total Orders | Total Payout | ROAS |\n");
    section.push_str("|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} |\n\n",
        format_currency(summary.total_revenue),
        summary.total_orders,
        format_currency(summary.total_payout),
        summary.roas
    ));

    section
}

/// Generate the top influencers by revenue table.
fn generate_top_revenue_section(top: &[InfluencerRevenue], n: usize) -> String {
    let mut section = String::new();

    section.push_str(&format!("## Top {} Influencers by Revenue\n\n", n));

    if top.is_empty() {
        section.push_str("No influencers match the current filters.\n\n");
        return section;
    }

    section.push_str("| Influencer ID | Name | Revenue |\n");
    section.push_str("|:---|:---|---:|\n");
    for entry in top {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            table_cell(&entry.influencer_id),
            table_cell(&entry.name),
            format_amount(entry.revenue)
        ));
    }
    section.push('\n');

    section
}

/// Generate the bottom influencers by ROAS table.
fn generate_bottom_roas_section(bottom: &[InfluencerRoas], n: usize) -> String {
    let mut section = String::new();

    section.push_str(&format!("## Bottom {} Influencers by ROAS\n\n", n));

    if bottom.is_empty() {
        section.push_str("No influencers with orders match the current filters.\n\n");
        return section;
    }

    section.push_str("| Influencer ID | Name | Revenue | Total Payout | ROAS |\n");
    section.push_str("|:---|:---|---:|---:|---:|\n");
    for entry in bottom {
        section.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            table_cell(&entry.influencer_id),
            table_cell(&entry.name),
            format_amount(entry.revenue),
            format_amount(entry.total_payout),
            entry.roas
        ));
    }
    section.push('\n');

    section
}

/// Generate the revenue by platform bar chart.
fn generate_platform_section(platforms: &[PlatformRevenue], width: usize) -> String {
    let mut section = String::new();

    section.push_str("## Revenue by Platform\n\n");

    if platforms.is_empty() {
        section.push_str("No revenue for the current filters.\n\n");
        return section;
    }

    let max = platforms.iter().map(|p| p.revenue).fold(0.0, f64::max);

    section.push_str("| Platform | Revenue | |\n");
    section.push_str("|:---|---:|:---|\n");
    for platform in platforms {
        section.push_str(&format!(
            "| {} | {} | `{}` |\n",
            table_cell(&platform.platform),
            format_currency(platform.revenue),
            bar(platform.revenue, max, width)
        ));
    }
    section.push('\n');

    section
}

/// Generate the category distribution breakdown.
fn generate_category_section(categories: &[CategoryShare]) -> String {
    let mut section = String::new();

    section.push_str("## Distribution by Influencer Category\n\n");

    if categories.is_empty() {
        section.push_str("No posts match the current filters.\n\n");
        return section;
    }

    section.push_str("| Category | Posts | Share |\n");
    section.push_str("|:---|:---:|---:|\n");
    for category in categories {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            table_cell(&category.category),
            category.count,
            format_percent(category.share_percent)
        ));
    }
    section.push('\n');

    section
}

fn markdown_row(cells: &[String]) -> String {
    cells
        .iter()
        .map(|c| table_cell(c))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Generate the collapsible raw data preview.
fn generate_preview_section(preview: &TablePreview) -> String {
    let mut section = String::new();

    section.push_str("<details>\n<summary>Preview Data</summary>\n\n");
    section.push_str(&format!("| {} |\n", markdown_row(&preview.columns)));
    section.push_str(&format!(
        "|{}\n",
        preview.columns.iter().map(|_| "---|").collect::<String>()
    ));
    for row in &preview.rows {
        section.push_str(&format!("| {} |\n", markdown_row(row)));
    }
    section.push_str("\n</details>\n\n");

    section
}

/// Generate the collapsible insights summary.
fn generate_insights_section(insights: &[String]) -> String {
    let mut section = String::new();

    section.push_str("<details>\n<summary>Insights Summary</summary>\n\n");
    for insight in insights {
        section.push_str(&format!("- {}\n", insight));
    }
    section.push_str("\n</details>\n\n");

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(&format!(
        "*Report generated by RoiDash v{}*\n",
        env!("CARGO_PKG_VERSION")
    ));

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
