//! CSV export of the filtered table.

use crate::data::CampaignTable;
use crate::error::{PipelineError, PipelineResult};
use crate::models::ExportInfo;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// MIME type of the exported file.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Write the filtered table to `path`: every retained column, no index.
pub fn export_csv(table: &CampaignTable, path: &Path) -> PipelineResult<ExportInfo> {
    let file = File::create(path)?;
    table.write_csv(file).map_err(|source| PipelineError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Exported {} rows to {}", table.len(), path.display());

    Ok(ExportInfo {
        path: path.to_path_buf(),
        mime_type: CSV_MIME_TYPE.to_string(),
        rows: table.len(),
    })
}
