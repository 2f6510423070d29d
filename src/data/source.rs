//! Input file resolution.

use crate::data::table::RawTable;
use crate::error::{PipelineError, PipelineResult};
use crate::models::DataSource;
use std::path::Path;
use tracing::info;

/// Pick the input: an explicitly supplied file wins, otherwise the
/// default file if it exists.
pub fn resolve_source(input: Option<&Path>, default_file: &Path) -> PipelineResult<DataSource> {
    if let Some(path) = input {
        return Ok(DataSource::Upload(path.to_path_buf()));
    }

    if default_file.is_file() {
        Ok(DataSource::Default(default_file.to_path_buf()))
    } else {
        Err(PipelineError::MissingInputFile {
            default_file: default_file.to_path_buf(),
        })
    }
}

/// Read and parse the resolved source.
pub fn load(source: &DataSource) -> PipelineResult<RawTable> {
    match source {
        DataSource::Upload(path) => info!("Loading data from {}", path.display()),
        DataSource::Default(path) => info!("Using default file: {}", path.display()),
    }
    RawTable::read(source.path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_input_wins() {
        let dir = TempDir::new().unwrap();
        let default_file = dir.path().join("default.csv");
        std::fs::write(&default_file, "a\n").unwrap();

        let source = resolve_source(Some(Path::new("mine.csv")), &default_file).unwrap();
        assert_eq!(source, DataSource::Upload("mine.csv".into()));
    }

    #[test]
    fn test_falls_back_to_default_file() {
        let dir = TempDir::new().unwrap();
        let default_file = dir.path().join("default.csv");
        std::fs::write(&default_file, "a\n").unwrap();

        let source = resolve_source(None, &default_file).unwrap();
        assert_eq!(source, DataSource::Default(default_file));
    }

    #[test]
    fn test_missing_input_file() {
        let dir = TempDir::new().unwrap();
        let default_file = dir.path().join("absent.csv");

        let err = resolve_source(None, &default_file).unwrap_err();
        assert!(matches!(err, PipelineError::MissingInputFile { .. }));
    }

    #[test]
    fn test_load_reads_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "x,y\n1,2\n").unwrap();

        let raw = load(&DataSource::Upload(path)).unwrap();
        assert_eq!(raw.headers, vec!["x", "y"]);
        assert_eq!(raw.rows.len(), 1);
    }
}
