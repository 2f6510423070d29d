//! Cleaning: null removal, column pruning, deduplication and typing.

use crate::data::table::{CampaignRow, CampaignTable, RawTable};
use crate::error::{PipelineError, PipelineResult};
use crate::models::CampaignRecord;
use std::collections::HashSet;
use tracing::{debug, info};

/// Column dropped during cleaning if present.
pub const DISCARDED_COLUMN: &str = "post_url";

/// Columns every campaign table must have.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "platform",
    "product",
    "category",
    "gender",
    "revenue",
    "orders",
    "total_payout",
    "influencer_id",
    "name",
];

/// Clean a raw table.
///
/// Rows with a missing value in any column are dropped (the discarded
/// column included), then the discarded column is removed. Remaining
/// cells are trimmed and typed into [`CampaignRecord`]s, and rows equal
/// by value are dropped keeping the first occurrence.
pub fn clean(raw: RawTable) -> PipelineResult<CampaignTable> {
    let total = raw.rows.len();
    let RawTable { mut headers, rows } = raw;

    // Keep the 1-based data row number for error messages
    let mut complete: Vec<(usize, Vec<String>)> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(i, row)| {
            row.into_iter()
                .map(|cell| cell.map(|text| text.trim().to_string()))
                .collect::<Option<Vec<String>>>()
                .map(|cells| (i + 1, cells))
        })
        .collect();
    let with_nulls = total - complete.len();

    if let Some(pos) = headers.iter().position(|h| h == DISCARDED_COLUMN) {
        headers.remove(pos);
        for (_, cells) in &mut complete {
            cells.remove(pos);
        }
        debug!("Dropped column '{}'", DISCARDED_COLUMN);
    }

    let layout = ColumnLayout::locate(&headers)?;
    let typed = complete
        .into_iter()
        .map(|(row_number, cells)| {
            let record = layout.record(row_number, &cells)?;
            Ok(CampaignRow { record, cells })
        })
        .collect::<PipelineResult<Vec<_>>>()?;

    let mut seen = HashSet::new();
    let rows: Vec<CampaignRow> = typed
        .into_iter()
        .filter(|row| seen.insert(row_key(&row.cells)))
        .collect();
    let duplicates = total - with_nulls - rows.len();

    info!(
        "Cleaned table: {} rows kept ({} with missing values, {} duplicates removed)",
        rows.len(),
        with_nulls,
        duplicates
    );

    Ok(CampaignTable::new(headers, rows))
}

/// A cell as compared for deduplication.
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey {
    /// Bit pattern of the parsed value, so `100` and `100.0` match.
    Number(u64),
    Text(String),
}

fn row_key(cells: &[String]) -> Vec<CellKey> {
    cells
        .iter()
        .map(|cell| match cell.parse::<f64>() {
            // Adding zero folds -0.0 into 0.0
            Ok(v) if v.is_finite() => CellKey::Number((v + 0.0).to_bits()),
            _ => CellKey::Text(cell.clone()),
        })
        .collect()
}

/// Positions of the required columns in the header row.
struct ColumnLayout {
    influencer_id: usize,
    name: usize,
    platform: usize,
    product: usize,
    category: usize,
    gender: usize,
    revenue: usize,
    orders: usize,
    total_payout: usize,
}

impl ColumnLayout {
    fn locate(headers: &[String]) -> PipelineResult<Self> {
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|c| !headers.iter().any(|h| h == *c))
        {
            return Err(PipelineError::MissingColumn {
                column: missing.to_string(),
            });
        }

        let index = |column: &str| headers.iter().position(|h| h == column).unwrap_or(0);

        Ok(Self {
            influencer_id: index("influencer_id"),
            name: index("name"),
            platform: index("platform"),
            product: index("product"),
            category: index("category"),
            gender: index("gender"),
            revenue: index("revenue"),
            orders: index("orders"),
            total_payout: index("total_payout"),
        })
    }

    fn record(&self, row: usize, cells: &[String]) -> PipelineResult<CampaignRecord> {
        let invalid = |column: &str, value: &str| PipelineError::InvalidValue {
            row,
            column: column.to_string(),
            value: value.to_string(),
        };

        let revenue_text = &cells[self.revenue];
        let orders_text = &cells[self.orders];
        let payout_text = &cells[self.total_payout];

        Ok(CampaignRecord {
            influencer_id: cells[self.influencer_id].clone(),
            name: cells[self.name].clone(),
            platform: cells[self.platform].clone(),
            product: cells[self.product].clone(),
            category: cells[self.category].clone(),
            gender: cells[self.gender].clone(),
            revenue: parse_amount(revenue_text).ok_or_else(|| invalid("revenue", revenue_text))?,
            orders: parse_count(orders_text).ok_or_else(|| invalid("orders", orders_text))?,
            total_payout: parse_amount(payout_text)
                .ok_or_else(|| invalid("total_payout", payout_text))?,
        })
    }
}

/// Parse a non-negative decimal amount.
fn parse_amount(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Parse a non-negative whole number; `12` and `12.0` are both accepted.
fn parse_count(text: &str) -> Option<u64> {
    let trimmed = text.trim();
    trimmed.parse::<u64>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= u64::MAX as f64)
            .map(|v| v as u64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const SAMPLE: &str = include_str!("../../fixtures/sample_campaigns.csv");
    const HEADER: &str =
        "influencer_id,name,platform,product,category,gender,revenue,orders,total_payout";

    fn parse(text: &str) -> RawTable {
        RawTable::parse(text, Path::new("test.csv")).unwrap()
    }

    #[test]
    fn test_clean_sample() {
        let table = clean(parse(SAMPLE)).unwrap();

        // 10 rows: one duplicate, one missing product, one NA post_url
        assert_eq!(table.len(), 7);
        assert!(!table.columns().iter().any(|c| c == DISCARDED_COLUMN));
        assert_eq!(table.columns().len(), 10);
    }

    #[test]
    fn test_clean_has_no_nulls_or_duplicates() {
        let table = clean(parse(SAMPLE)).unwrap();

        let mut seen = HashSet::new();
        for row in table.rows() {
            assert_eq!(row.cells.len(), table.columns().len());
            assert!(row.cells.iter().all(|c| !crate::data::table::is_null_cell(c)));
            assert!(seen.insert(row.cells.clone()), "duplicate row survived");
        }
    }

    #[test]
    fn test_rows_differing_only_in_id_survive() {
        let text = format!(
            "{}\nA1,Zoe,Instagram,Gritzo,Fitness,Female,100,2,50\nA2,Zoe,Instagram,Gritzo,Fitness,Female,100,2,50\n",
            HEADER
        );
        let table = clean(parse(&text)).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_rows_differing_only_in_post_url_are_deduplicated() {
        let text = format!(
            "{},post_url\nA1,Zoe,Instagram,Gritzo,Fitness,Female,100,2,50,u1\nA1,Zoe,Instagram,Gritzo,Fitness,Female,100,2,50,u2\n",
            HEADER
        );
        let table = clean(parse(&text)).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].record.influencer_id, "A1");
    }

    #[test]
    fn test_rows_equal_by_value_are_deduplicated() {
        let text = format!(
            "{}\nA1,Zoe,Instagram,Gritzo,Fitness,Female,100,2,50\nA1,Zoe,Instagram,Gritzo,Fitness,Female,100.0,2,50.00\nA1,Zoe,Instagram,Gritzo,Fitness,Female,100.5,2,50\n",
            HEADER
        );
        let table = clean(parse(&text)).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].cells[6], "100");
        assert_eq!(table.rows()[1].record.revenue, 100.5);
    }

    #[test]
    fn test_cells_are_trimmed() {
        let text = format!(
            "{}\nA1, Zoe, Instagram, Gritzo, Fitness, Female, 100, 2, 50\nA1,Zoe,Instagram,Gritzo,Fitness,Female,100,2,50\n",
            HEADER
        );
        let table = clean(parse(&text)).unwrap();

        assert_eq!(table.len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.record.name, "Zoe");
        assert_eq!(row.record.platform, "Instagram");
        assert_eq!(row.cells[2], "Instagram");
    }

    #[test]
    fn test_missing_column() {
        let text = "influencer_id,name,platform,product,category,revenue,orders,total_payout\n\
                    A1,Zoe,Instagram,Gritzo,Fitness,100,2,50\n";
        let err = clean(parse(text)).unwrap_err();
        match err {
            PipelineError::MissingColumn { column } => assert_eq!(column, "gender"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_column_on_empty_table() {
        let err = clean(parse("influencer_id,name\n")).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn { .. }));
    }

    #[test]
    fn test_invalid_numeric_value() {
        let text = format!(
            "{}\nA1,Zoe,Instagram,Gritzo,Fitness,Female,100,2,50\nA2,Max,Instagram,Gritzo,Fitness,Male,lots,2,50\n",
            HEADER
        );
        let err = clean(parse(&text)).unwrap_err();
        match err {
            PipelineError::InvalidValue { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "revenue");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_negative_values_rejected() {
        let text = format!("{}\nA1,Zoe,Instagram,Gritzo,Fitness,Female,100,-2,50\n", HEADER);
        assert!(matches!(
            clean(parse(&text)).unwrap_err(),
            PipelineError::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_parse_count_accepts_whole_floats() {
        assert_eq!(parse_count("12"), Some(12));
        assert_eq!(parse_count("12.0"), Some(12));
        assert_eq!(parse_count(" 7 "), Some(7));
        assert_eq!(parse_count("12.5"), None);
        assert_eq!(parse_count("-1"), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("5400.50"), Some(5400.5));
        assert_eq!(parse_amount("0"), Some(0.0));
        assert_eq!(parse_amount("-3"), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn test_typed_records() {
        let table = clean(parse(SAMPLE)).unwrap();
        let first = &table.rows()[0].record;
        assert_eq!(first.influencer_id, "INF001");
        assert_eq!(first.platform, "Instagram");
        assert_eq!(first.revenue, 5400.5);
        assert_eq!(first.orders, 45);
        assert_eq!(first.total_payout, 1200.0);
    }
}
