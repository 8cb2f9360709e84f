use crate::collection::{summarize, ScanTypeAggregator, SUMMARY_COLUMNS};
use crate::types::{FieldValue, MetadataRecord, ScanType, ALWAYS_REPORTED, FIELD_NAMES};

/// Name of the cross-type summary sheet
pub const SUMMARY_SHEET: &str = "scan_type_summary";

/// A flat table destined for one workbook sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<FieldValue>>,
}

impl Table {
    /// Builds the table for one scan type
    ///
    /// Columns are the always-reported fields plus every optional field
    /// present in at least one record, in canonical field order.
    pub fn for_scan_type(scan_type: ScanType, records: &[MetadataRecord]) -> Self {
        let flattened: Vec<Vec<(&'static str, FieldValue)>> =
            records.iter().map(MetadataRecord::fields).collect();

        let included: Vec<usize> = FIELD_NAMES
            .iter()
            .enumerate()
            .filter(|(i, name)| {
                ALWAYS_REPORTED.contains(*name)
                    || flattened.iter().any(|fields| !fields[*i].1.is_absent())
            })
            .map(|(i, _)| i)
            .collect();

        let columns: Vec<String> = included
            .iter()
            .map(|&i| FIELD_NAMES[i].to_string())
            .collect();
        let rows: Vec<Vec<FieldValue>> = flattened
            .into_iter()
            .map(|fields| included.iter().map(|&i| fields[i].1.clone()).collect())
            .collect();

        Self {
            name: scan_type.to_string(),
            columns,
            rows,
        }
    }

    /// Builds the summary table
    pub fn summary(aggregator: &ScanTypeAggregator) -> Self {
        Self {
            name: SUMMARY_SHEET.to_string(),
            columns: SUMMARY_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: summarize(aggregator).iter().map(|row| row.cells()).collect(),
        }
    }

    /// Cell at `row` under `column`, if both exist
    pub fn cell(&self, row: usize, column: &str) -> Option<&FieldValue> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

/// Builds one table per non-empty scan type, then the summary table
pub fn build_tables(aggregator: &ScanTypeAggregator) -> Vec<Table> {
    let mut tables: Vec<Table> = aggregator
        .buckets()
        .filter(|(_, records)| !records.is_empty())
        .map(|(scan_type, records)| Table::for_scan_type(scan_type, records))
        .collect();
    tables.push(Table::summary(aggregator));
    tables
}
