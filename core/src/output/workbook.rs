use crate::collection::ScanTypeAggregator;
use crate::error::{AdniMetaError, Result};
use crate::output::table::{build_tables, Table};
use crate::types::{FieldValue, ABSENT_MARKER};
use log::info;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::fs;
use std::path::Path;

/// Excel's limit on sheet name length
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Truncates a table name to a valid sheet name
pub fn sheet_name(name: &str) -> String {
    name.chars().take(MAX_SHEET_NAME_LEN).collect()
}

/// Writes the per-scan-type sheets and the summary sheet to `path`
///
/// The workbook is assembled in memory and written in one step, so no
/// file is created when there is no data or assembly fails.
///
/// # Errors
///
/// Returns [`AdniMetaError::NoData`] if nothing was extracted, or a
/// workbook/I/O error if the output cannot be produced.
pub fn write_report(path: &Path, aggregator: &ScanTypeAggregator) -> Result<()> {
    info!("Creating detailed Excel file: {}", path.display());

    if aggregator.is_empty() {
        return Err(AdniMetaError::NoData);
    }

    write_tables(path, &build_tables(aggregator))?;

    info!("Detailed Excel file created: {}", path.display());
    Ok(())
}

/// Writes each table to its own sheet
pub fn write_tables(path: &Path, tables: &[Table]) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    for table in tables {
        let name = sheet_name(&table.name);
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&name)?;
        write_table(worksheet, table, &header)?;
        info!("Sheet '{}' created: {} rows", name, table.rows.len());
    }

    let buffer = workbook.save_to_buffer()?;
    fs::write(path, buffer)?;
    Ok(())
}

fn write_table(worksheet: &mut Worksheet, table: &Table, header: &Format) -> Result<()> {
    for (col, column) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, column.as_str(), header)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = row_idx as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            let col = col as u16;
            match value {
                FieldValue::Text(s) => worksheet.write_string(row_num, col, s.as_str())?,
                FieldValue::Float(v) => worksheet.write_number(row_num, col, *v)?,
                FieldValue::Int(v) => worksheet.write_number(row_num, col, *v as f64)?,
                FieldValue::Absent => worksheet.write_string(row_num, col, ABSENT_MARKER)?,
            };
        }
    }

    Ok(())
}
