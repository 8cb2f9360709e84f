//! Tabular report output
//!
//! Flattens aggregated records into one table per scan type plus a summary
//! table, and writes them as sheets of an xlsx workbook.

pub mod table;
pub mod workbook;

pub use table::{build_tables, Table, SUMMARY_SHEET};
pub use workbook::{sheet_name, write_report, write_tables, MAX_SHEET_NAME_LEN};
