pub mod api;
pub mod cli;
pub mod collection;
pub mod error;
pub mod extraction;
pub mod output;
pub mod types;

pub use api::MetadataExtractor;
pub use cli::report::RunReport;
pub use collection::{summarize, ExtractorConfig, FolderResolver, ScanTypeAggregator, SummaryRow};
pub use error::{AdniMetaError, Result};
pub use output::{build_tables, write_report, Table};
pub use types::*;
