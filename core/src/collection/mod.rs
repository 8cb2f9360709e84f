//! Folder discovery and per-scan-type aggregation
//!
//! Walks the configured metadata folders, builds one record per XML file
//! and groups the records by scan type for reporting.

mod aggregator;
mod config;
mod folders;
mod summary;

pub use aggregator::ScanTypeAggregator;
pub use config::{ExtractorConfig, RUN_CEILING_FACTOR};
pub use folders::{
    find_xml_folders, is_xml_file, list_xml_files, FolderResolution, FolderResolver,
    InvalidSelector, ADNI_SUBFOLDER, AUTO_DISCOVERY_FOLDERS, MAX_SUGGESTIONS, METAINFO_FOLDER,
};
pub use summary::{summarize, SummaryRow, SUMMARY_COLUMNS};
