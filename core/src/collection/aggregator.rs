use crate::api::MetadataExtractor;
use crate::collection::config::ExtractorConfig;
use crate::collection::folders::{list_xml_files, FolderResolver};
use crate::error::{AdniMetaError, Result};
use crate::extraction::classify_scan_type;
use crate::types::{MetadataRecord, ScanType};
use log::{error, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Progress is logged every this many processed files
const PROGRESS_INTERVAL: usize = 100;

/// Groups metadata records by scan type over one run
///
/// Records are kept in discovery order within each scan type, and scan
/// types in the order they were first seen. Caps are enforced before a
/// file is parsed: a file whose scan type is full is never read.
#[derive(Debug, Default)]
pub struct ScanTypeAggregator {
    max_files_per_type: Option<usize>,
    run_ceiling: Option<usize>,
    order: Vec<ScanType>,
    buckets: HashMap<ScanType, Vec<MetadataRecord>>,
    processed: usize,
    failed: usize,
}

impl ScanTypeAggregator {
    /// Creates an aggregator with the caps from `config`
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            max_files_per_type: config.max_files_per_type,
            run_ceiling: config.run_ceiling(),
            ..Self::default()
        }
    }

    /// Resolves the configured folders and processes every XML file in them
    ///
    /// # Errors
    ///
    /// Returns [`AdniMetaError::FolderNotFound`] when explicit selectors were
    /// given and none of them resolved. Per-file and per-folder problems are
    /// logged and skipped.
    pub fn run(&mut self, config: &ExtractorConfig) -> Result<()> {
        info!("Starting ADNI metadata detailed analysis");
        match self.max_files_per_type {
            None => info!("File limit: Unlimited"),
            Some(max) => info!("Maximum files per scan type: {}", max),
        }

        let resolver = FolderResolver::new(&config.base_path);
        let folders = if config.folders.is_empty() {
            resolver.auto_discover()
        } else {
            let resolution = resolver.resolve_selectors(&config.folders);
            if resolution.folders.is_empty() {
                error!("No valid folders to process!");
                return Err(AdniMetaError::FolderNotFound(config.folders.join(", ")));
            }
            resolution.folders
        };

        self.process_folders(&folders);
        self.log_totals();
        Ok(())
    }

    /// Processes folders in order until the run ceiling is reached
    pub fn process_folders(&mut self, folders: &[PathBuf]) {
        for folder in folders {
            if self.ceiling_reached() {
                info!("Maximum processing files reached: {}", self.processed);
                break;
            }
            self.process_folder(folder);
        }
    }

    /// Processes the XML files directly inside `folder`
    pub fn process_folder(&mut self, folder: &Path) {
        if !folder.exists() {
            warn!("Folder does not exist: {}", folder.display());
            return;
        }

        info!("Processing folder: {}", folder.display());

        let xml_files = match list_xml_files(folder) {
            Ok(files) => files,
            Err(e) => {
                warn!("Failed to read folder {}: {}", folder.display(), e);
                return;
            }
        };
        info!("XML files found: {}", xml_files.len());

        for xml_file in xml_files {
            if self.ceiling_reached() {
                info!("Maximum processing files reached: {}", self.processed);
                break;
            }

            let scan_type = classify_scan_type(&xml_file);
            if self.type_is_full(scan_type) {
                continue;
            }

            match MetadataExtractor::from_file(&xml_file) {
                Ok(record) => {
                    self.insert(record);
                    if self.processed % PROGRESS_INTERVAL == 0 {
                        info!("Processing completed: {} files", self.processed);
                    }
                }
                Err(e) => {
                    error!("XML parsing error ({}): {}", xml_file.display(), e);
                    self.failed += 1;
                }
            }
        }
    }

    /// Appends a built record to its scan type's bucket
    pub fn insert(&mut self, record: MetadataRecord) {
        let scan_type = record.scan_type;
        if !self.buckets.contains_key(&scan_type) {
            self.order.push(scan_type);
        }
        self.buckets.entry(scan_type).or_default().push(record);
        self.processed += 1;
    }

    fn ceiling_reached(&self) -> bool {
        self.run_ceiling
            .map(|ceiling| self.processed >= ceiling)
            .unwrap_or(false)
    }

    fn type_is_full(&self, scan_type: ScanType) -> bool {
        self.max_files_per_type
            .map(|max| self.count(scan_type) >= max)
            .unwrap_or(false)
    }

    fn log_totals(&self) {
        info!("Total processed files: {}", self.processed);
        info!("Scan types found: {:?}", self.scan_types());
        for (scan_type, records) in self.buckets() {
            info!("  {}: {} files", scan_type, records.len());
        }
    }

    /// Number of records built for `scan_type`
    pub fn count(&self, scan_type: ScanType) -> usize {
        self.buckets.get(&scan_type).map_or(0, Vec::len)
    }

    /// Records for `scan_type`, in discovery order
    pub fn records(&self, scan_type: ScanType) -> &[MetadataRecord] {
        self.buckets
            .get(&scan_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Scan types in first-discovery order
    pub fn scan_types(&self) -> Vec<ScanType> {
        self.order.clone()
    }

    /// Iterates non-empty buckets in first-discovery order
    pub fn buckets(&self) -> impl Iterator<Item = (ScanType, &[MetadataRecord])> + '_ {
        self.order
            .iter()
            .map(move |scan_type| (*scan_type, self.records(*scan_type)))
    }

    /// Total records built in this run
    pub fn processed_count(&self) -> usize {
        self.processed
    }

    /// Files that failed to parse in this run
    pub fn failed_count(&self) -> usize {
        self.failed
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
