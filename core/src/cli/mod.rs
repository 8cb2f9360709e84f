pub mod report;

use crate::collection::ExtractorConfig;
use chrono::{DateTime, Local};
use clap::Parser;
use std::path::PathBuf;

/// Prefix of the default output file name
pub const DEFAULT_OUTPUT_PREFIX: &str = "adni_detailed_metadata";

/// Command-line arguments for adnimeta
#[derive(Parser, Debug)]
#[command(name = "adnimeta")]
#[command(about = "ADNI XML metadata extraction tool")]
#[command(version)]
pub struct Cli {
    /// Base directory that folder names are resolved against
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub base_path: PathBuf,

    /// Output workbook path (default: timestamped file name)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Maximum number of files per scan type
    #[arg(long, value_name = "N")]
    pub max_files: Option<usize>,

    /// Folders to process (default: auto-discover)
    #[arg(long, value_name = "NAME", num_args = 0..)]
    pub folders: Vec<String>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Extraction settings described by the arguments
    pub fn to_config(&self) -> ExtractorConfig {
        let config = ExtractorConfig::new(&self.base_path).with_folders(self.folders.clone());
        match self.max_files {
            Some(max) => config.with_max_files_per_type(max),
            None => config,
        }
    }

    /// Output path, falling back to a name stamped with the current time
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(Local::now()))
    }
}

/// Default output file name for a run started at `now`
pub fn default_output_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!(
        "{}_{}.xlsx",
        DEFAULT_OUTPUT_PREFIX,
        now.format("%Y-%m-%d_%H-%M-%S")
    ))
}
