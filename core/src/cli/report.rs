use crate::types::ScanType;
use std::fmt;
use std::path::{Path, PathBuf};

/// Final console message for a run
pub enum RunReport {
    /// Workbook written to `output`, with the record count per scan type
    Success {
        output: PathBuf,
        counts: Vec<(ScanType, usize)>,
    },
    /// No workbook was produced
    Failure,
}

impl RunReport {
    /// Creates a success report
    pub fn success(output: &Path, counts: Vec<(ScanType, usize)>) -> Self {
        RunReport::Success {
            output: output.to_path_buf(),
            counts,
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunReport::Success { output, counts } => {
                writeln!(f)?;
                writeln!(f, "Detailed metadata extraction completed!")?;
                writeln!(f, "Output file: {}", output.display())?;
                writeln!(f)?;
                writeln!(f, "Extracted data:")?;
                for (scan_type, count) in counts {
                    writeln!(f, "  - {}: {} subjects", scan_type, count)?;
                }
                Ok(())
            }
            RunReport::Failure => {
                writeln!(f)?;
                writeln!(f, "Metadata extraction failed: no output file was created")
            }
        }
    }
}
