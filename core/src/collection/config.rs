use std::path::PathBuf;

/// Multiplier applied to the per-type cap to get the run-wide file ceiling
pub const RUN_CEILING_FACTOR: usize = 10;

/// Configuration for one extraction run
///
/// # Example
///
/// ```
/// use adnimeta_core::ExtractorConfig;
///
/// let config = ExtractorConfig::new("/data/adni_metainfo")
///     .with_max_files_per_type(5)
///     .with_folders(vec!["ADNI_PET_metadata".to_string()]);
///
/// assert_eq!(config.max_files_per_type, Some(5));
/// assert_eq!(config.run_ceiling(), Some(50));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorConfig {
    /// Base directory that relative folder selectors resolve against
    pub base_path: PathBuf,

    /// Maximum records kept per scan type; `None` is unlimited
    pub max_files_per_type: Option<usize>,

    /// Folder selectors; empty means auto-discover
    pub folders: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            max_files_per_type: None,
            folders: Vec::new(),
        }
    }
}

impl ExtractorConfig {
    /// Creates an unlimited, auto-discovering configuration for `base_path`
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            ..Self::default()
        }
    }

    /// Builder: Set the per-type cap
    pub fn with_max_files_per_type(mut self, max: usize) -> Self {
        self.max_files_per_type = Some(max);
        self
    }

    /// Builder: Set explicit folder selectors
    pub fn with_folders(mut self, folders: Vec<String>) -> Self {
        self.folders = folders;
        self
    }

    /// Total processed files after which the run stops, if capped
    pub fn run_ceiling(&self) -> Option<usize> {
        self.max_files_per_type
            .map(|max| max.saturating_mul(RUN_CEILING_FACTOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unlimited() {
        let config = ExtractorConfig::default();
        assert_eq!(config.base_path, PathBuf::from("."));
        assert_eq!(config.max_files_per_type, None);
        assert_eq!(config.run_ceiling(), None);
        assert!(config.folders.is_empty());
    }

    #[test]
    fn test_run_ceiling_saturates() {
        let config = ExtractorConfig::default().with_max_files_per_type(usize::MAX);
        assert_eq!(config.run_ceiling(), Some(usize::MAX));
    }
}
