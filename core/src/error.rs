use thiserror::Error;

/// Result type for adnimeta operations
pub type Result<T> = std::result::Result<T, AdniMetaError>;

/// Error types for adnimeta operations
#[derive(Error, Debug)]
pub enum AdniMetaError {
    /// Malformed XML document
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// A numeric field held text that does not coerce to a number
    #[error("Invalid numeric value for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// Folder selector resolved to no directory containing XML files
    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    /// Nothing was extracted, so there is nothing to report
    #[error("No extracted data available")]
    NoData,

    /// Workbook creation or write error
    #[error("Workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AdniMetaError {
    /// Builds an [`AdniMetaError::InvalidNumber`] for `field`
    pub fn invalid_number(field: &'static str, value: impl Into<String>) -> Self {
        AdniMetaError::InvalidNumber {
            field,
            value: value.into(),
        }
    }
}
