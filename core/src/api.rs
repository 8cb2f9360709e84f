use crate::error::Result;
use crate::extraction::{
    classify_filename, extract_acquisition, extract_clinical_scores, extract_imaging_protocol,
    extract_processing, extract_subject,
};
use crate::types::MetadataRecord;
use roxmltree::{Document, ParsingOptions};
use std::fs;
use std::path::Path;

/// Main extractor for ADNI scan metadata
///
/// Provides a high-level API for building a [`MetadataRecord`] from an
/// ADNI XML sidecar file.
///
/// # Example
///
/// ```
/// use adnimeta_core::{FieldValue, MetadataExtractor, ScanType};
///
/// let xml = r#"<idaxs><project><subject>
///     <subjectIdentifier>002_S_0295</subjectIdentifier>
///     <researchGroup>CN</researchGroup>
///     <subjectSex>M</subjectSex>
///     <subjectAge>72.5</subjectAge>
/// </subject></project></idaxs>"#;
///
/// let record = MetadataExtractor::parse("ADNI_Brain_PET_FDG.xml", xml).unwrap();
///
/// assert_eq!(record.scan_type, ScanType::PetFdg);
/// assert_eq!(record.subject.age, Some(72.5));
/// assert_eq!(record.field("visit_type"), Some(FieldValue::Absent));
/// ```
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Reads and extracts metadata from an XML file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The document is not well-formed XML
    /// - A numeric field holds a non-numeric value
    pub fn from_file(path: &Path) -> Result<MetadataRecord> {
        let text = fs::read_to_string(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::parse(&filename, &text)
    }

    /// Parses an XML string and extracts metadata for `filename`
    pub fn parse(filename: &str, xml: &str) -> Result<MetadataRecord> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(xml, options)?;
        Self::extract(filename, &doc)
    }

    /// Extracts metadata from an already-parsed document
    ///
    /// Absent elements leave their fields absent; any numeric coercion
    /// failure aborts the whole record.
    pub fn extract(filename: &str, doc: &Document) -> Result<MetadataRecord> {
        let root = doc.root_element();

        let mut record = MetadataRecord::new(filename, classify_filename(filename));
        record.subject = extract_subject(root)?;
        record.acquisition = extract_acquisition(root);
        record.scores = extract_clinical_scores(root)?;
        record.protocol = extract_imaging_protocol(root)?;
        record.processing = extract_processing(root);

        Ok(record)
    }
}
