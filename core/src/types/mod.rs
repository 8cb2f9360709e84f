//! Core type definitions for ADNI scan metadata
//!
//! This module provides the fundamental types used throughout the adnimeta library:
//! - [`ScanType`]: Closed vocabulary of scan modality/protocol labels
//! - [`MetadataRecord`]: Typed metadata extracted from one XML file
//! - [`FieldValue`]: Flattened cell value, with a uniform [`FieldValue::Absent`] marker

mod enums;
mod record;

pub use enums::ScanType;
pub use record::{
    AcquisitionInfo, ClinicalScores, FieldValue, ImagingProtocol, MetadataRecord, ProcessingInfo,
    SubjectInfo, ABSENT_MARKER, ALWAYS_REPORTED, FIELD_NAMES,
};
