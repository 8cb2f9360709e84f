pub mod clinical;
pub mod protocol;
pub mod provenance;
pub mod scan_type;
pub mod subject;
pub mod tree;

pub use clinical::extract_clinical_scores;
pub use protocol::extract_imaging_protocol;
pub use provenance::extract_processing;
pub use scan_type::{classify_filename, classify_scan_type};
pub use subject::{extract_acquisition, extract_subject};
pub use tree::*;
