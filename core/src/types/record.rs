use super::ScanType;
use std::fmt;

/// Uniform rendering of an absent field in every report cell
pub const ABSENT_MARKER: &str = "N/A";

/// Column names in canonical order
pub const FIELD_NAMES: [&str; 33] = [
    "filename",
    "scan_type",
    "subject_id",
    "research_group",
    "gender",
    "age",
    "weight_kg",
    "apoe_a1",
    "apoe_a2",
    "visit_type",
    "modality",
    "scan_date",
    "series_id",
    "mmse_score",
    "cdr_score",
    "npi_score",
    "faq_score",
    "te_ms",
    "tr_ms",
    "slice_thickness_mm",
    "flip_angle",
    "manufacturer",
    "device_model",
    "field_strength_t",
    "radiopharmaceutical",
    "num_rows",
    "num_columns",
    "num_slices",
    "pixel_spacing_x",
    "pixel_spacing_y",
    "reconstruction_method",
    "processing_label",
    "processing_steps",
];

/// Columns emitted for every record, present or not
pub const ALWAYS_REPORTED: [&str; 12] = [
    "filename",
    "scan_type",
    "subject_id",
    "research_group",
    "gender",
    "age",
    "weight_kg",
    "visit_type",
    "modality",
    "scan_date",
    "series_id",
    "processing_steps",
];

/// A single cell value of a flattened record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Float(f64),
    Int(i64),
    Absent,
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    fn text(value: &Option<String>) -> Self {
        value
            .as_ref()
            .map_or(FieldValue::Absent, |s| FieldValue::Text(s.clone()))
    }

    fn float(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Float)
    }

    fn int(value: Option<i64>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Int)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Absent => write!(f, "{}", ABSENT_MARKER),
        }
    }
}

/// Subject demographics and genotype
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SubjectInfo {
    pub subject_id: Option<String>,
    pub research_group: Option<String>,
    pub gender: Option<String>,
    pub age: Option<f64>,
    pub weight_kg: Option<f64>,
    pub apoe_a1: Option<String>,
    pub apoe_a2: Option<String>,
}

/// Visit and acquisition identifiers
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct AcquisitionInfo {
    pub visit_type: Option<String>,
    pub modality: Option<String>,
    pub scan_date: Option<String>,
    pub series_id: Option<String>,
}

/// Clinical assessment scores, each independently optional
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ClinicalScores {
    pub mmse: Option<f64>,
    pub cdr: Option<f64>,
    pub npi: Option<f64>,
    pub faq: Option<f64>,
}

/// Imaging protocol terms (MRI and PET)
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ImagingProtocol {
    pub te_ms: Option<f64>,
    pub tr_ms: Option<f64>,
    pub slice_thickness_mm: Option<f64>,
    pub flip_angle: Option<f64>,
    pub manufacturer: Option<String>,
    pub device_model: Option<String>,
    pub field_strength_t: Option<f64>,
    pub radiopharmaceutical: Option<String>,
    pub num_rows: Option<i64>,
    pub num_columns: Option<i64>,
    pub num_slices: Option<i64>,
    pub pixel_spacing_x: Option<f64>,
    pub pixel_spacing_y: Option<f64>,
    pub reconstruction_method: Option<String>,
}

/// Processing provenance
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ProcessingInfo {
    pub label: Option<String>,
    /// `process(program)` pairs in document order
    pub steps: Vec<String>,
}

impl ProcessingInfo {
    /// Steps joined with `"; "`, or `None` when there are none
    pub fn joined_steps(&self) -> Option<String> {
        if self.steps.is_empty() {
            None
        } else {
            Some(self.steps.join("; "))
        }
    }
}

/// Metadata extracted from one ADNI XML file
///
/// Built once by [`MetadataExtractor`](crate::MetadataExtractor) and never
/// mutated afterwards. Every optional field uses `None` for absence; the
/// flattened view from [`MetadataRecord::fields`] maps that to
/// [`FieldValue::Absent`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct MetadataRecord {
    /// Base name of the XML file
    pub filename: String,

    /// Classification of the file name
    pub scan_type: ScanType,

    pub subject: SubjectInfo,
    pub acquisition: AcquisitionInfo,
    pub scores: ClinicalScores,
    pub protocol: ImagingProtocol,
    pub processing: ProcessingInfo,
}

impl MetadataRecord {
    /// Creates an empty record for a file; all optional fields absent
    pub fn new(filename: impl Into<String>, scan_type: ScanType) -> Self {
        Self {
            filename: filename.into(),
            scan_type,
            subject: SubjectInfo::default(),
            acquisition: AcquisitionInfo::default(),
            scores: ClinicalScores::default(),
            protocol: ImagingProtocol::default(),
            processing: ProcessingInfo::default(),
        }
    }

    /// Flattens the record into `(column, value)` pairs in [`FIELD_NAMES`] order
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        let s = &self.subject;
        let a = &self.acquisition;
        let c = &self.scores;
        let p = &self.protocol;

        vec![
            ("filename", FieldValue::Text(self.filename.clone())),
            ("scan_type", FieldValue::Text(self.scan_type.to_string())),
            ("subject_id", FieldValue::text(&s.subject_id)),
            ("research_group", FieldValue::text(&s.research_group)),
            ("gender", FieldValue::text(&s.gender)),
            ("age", FieldValue::float(s.age)),
            ("weight_kg", FieldValue::float(s.weight_kg)),
            ("apoe_a1", FieldValue::text(&s.apoe_a1)),
            ("apoe_a2", FieldValue::text(&s.apoe_a2)),
            ("visit_type", FieldValue::text(&a.visit_type)),
            ("modality", FieldValue::text(&a.modality)),
            ("scan_date", FieldValue::text(&a.scan_date)),
            ("series_id", FieldValue::text(&a.series_id)),
            ("mmse_score", FieldValue::float(c.mmse)),
            ("cdr_score", FieldValue::float(c.cdr)),
            ("npi_score", FieldValue::float(c.npi)),
            ("faq_score", FieldValue::float(c.faq)),
            ("te_ms", FieldValue::float(p.te_ms)),
            ("tr_ms", FieldValue::float(p.tr_ms)),
            ("slice_thickness_mm", FieldValue::float(p.slice_thickness_mm)),
            ("flip_angle", FieldValue::float(p.flip_angle)),
            ("manufacturer", FieldValue::text(&p.manufacturer)),
            ("device_model", FieldValue::text(&p.device_model)),
            ("field_strength_t", FieldValue::float(p.field_strength_t)),
            ("radiopharmaceutical", FieldValue::text(&p.radiopharmaceutical)),
            ("num_rows", FieldValue::int(p.num_rows)),
            ("num_columns", FieldValue::int(p.num_columns)),
            ("num_slices", FieldValue::int(p.num_slices)),
            ("pixel_spacing_x", FieldValue::float(p.pixel_spacing_x)),
            ("pixel_spacing_y", FieldValue::float(p.pixel_spacing_y)),
            (
                "reconstruction_method",
                FieldValue::text(&p.reconstruction_method),
            ),
            ("processing_label", FieldValue::text(&self.processing.label)),
            (
                "processing_steps",
                FieldValue::text(&self.processing.joined_steps()),
            ),
        ]
    }

    /// Looks up a single flattened field by column name
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        self.fields()
            .into_iter()
            .find(|(column, _)| *column == name)
            .map(|(_, value)| value)
    }
}
