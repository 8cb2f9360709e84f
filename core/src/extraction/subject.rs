use crate::error::Result;
use crate::types::{AcquisitionInfo, SubjectInfo};
use roxmltree::Node;

use super::tree::{
    find_all, get_float_value, get_string_value, get_text, DATE_ACQUIRED, ITEM_ATTR, MODALITY,
    RESEARCH_GROUP, SERIES_IDENTIFIER, SUBJECT_AGE, SUBJECT_IDENTIFIER, SUBJECT_INFO, SUBJECT_SEX,
    VISIT_IDENTIFIER, WEIGHT_KG,
};

/// Extracts subject demographics and APOE genotype
///
/// Text fields fall back to absent. `subjectAge` and `weightKg` must be
/// numeric when present, otherwise the whole record fails.
pub fn extract_subject(root: Node<'_, '_>) -> Result<SubjectInfo> {
    let mut subject = SubjectInfo {
        subject_id: get_string_value(root, SUBJECT_IDENTIFIER),
        research_group: get_string_value(root, RESEARCH_GROUP),
        gender: get_string_value(root, SUBJECT_SEX),
        age: get_float_value(root, SUBJECT_AGE, "age")?,
        weight_kg: get_float_value(root, WEIGHT_KG, "weight_kg")?,
        ..SubjectInfo::default()
    };

    apply_genotype(root, &mut subject);

    Ok(subject)
}

/// Scans `subjectInfo[@item]` entries for APOE alleles
///
/// A later matching entry overwrites an earlier one.
fn apply_genotype(root: Node<'_, '_>, subject: &mut SubjectInfo) {
    for entry in find_all(root, SUBJECT_INFO) {
        let Some(item) = entry.attribute(ITEM_ATTR) else {
            continue;
        };

        if item.contains("APOE A1") {
            subject.apoe_a1 = get_text(entry);
        } else if item.contains("APOE A2") {
            subject.apoe_a2 = get_text(entry);
        }
    }
}

/// Extracts visit and acquisition identifiers
pub fn extract_acquisition(root: Node<'_, '_>) -> AcquisitionInfo {
    AcquisitionInfo {
        visit_type: get_string_value(root, VISIT_IDENTIFIER),
        modality: get_string_value(root, MODALITY),
        scan_date: get_string_value(root, DATE_ACQUIRED),
        series_id: get_string_value(root, SERIES_IDENTIFIER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdniMetaError;
    use roxmltree::Document;

    fn subject_of(xml: &str) -> Result<SubjectInfo> {
        let doc = Document::parse(xml).unwrap();
        extract_subject(doc.root_element())
    }

    #[test]
    fn test_extract_subject_fields() {
        let subject = subject_of(
            r#"<idaxs><project><subject>
                <subjectIdentifier>002_S_0295</subjectIdentifier>
                <researchGroup>CN</researchGroup>
                <subjectSex>M</subjectSex>
                <subjectAge>72.5</subjectAge>
                <weightKg>80</weightKg>
            </subject></project></idaxs>"#,
        )
        .unwrap();

        assert_eq!(subject.subject_id.as_deref(), Some("002_S_0295"));
        assert_eq!(subject.research_group.as_deref(), Some("CN"));
        assert_eq!(subject.gender.as_deref(), Some("M"));
        assert_eq!(subject.age, Some(72.5));
        assert_eq!(subject.weight_kg, Some(80.0));
        assert_eq!(subject.apoe_a1, None);
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let subject = subject_of("<idaxs><project/></idaxs>").unwrap();
        assert_eq!(subject, SubjectInfo::default());
    }

    #[test]
    fn test_non_numeric_age_fails() {
        let err = subject_of("<idaxs><s><subjectAge>abc</subjectAge></s></idaxs>").unwrap_err();
        assert!(matches!(err, AdniMetaError::InvalidNumber { field: "age", .. }));
    }

    #[test]
    fn test_empty_weight_fails() {
        let err = subject_of("<idaxs><s><weightKg/></s></idaxs>").unwrap_err();
        assert!(matches!(err, AdniMetaError::InvalidNumber { field: "weight_kg", .. }));
    }

    #[test]
    fn test_genotype_last_match_wins() {
        let subject = subject_of(
            r#"<idaxs><subject>
                <subjectInfo item="APOE A1">2</subjectInfo>
                <subjectInfo item="APOE A2">3</subjectInfo>
                <subjectInfo>ignored</subjectInfo>
                <subjectInfo item="Other">x</subjectInfo>
                <subjectInfo item="DX APOE A1">4</subjectInfo>
            </subject></idaxs>"#,
        )
        .unwrap();

        assert_eq!(subject.apoe_a1.as_deref(), Some("4"));
        assert_eq!(subject.apoe_a2.as_deref(), Some("3"));
    }

    #[test]
    fn test_extract_acquisition() {
        let doc = Document::parse(
            r#"<idaxs><study><visit><visitIdentifier>ADNI Screening</visitIdentifier></visit>
                <series><modality>MRI</modality><dateAcquired>2006-04-18</dateAcquired>
                <seriesIdentifier>13721</seriesIdentifier></series></study></idaxs>"#,
        )
        .unwrap();
        let acquisition = extract_acquisition(doc.root_element());

        assert_eq!(acquisition.visit_type.as_deref(), Some("ADNI Screening"));
        assert_eq!(acquisition.modality.as_deref(), Some("MRI"));
        assert_eq!(acquisition.scan_date.as_deref(), Some("2006-04-18"));
        assert_eq!(acquisition.series_id.as_deref(), Some("13721"));
    }
}
