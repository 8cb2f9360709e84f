use crate::error::Result;
use crate::types::ClinicalScores;
use roxmltree::Node;

use super::tree::{
    element_float, find_all, find_first_with_attr, ASSESSMENT, ASSESSMENT_SCORE, ATTRIBUTE_ATTR,
    NAME_ATTR,
};

/// Which score a named assessment contributes, and where it lives
struct ScoreRule {
    name_marker: &'static str,
    score_attribute: &'static str,
    field: &'static str,
    slot: fn(&mut ClinicalScores) -> &mut Option<f64>,
}

fn mmse_slot(s: &mut ClinicalScores) -> &mut Option<f64> {
    &mut s.mmse
}

fn cdr_slot(s: &mut ClinicalScores) -> &mut Option<f64> {
    &mut s.cdr
}

fn npi_slot(s: &mut ClinicalScores) -> &mut Option<f64> {
    &mut s.npi
}

fn faq_slot(s: &mut ClinicalScores) -> &mut Option<f64> {
    &mut s.faq
}

const SCORE_RULES: [ScoreRule; 4] = [
    ScoreRule {
        name_marker: "MMSE",
        score_attribute: "MMSCORE",
        field: "mmse_score",
        slot: mmse_slot,
    },
    ScoreRule {
        name_marker: "CDR",
        score_attribute: "CDGLOBAL",
        field: "cdr_score",
        slot: cdr_slot,
    },
    ScoreRule {
        name_marker: "NPI",
        score_attribute: "NPISCORE",
        field: "npi_score",
        slot: npi_slot,
    },
    ScoreRule {
        name_marker: "FAQ",
        score_attribute: "FAQTOTAL",
        field: "faq_score",
        slot: faq_slot,
    },
];

/// Extracts clinical assessment scores
///
/// Every `assessment` block is tested against each rule independently, so
/// one block whose name mentions several instruments feeds several scores.
/// A matching block without its score element clears that score.
pub fn extract_clinical_scores(root: Node<'_, '_>) -> Result<ClinicalScores> {
    let mut scores = ClinicalScores::default();

    for assessment in find_all(root, ASSESSMENT) {
        let name = assessment.attribute(NAME_ATTR).unwrap_or("");

        for rule in SCORE_RULES.iter().filter(|r| name.contains(r.name_marker)) {
            let score = find_first_with_attr(
                assessment,
                ASSESSMENT_SCORE,
                ATTRIBUTE_ATTR,
                rule.score_attribute,
            )
            .map(|elem| element_float(elem, rule.field))
            .transpose()?;

            *(rule.slot)(&mut scores) = score;
        }
    }

    Ok(scores)
}
