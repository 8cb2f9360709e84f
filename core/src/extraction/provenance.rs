use crate::types::{ProcessingInfo, ABSENT_MARKER};
use roxmltree::Node;

use super::tree::{
    find_all, find_first, get_string_value, get_text, PROCESS, PROCESSED_DATA_LABEL,
    PROVENANCE_DETAIL, PROGRAM,
};

/// Extracts the processed-data label and processing steps
///
/// Each `provenanceDetail` holding both a `process` and a `program` yields
/// one `process(program)` step.
pub fn extract_processing(root: Node<'_, '_>) -> ProcessingInfo {
    let steps = find_all(root, PROVENANCE_DETAIL)
        .filter_map(|detail| {
            let process = find_first(detail, PROCESS)?;
            let program = find_first(detail, PROGRAM)?;
            Some(format!(
                "{}({})",
                get_text(process).as_deref().unwrap_or(ABSENT_MARKER),
                get_text(program).as_deref().unwrap_or(ABSENT_MARKER)
            ))
        })
        .collect();

    ProcessingInfo {
        label: get_string_value(root, PROCESSED_DATA_LABEL),
        steps,
    }
}
