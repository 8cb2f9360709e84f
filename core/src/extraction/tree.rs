use crate::error::{AdniMetaError, Result};
use roxmltree::Node;

// Subject Elements
pub const SUBJECT_IDENTIFIER: &str = "subjectIdentifier";
pub const RESEARCH_GROUP: &str = "researchGroup";
pub const SUBJECT_SEX: &str = "subjectSex";
pub const SUBJECT_AGE: &str = "subjectAge";
pub const WEIGHT_KG: &str = "weightKg";
pub const SUBJECT_INFO: &str = "subjectInfo";
pub const ITEM_ATTR: &str = "item";

// Visit/Acquisition Elements
pub const VISIT_IDENTIFIER: &str = "visitIdentifier";
pub const MODALITY: &str = "modality";
pub const DATE_ACQUIRED: &str = "dateAcquired";
pub const SERIES_IDENTIFIER: &str = "seriesIdentifier";

// Assessment Elements
pub const ASSESSMENT: &str = "assessment";
pub const ASSESSMENT_SCORE: &str = "assessmentScore";
pub const NAME_ATTR: &str = "name";
pub const ATTRIBUTE_ATTR: &str = "attribute";

// Protocol Elements
pub const PROTOCOL_TERM: &str = "protocolTerm";
pub const IMAGING_PROTOCOL: &str = "imagingProtocol";
pub const PROTOCOL: &str = "protocol";
pub const TERM_ATTR: &str = "term";

// Processing Elements
pub const PROCESSED_DATA_LABEL: &str = "processedDataLabel";
pub const PROVENANCE_DETAIL: &str = "provenanceDetail";
pub const PROCESS: &str = "process";
pub const PROGRAM: &str = "program";

/// Iterates element descendants of `node` named `tag`, in document order
///
/// `node` itself is never yielded.
pub fn find_all<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.descendants()
        .skip(1)
        .filter(move |n| n.is_element() && n.has_tag_name(tag))
}

/// Returns the first element descendant of `node` named `tag`
pub fn find_first<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> Option<Node<'a, 'input>> {
    find_all(node, tag).next()
}

/// Returns the first descendant named `tag` whose attribute `attr` equals `value`
pub fn find_first_with_attr<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'a str,
    attr: &str,
    value: &str,
) -> Option<Node<'a, 'input>> {
    find_all(node, tag).find(|n| n.attribute(attr) == Some(value))
}

/// Returns whether `node` has an element ancestor named `tag` strictly below `root`
pub fn has_ancestor_below(node: Node<'_, '_>, tag: &str, root: Node<'_, '_>) -> bool {
    node.ancestors()
        .skip(1)
        .take_while(|a| *a != root)
        .any(|a| a.is_element() && a.has_tag_name(tag))
}

/// Returns whether the parent of `node` is named `tag` and is not `root`
pub fn has_parent_below(node: Node<'_, '_>, tag: &str, root: Node<'_, '_>) -> bool {
    node.parent_element()
        .map(|p| p != root && p.has_tag_name(tag))
        .unwrap_or(false)
}

/// Helper to get the leading text of an element, as written
///
/// Returns `None` if the element has no leading text. Whitespace is kept;
/// numeric parsing trims it, and whitespace-only numbers fail.
pub fn get_text(node: Node<'_, '_>) -> Option<String> {
    node.text().filter(|s| !s.is_empty()).map(str::to_string)
}

/// Helper to get the text of the first descendant named `tag`
///
/// Returns `None` if the element is not present or has no text
pub fn get_string_value(root: Node<'_, '_>, tag: &str) -> Option<String> {
    find_first(root, tag).and_then(get_text)
}

/// Helper to get a required-numeric element value
///
/// Returns `Ok(None)` if the element is absent. An element that is present
/// but empty or non-numeric fails with [`AdniMetaError::InvalidNumber`].
pub fn get_float_value(root: Node<'_, '_>, tag: &str, field: &'static str) -> Result<Option<f64>> {
    match find_first(root, tag) {
        None => Ok(None),
        Some(elem) => element_float(elem, field).map(Some),
    }
}

/// Parses the text of an element that must hold a number
pub fn element_float(elem: Node<'_, '_>, field: &'static str) -> Result<f64> {
    let text = get_text(elem).unwrap_or_default();
    parse_float(field, &text)
}

/// Parses a float, failing the record on anything that is not a number
pub fn parse_float(field: &'static str, text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| AdniMetaError::invalid_number(field, text))
}

/// Parses an integer through a float, truncating toward zero
///
/// Accepts `"256.0"`-style values. Non-finite values fail.
pub fn parse_truncated_int(field: &'static str, text: &str) -> Result<i64> {
    let value = parse_float(field, text)?;
    if !value.is_finite() {
        return Err(AdniMetaError::invalid_number(field, text));
    }
    Ok(value.trunc() as i64)
}
