use crate::error::Result;
use crate::types::ImagingProtocol;
use roxmltree::Node;

use super::tree::{
    find_all, get_text, has_ancestor_below, has_parent_below, parse_float, parse_truncated_int,
    IMAGING_PROTOCOL, PROTOCOL, PROTOCOL_TERM, TERM_ATTR,
};

/// Extracts imaging protocol terms
///
/// Two structural paths are scanned:
/// - MRI: `protocol` elements directly under a `protocolTerm`
/// - PET: `protocol` elements anywhere under an `imagingProtocol`
///
/// Terms are matched by exact name. An empty value leaves the field absent;
/// a non-numeric value in a numeric field fails the record. Repeated terms
/// overwrite earlier ones.
pub fn extract_imaging_protocol(root: Node<'_, '_>) -> Result<ImagingProtocol> {
    let mut protocol = ImagingProtocol::default();

    for node in find_all(root, PROTOCOL).filter(|n| has_parent_below(*n, PROTOCOL_TERM, root)) {
        let term = node.attribute(TERM_ATTR).unwrap_or("");
        apply_mri_term(&mut protocol, term, get_text(node))?;
    }

    for node in find_all(root, PROTOCOL).filter(|n| has_ancestor_below(*n, IMAGING_PROTOCOL, root))
    {
        let term = node.attribute(TERM_ATTR).unwrap_or("");
        apply_pet_term(&mut protocol, term, get_text(node))?;
    }

    Ok(protocol)
}

fn apply_mri_term(protocol: &mut ImagingProtocol, term: &str, value: Option<String>) -> Result<()> {
    match term {
        "TE" => protocol.te_ms = optional_float("te_ms", value)?,
        "TR" => protocol.tr_ms = optional_float("tr_ms", value)?,
        "Slice Thickness" => {
            protocol.slice_thickness_mm = optional_float("slice_thickness_mm", value)?
        }
        "Flip Angle" => protocol.flip_angle = optional_float("flip_angle", value)?,
        "Manufacturer" => protocol.manufacturer = value,
        "Mfg Model" => protocol.device_model = value,
        "Field Strength" => {
            protocol.field_strength_t = optional_float("field_strength_t", value)?
        }
        _ => {}
    }
    Ok(())
}

fn apply_pet_term(protocol: &mut ImagingProtocol, term: &str, value: Option<String>) -> Result<()> {
    match term {
        "Radiopharmaceutical" => protocol.radiopharmaceutical = value,
        "Number of Rows" => protocol.num_rows = optional_int("num_rows", value)?,
        "Number of Columns" => protocol.num_columns = optional_int("num_columns", value)?,
        "Number of Slices" => protocol.num_slices = optional_int("num_slices", value)?,
        "Pixel Spacing X" => {
            protocol.pixel_spacing_x = optional_float("pixel_spacing_x", value)?
        }
        "Pixel Spacing Y" => {
            protocol.pixel_spacing_y = optional_float("pixel_spacing_y", value)?
        }
        "Reconstruction" => protocol.reconstruction_method = value,
        _ => {}
    }
    Ok(())
}

fn optional_float(field: &'static str, value: Option<String>) -> Result<Option<f64>> {
    value.map(|v| parse_float(field, &v)).transpose()
}

fn optional_int(field: &'static str, value: Option<String>) -> Result<Option<i64>> {
    value.map(|v| parse_truncated_int(field, &v)).transpose()
}
