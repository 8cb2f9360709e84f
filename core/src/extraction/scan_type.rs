use crate::types::ScanType;
use std::path::Path;

/// Classifies an XML file by the base name of its path
///
/// Directory components are ignored. See [`classify_filename`] for the rules.
pub fn classify_scan_type(path: impl AsRef<Path>) -> ScanType {
    let filename = path
        .as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    classify_filename(&filename)
}

/// Classifies a file name into a [`ScanType`]
///
/// # Algorithm
///
/// Case-sensitive substring tests, first match wins:
///
/// 1. PET tracers: FDG, FBB/Florbetaben, AV45/florbetapir,
///    Tau/AV1451/FLORTAUCIPIR, then any other PET
/// 2. MPR → MPRAGE, unless FLAIR is also present (FLAIR wins)
/// 3. FLAIR, DTI, fMRI/rsfMRI, ASL, T2
/// 4. Default → OTHER
pub fn classify_filename(filename: &str) -> ScanType {
    let has = |marker: &str| filename.contains(marker);

    // PET tracers are checked before any MRI marker
    if has("FDG") {
        return ScanType::PetFdg;
    }
    if has("FBB") || has("Florbetaben") {
        return ScanType::PetFbb;
    }
    if has("AV45") || has("florbetapir") {
        return ScanType::PetAv45;
    }
    if has("Tau") || has("AV1451") || has("FLORTAUCIPIR") {
        return ScanType::PetTau;
    }
    if has("PET") {
        return ScanType::PetOther;
    }

    if has("MPR") {
        if has("FLAIR") {
            return ScanType::MriFlair;
        }
        return ScanType::MriMprage;
    }
    if has("FLAIR") {
        return ScanType::MriFlair;
    }
    if has("DTI") {
        return ScanType::MriDti;
    }
    // "rsfMRI" contains "fMRI"; both spelled out to keep the vocabulary visible
    if has("rsfMRI") || has("fMRI") {
        return ScanType::MriFmri;
    }
    if has("ASL") {
        return ScanType::MriAsl;
    }
    if has("T2") {
        return ScanType::MriT2;
    }

    ScanType::Other
}
