use std::fmt;

/// Scan type classification for ADNI metadata files
///
/// A closed vocabulary: every metadata record carries exactly one of these
/// labels, assigned from the file name by
/// [`classify_scan_type`](crate::extraction::classify_scan_type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum ScanType {
    #[cfg_attr(feature = "json", serde(rename = "PET_FDG"))]
    PetFdg,
    #[cfg_attr(feature = "json", serde(rename = "PET_FBB"))]
    PetFbb,
    #[cfg_attr(feature = "json", serde(rename = "PET_AV45"))]
    PetAv45,
    #[cfg_attr(feature = "json", serde(rename = "PET_TAU"))]
    PetTau,
    #[cfg_attr(feature = "json", serde(rename = "PET_OTHER"))]
    PetOther,
    #[cfg_attr(feature = "json", serde(rename = "MRI_FLAIR"))]
    MriFlair,
    #[cfg_attr(feature = "json", serde(rename = "MRI_MPRAGE"))]
    MriMprage,
    #[cfg_attr(feature = "json", serde(rename = "MRI_DTI"))]
    MriDti,
    #[cfg_attr(feature = "json", serde(rename = "MRI_fMRI"))]
    MriFmri,
    #[cfg_attr(feature = "json", serde(rename = "MRI_ASL"))]
    MriAsl,
    #[cfg_attr(feature = "json", serde(rename = "MRI_T2"))]
    MriT2,
    #[cfg_attr(feature = "json", serde(rename = "OTHER"))]
    Other,
}

impl ScanType {
    /// Returns the label as written in reports and sheet names
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanType::PetFdg => "PET_FDG",
            ScanType::PetFbb => "PET_FBB",
            ScanType::PetAv45 => "PET_AV45",
            ScanType::PetTau => "PET_TAU",
            ScanType::PetOther => "PET_OTHER",
            ScanType::MriFlair => "MRI_FLAIR",
            ScanType::MriMprage => "MRI_MPRAGE",
            ScanType::MriDti => "MRI_DTI",
            ScanType::MriFmri => "MRI_fMRI",
            ScanType::MriAsl => "MRI_ASL",
            ScanType::MriT2 => "MRI_T2",
            ScanType::Other => "OTHER",
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
