use crate::error::AdniMetaError;
use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Conventional subfolder tried when a relative selector does not exist
pub const ADNI_SUBFOLDER: &str = "ADNI";

/// Folder holding per-collection metadata downloads
pub const METAINFO_FOLDER: &str = "Metainformation";

/// Folders searched, in order, when no selector is given
pub const AUTO_DISCOVERY_FOLDERS: [&str; 3] =
    [METAINFO_FOLDER, "ADNI_PET_metadata", "ADNI_MRI_metadata"];

/// Suggestions shown per invalid selector
pub const MAX_SUGGESTIONS: usize = 5;

/// A selector that resolved to no folder containing XML files
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidSelector {
    /// Selector as given by the user
    pub selector: String,

    /// Path the selector resolved to
    pub resolved: PathBuf,

    /// Similarly named folders, `Metainformation/` ones first
    pub suggestions: Vec<String>,
}

/// Result of resolving a list of folder selectors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderResolution {
    /// Leaf-with-XML folders in selector order
    pub folders: Vec<PathBuf>,

    /// Selectors that produced no folder
    pub invalid: Vec<InvalidSelector>,
}

/// Resolves folder selectors against a base directory
#[derive(Debug, Clone)]
pub struct FolderResolver {
    base_path: PathBuf,
}

impl FolderResolver {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Converts a selector to a folder path
    ///
    /// Absolute selectors are used as-is. Relative ones are joined to the
    /// base path; if that does not exist but `<base>/ADNI/<selector>` does,
    /// that is used instead. The joined path is returned even if missing.
    pub fn resolve(&self, selector: &str) -> PathBuf {
        let folder_path = Path::new(selector);
        if folder_path.is_absolute() {
            return folder_path.to_path_buf();
        }

        let resolved = self.base_path.join(folder_path);
        if resolved.exists() {
            return resolved;
        }

        let adni_subpath = self.base_path.join(ADNI_SUBFOLDER).join(folder_path);
        if adni_subpath.exists() {
            return adni_subpath;
        }

        resolved
    }

    /// Lists folder names containing `selector`, ignoring case
    ///
    /// Children of `<base>/Metainformation` are reported with that prefix
    /// and come first, followed by children of the base path.
    pub fn suggest_similar(&self, selector: &str) -> Vec<String> {
        let needle = selector.to_lowercase();
        let metainfo_path = self.base_path.join(METAINFO_FOLDER);
        let mut suggestions: Vec<String> = matching_subdirectories(&metainfo_path, &needle)
            .into_iter()
            .map(|name| format!("{}/{}", METAINFO_FOLDER, name))
            .collect();
        suggestions.extend(matching_subdirectories(&self.base_path, &needle));
        suggestions
    }

    /// Resolves every selector to its leaf-with-XML folders
    ///
    /// Selectors without any such folder are collected as invalid, with
    /// suggestions, and do not stop the remaining selectors.
    pub fn resolve_selectors(&self, selectors: &[String]) -> FolderResolution {
        let mut resolution = FolderResolution::default();

        for selector in selectors {
            info!("Processing folder path: {}", selector);
            let folder_path = self.resolve(selector);
            let xml_folders = find_xml_folders(&folder_path);

            if xml_folders.is_empty() {
                warn!("No XML files found: {}", folder_path.display());
                resolution.invalid.push(InvalidSelector {
                    selector: selector.clone(),
                    suggestions: self.suggest_similar(selector),
                    resolved: folder_path,
                });
            } else {
                info!("Valid folder path: {}", folder_path.display());
                info!("   Found {} subfolders with XML files", xml_folders.len());
                resolution.folders.extend(xml_folders);
            }
        }

        if !resolution.invalid.is_empty() {
            log_invalid_selectors(&resolution.invalid);
        }

        resolution
    }

    /// Finds leaf-with-XML folders under the conventional metadata folders
    pub fn auto_discover(&self) -> Vec<PathBuf> {
        info!("Automatically searching all metadata folders.");
        let folders: Vec<PathBuf> = AUTO_DISCOVERY_FOLDERS
            .iter()
            .map(|name| self.base_path.join(name))
            .filter(|path| path.exists())
            .flat_map(|path| find_xml_folders(&path))
            .collect();
        info!("Auto search result: {} folders found", folders.len());
        folders
    }
}

fn log_invalid_selectors(invalid: &[InvalidSelector]) {
    error!("Unable to process these folders:");
    for entry in invalid {
        error!(
            "{}",
            AdniMetaError::FolderNotFound(entry.resolved.display().to_string())
        );
        if entry.suggestions.is_empty() {
            info!("  '{}': No similar folders found.", entry.selector);
        } else {
            info!("  Instead of '{}', try:", entry.selector);
            for suggestion in entry.suggestions.iter().take(MAX_SUGGESTIONS) {
                info!("    - {}", suggestion);
            }
        }
    }
}

/// Names of subdirectories of `dir` whose lowercase name contains `needle`
fn matching_subdirectories(dir: &Path, needle: &str) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.to_lowercase().contains(needle))
        .collect();
    names.sort();
    names
}

/// Checks whether a path names an XML file (`*.xml`, case-sensitive)
pub fn is_xml_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(".xml"))
            .unwrap_or(false)
}

/// Lists the XML files directly inside `dir`, sorted by file name
pub fn list_xml_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if is_xml_file(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Recursively finds directories that directly contain an XML file
///
/// `dir` itself is included when it qualifies. Directories are returned
/// parent-first in file-name order; walk errors are logged and skipped.
pub fn find_xml_folders(dir: &Path) -> Vec<PathBuf> {
    let mut xml_folders = Vec::new();

    if !dir.exists() {
        return xml_folders;
    }

    for entry in WalkDir::new(dir).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_dir() {
                    continue;
                }
                match list_xml_files(entry.path()) {
                    Ok(files) if !files.is_empty() => {
                        debug!("{} XML files in {}", files.len(), entry.path().display());
                        xml_folders.push(entry.into_path());
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Error reading {}: {}", entry.path().display(), e),
                }
            }
            Err(e) => warn!("Error during folder exploration: {}", e),
        }
    }

    xml_folders
}
