//! Core data models for the pull run

use std::path::{Path, PathBuf};

/// A project locale as reported by the languages endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub code: String,
    pub is_base: bool,
}

impl Language {
    pub fn new(code: impl Into<String>, is_base: bool) -> Self {
        Self {
            code: code.into(),
            is_base,
        }
    }

    /// Folder name the app expects for this locale, without the `.lproj` suffix.
    ///
    /// OneSky reports the base language as a region variant ("en_GB") while
    /// the project keeps it under the bare two-letter code ("en").
    pub fn locale_folder(&self) -> &str {
        if self.is_base {
            self.code.get(..2).unwrap_or(&self.code)
        } else {
            &self.code
        }
    }
}

/// One (language, file) pair to export, with its resolved destination
#[derive(Debug, Clone)]
pub struct ExportTarget {
    pub file_name: String,
    pub locale: String,
    pub destination: PathBuf,
}

impl ExportTarget {
    /// Destination is `<languages_root>/<locale_folder>.lproj/<file_name>`.
    pub fn new(file_name: &str, language: &Language, languages_root: &Path) -> Self {
        Self {
            file_name: file_name.to_string(),
            locale: language.code.clone(),
            destination: languages_root
                .join(format!("{}.lproj", language.locale_folder()))
                .join(file_name),
        }
    }
}
