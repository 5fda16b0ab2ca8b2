//! The compiled shared library and the result of looking for it.

use std::path::{Path, PathBuf};

/// File name cargo gives a `cdylib` built for Android.
///
/// `deepseek-ocr-android` becomes `libdeepseek_ocr_android.so`.
pub fn artifact_file_name(module: &str) -> String {
    format!("lib{}.so", module.replace('-', "_"))
}

/// Result of artifact discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    ArtifactPath(PathBuf),
    NotFound,
}

impl BuildOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            BuildOutcome::ArtifactPath(path) => Some(path),
            BuildOutcome::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, BuildOutcome::ArtifactPath(_))
    }

    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            BuildOutcome::ArtifactPath(path) => Some(path),
            BuildOutcome::NotFound => None,
        }
    }
}

impl From<Option<PathBuf>> for BuildOutcome {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(BuildOutcome::NotFound, BuildOutcome::ArtifactPath)
    }
}
