//! Filesystem fixtures for build-output layouts.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::config::{BuildConfiguration, ConfigOverrides};

/// Scratch directory holding a cargo-ndk output dir and a cargo target dir.
pub struct BuildTree {
    pub tmp: TempDir,
}

impl BuildTree {
    pub fn new() -> Self {
        BuildTree {
            tmp: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    /// cargo-ndk output directory.
    pub fn out_dir(&self) -> PathBuf {
        self.root().join("android")
    }

    /// Cargo's per-target output root.
    pub fn target_root(&self) -> PathBuf {
        self.root().join("target")
    }

    pub fn bindings_dir(&self) -> PathBuf {
        self.root().join("bindings")
    }

    /// Configuration pointing every output directory into this tree.
    pub fn config(&self) -> BuildConfiguration {
        self.config_with(ConfigOverrides::default())
    }

    /// Like [`BuildTree::config`] with extra overrides applied on top.
    pub fn config_with(&self, overrides: ConfigOverrides) -> BuildConfiguration {
        BuildConfiguration::from_overrides(overrides.or(ConfigOverrides {
            out_dir: Some(self.out_dir()),
            bindings_dir: Some(self.bindings_dir()),
            ..Default::default()
        }))
    }
}

impl Default for BuildTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Create an empty file at `path`, including parent directories.
pub fn touch(path: &Path) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create parent dir");
    }
    fs::write(path, b"").expect("failed to write file");
    path.to_path_buf()
}
