//! Configuration file support for droidbuild.
//!
//! droidbuild reads two optional configuration files:
//! - Global: `~/.droidbuild/config.toml` - User-wide defaults
//! - Project: `droidbuild.toml` in the working directory
//!
//! Project config takes precedence over global config. Both sit below
//! environment variables and command-line flags; see
//! [`crate::core::config`] for the full precedence chain.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name of the project configuration.
pub const PROJECT_CONFIG_FILE: &str = "droidbuild.toml";

/// droidbuild configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Build settings
    pub build: BuildSection,

    /// Binding generation settings
    pub bindings: BindingsSection,
}

/// `[build]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildSection {
    /// Rust target triple (e.g., aarch64-linux-android)
    pub target: Option<String>,

    /// Android ABI passed to cargo-ndk (e.g., arm64-v8a)
    pub abi: Option<String>,

    /// Cargo profile name
    pub profile: Option<String>,

    /// Output directory handed to cargo-ndk
    pub out_dir: Option<PathBuf>,
}

/// `[bindings]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BindingsSection {
    /// Binding generator executable
    pub generator: Option<String>,

    /// Directory the generated sources are written to
    pub out_dir: Option<PathBuf>,
}

impl ConfigFile {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("ignoring config {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: ConfigFile) {
        let ConfigFile { build, bindings } = other;

        if build.target.is_some() {
            self.build.target = build.target;
        }
        if build.abi.is_some() {
            self.build.abi = build.abi;
        }
        if build.profile.is_some() {
            self.build.profile = build.profile;
        }
        if build.out_dir.is_some() {
            self.build.out_dir = build.out_dir;
        }
        if bindings.generator.is_some() {
            self.bindings.generator = bindings.generator;
        }
        if bindings.out_dir.is_some() {
            self.bindings.out_dir = bindings.out_dir;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (`droidbuild.toml`)
/// 2. Global config (`~/.droidbuild/config.toml`)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> ConfigFile {
    let mut config = ConfigFile::default();

    if let Some(global) = global_path {
        config.merge(ConfigFile::load_or_default(global));
    }

    config.merge(ConfigFile::load_or_default(project_path));

    config
}

/// Get the global droidbuild config directory (~/.droidbuild).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".droidbuild"))
}

/// Get the global config path (~/.droidbuild/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (`droidbuild.toml` under `project_root`).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_FILE)
}
