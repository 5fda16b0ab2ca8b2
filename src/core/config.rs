//! Build configuration resolution.
//!
//! A [`BuildConfiguration`] is assembled once per run from layered
//! [`ConfigOverrides`], highest precedence first:
//!
//! 1. Command-line flags
//! 2. Environment variables (`ANDROID_TARGET`, `ANDROID_ABI`, ...)
//! 3. Config files (see [`crate::util::config`])
//! 4. Built-in defaults
//!
//! Values are not validated here. Whatever string arrives is passed through
//! to cargo, cargo-ndk or rustup, which reject what they don't understand.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::artifact::artifact_file_name;
use crate::util::config::ConfigFile;

/// The crate compiled into the Android shared library.
pub const MODULE_NAME: &str = "deepseek-ocr-android";

pub const DEFAULT_TARGET: &str = "aarch64-linux-android";
pub const DEFAULT_ABI: &str = "arm64-v8a";
pub const DEFAULT_PROFILE: &str = "release";
pub const DEFAULT_OUT_DIR: &str = "target/android";
pub const DEFAULT_BINDGEN: &str = "uniffi-bindgen";
pub const DEFAULT_BINDINGS_DIR: &str = "bindings";

pub const ENV_TARGET: &str = "ANDROID_TARGET";
pub const ENV_ABI: &str = "ANDROID_ABI";
pub const ENV_PROFILE: &str = "ANDROID_PROFILE";
pub const ENV_OUT_DIR: &str = "ANDROID_OUT_DIR";
pub const ENV_BINDGEN: &str = "UNIFFI_BINDGEN";
pub const ENV_BINDINGS_DIR: &str = "BINDINGS_DIR";

/// Cargo build profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Profile {
    #[default]
    Release,
    /// Any other named profile, passed through verbatim.
    Custom(String),
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name == "release" {
            Profile::Release
        } else {
            Profile::Custom(name)
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Profile::Release => "release",
            Profile::Custom(name) => name,
        }
    }

    /// Cargo flags selecting this profile.
    pub fn cargo_flags(&self) -> Vec<String> {
        match self {
            Profile::Release => vec!["--release".to_string()],
            Profile::Custom(name) => vec!["--profile".to_string(), name.clone()],
        }
    }

    /// Directory cargo writes this profile's output to.
    ///
    /// `dev` and `test` land in `debug/`, `bench` in `release/`.
    pub fn output_dir_name(&self) -> &str {
        match self.name() {
            "dev" | "test" => "debug",
            "bench" => "release",
            other => other,
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Profile {
    fn from(name: &str) -> Self {
        Profile::new(name)
    }
}

/// One layer of optional configuration values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub target: Option<String>,
    pub abi: Option<String>,
    pub profile: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub bindgen: Option<String>,
    pub bindings_dir: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Read overrides through `lookup`. Empty values count as unset.
    ///
    /// Directory values are taken as raw OS strings. A non-Unicode value
    /// for a string option is ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let get_os = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let get = |key: &str| {
            get_os(key).and_then(|value| match value.into_string() {
                Ok(value) => Some(value),
                Err(value) => {
                    tracing::warn!(
                        "ignoring {}: {:?} is not valid Unicode",
                        key,
                        value
                    );
                    None
                }
            })
        };

        ConfigOverrides {
            target: get(ENV_TARGET),
            abi: get(ENV_ABI),
            profile: get(ENV_PROFILE),
            out_dir: get_os(ENV_OUT_DIR).map(PathBuf::from),
            bindgen: get(ENV_BINDGEN),
            bindings_dir: get_os(ENV_BINDINGS_DIR).map(PathBuf::from),
        }
    }

    /// Fill every unset field from `fallback`.
    pub fn or(self, fallback: ConfigOverrides) -> Self {
        ConfigOverrides {
            target: self.target.or(fallback.target),
            abi: self.abi.or(fallback.abi),
            profile: self.profile.or(fallback.profile),
            out_dir: self.out_dir.or(fallback.out_dir),
            bindgen: self.bindgen.or(fallback.bindgen),
            bindings_dir: self.bindings_dir.or(fallback.bindings_dir),
        }
    }
}

impl From<ConfigFile> for ConfigOverrides {
    fn from(file: ConfigFile) -> Self {
        ConfigOverrides {
            target: file.build.target,
            abi: file.build.abi,
            profile: file.build.profile,
            out_dir: file.build.out_dir,
            bindgen: file.bindings.generator,
            bindings_dir: file.bindings.out_dir,
        }
    }
}

/// Everything one build run needs to know. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    module: String,
    target: String,
    abi: String,
    profile: Profile,
    out_dir: PathBuf,
    bindgen: String,
    bindings_dir: PathBuf,
}

impl BuildConfiguration {
    /// Apply defaults to whatever `overrides` leaves unset.
    pub fn from_overrides(overrides: ConfigOverrides) -> Self {
        BuildConfiguration {
            module: MODULE_NAME.to_string(),
            target: overrides
                .target
                .unwrap_or_else(|| DEFAULT_TARGET.to_string()),
            abi: overrides.abi.unwrap_or_else(|| DEFAULT_ABI.to_string()),
            profile: Profile::new(
                overrides
                    .profile
                    .unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
            ),
            out_dir: overrides
                .out_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
            bindgen: overrides
                .bindgen
                .unwrap_or_else(|| DEFAULT_BINDGEN.to_string()),
            bindings_dir: overrides
                .bindings_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BINDINGS_DIR)),
        }
    }

    /// Resolve flags over environment over config file over defaults.
    pub fn resolve(flags: ConfigOverrides, env: ConfigOverrides, file: ConfigFile) -> Self {
        Self::from_overrides(flags.or(env).or(file.into()))
    }

    /// Defaults overridden by the process environment only.
    pub fn from_env() -> Self {
        Self::from_overrides(ConfigOverrides::from_env())
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn abi(&self) -> &str {
        &self.abi
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn bindgen(&self) -> &str {
        &self.bindgen
    }

    pub fn bindings_dir(&self) -> &Path {
        &self.bindings_dir
    }

    /// File name of the shared library this module compiles to.
    pub fn artifact_name(&self) -> String {
        artifact_file_name(&self.module)
    }
}

impl Default for BuildConfiguration {
    fn default() -> Self {
        Self::from_overrides(ConfigOverrides::default())
    }
}
