//! Command implementations

pub mod build;
pub mod completions;
pub mod doctor;
pub mod locate;

use std::path::Path;

use anyhow::Result;

use droidbuild::core::{BuildConfiguration, ConfigOverrides};
use droidbuild::util::config::{global_config_path, load_config, project_config_path};
use droidbuild::util::ConfigFile;

/// Resolve flags over environment over config file over defaults.
///
/// An explicit `--config` must exist and parse; the implicit global and
/// project files are skipped when missing.
pub fn resolve_config(
    flags: ConfigOverrides,
    config_path: Option<&Path>,
) -> Result<BuildConfiguration> {
    let file = match config_path {
        Some(path) => ConfigFile::load(path)?,
        None => load_config(
            global_config_path().as_deref(),
            &project_config_path(Path::new(".")),
        ),
    };

    Ok(BuildConfiguration::resolve(
        flags,
        ConfigOverrides::from_env(),
        file,
    ))
}
