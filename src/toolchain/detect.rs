//! Toolchain selection.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::util::process::ToolProbe;

use super::BuildStrategy;

/// The cross-compilation helper looked up on PATH.
pub const NDK_HELPER: &str = "cargo-ndk";

/// Cargo's output root when `CARGO_TARGET_DIR` is unset.
pub const DEFAULT_TARGET_ROOT: &str = "target";

/// Pick the build strategy for this run.
///
/// `cargo-ndk` on PATH selects [`BuildStrategy::Ndk`]; otherwise the plain
/// cargo path is used, writing under `target_root`. Call once per run.
pub fn select_strategy(probe: &dyn ToolProbe, target_root: PathBuf) -> BuildStrategy {
    match probe.find(NDK_HELPER) {
        Some(helper) => {
            tracing::debug!("found {} at {}", NDK_HELPER, helper.display());
            BuildStrategy::Ndk { helper }
        }
        None => {
            tracing::debug!("{} not on PATH, using plain cargo", NDK_HELPER);
            BuildStrategy::Plain { target_root }
        }
    }
}

/// Cargo's output root for this process.
pub fn default_target_root() -> PathBuf {
    target_root_from(std::env::var_os("CARGO_TARGET_DIR"))
}

fn target_root_from(cargo_target_dir: Option<OsString>) -> PathBuf {
    cargo_target_dir
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TARGET_ROOT))
}
