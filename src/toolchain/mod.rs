//! Toolchain selection and the build strategies.
//!
//! Selection happens once per run:
//! 1. `cargo-ndk` on PATH: [`BuildStrategy::Ndk`]
//! 2. Otherwise: [`BuildStrategy::Plain`], with rustup provisioning

mod detect;
mod provision;
mod strategy;

pub use detect::{default_target_root, select_strategy, DEFAULT_TARGET_ROOT, NDK_HELPER};
pub use provision::{ensure_target_installed, installed_targets, Provisioning};
pub use strategy::BuildStrategy;
