//! droidbuild - builds the Android shared library for the OCR module
//!
//! This crate compiles `deepseek-ocr-android` for an Android target with
//! cargo-ndk or plain cargo, finds the resulting `.so` and generates Kotlin
//! bindings for it.

pub mod bindgen;
pub mod core;
pub mod error;
pub mod locate;
pub mod ops;
pub mod toolchain;
pub mod util;

/// Test utilities and mocks for droidbuild unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides mock implementations for tool lookup and
/// process execution, plus scratch build-output trees.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{BuildConfiguration, BuildOutcome, ConfigOverrides, Profile};
pub use error::BuildError;
pub use locate::{ArtifactLocator, CandidatePathSet};
pub use toolchain::BuildStrategy;
