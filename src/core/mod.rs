//! Core data structures for droidbuild.
//!
//! - Build configuration and profiles
//! - The compiled artifact and discovery outcome

pub mod artifact;
pub mod config;

pub use artifact::{artifact_file_name, BuildOutcome};
pub use config::{BuildConfiguration, ConfigOverrides, Profile};
