//! High-level operations.
//!
//! This module contains the implementation of droidbuild commands.

pub mod android_build;
pub mod doctor;

pub use android_build::{build, locate, BuildOptions, BuildReport};
pub use doctor::{doctor, format_report, CheckResult, DoctorReport};
