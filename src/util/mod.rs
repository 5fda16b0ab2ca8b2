//! Shared utilities

pub mod config;
pub mod fs;
pub mod process;
pub mod shell;

pub use config::ConfigFile;
pub use process::{CommandRunner, PathProbe, ProcessBuilder, SystemRunner, ToolProbe};
pub use shell::Shell;
