//! The two ways of compiling the Android library.
//!
//! Both strategies leave the shared library somewhere on disk; each knows
//! where it expects to find it.

use std::path::{Path, PathBuf};

use crate::core::config::BuildConfiguration;
use crate::error::BuildError;
use crate::locate::CandidatePathSet;
use crate::util::process::{CommandRunner, ProcessBuilder};
use crate::util::shell::{Shell, Status};

use super::provision::ensure_target_installed;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStrategy {
    /// `cargo ndk` with an explicit output directory. cargo-ndk handles
    /// target setup itself.
    Ndk {
        /// Resolved path of the `cargo-ndk` executable.
        helper: PathBuf,
    },

    /// `cargo build --target`, after making sure rustup has the target.
    Plain {
        /// Cargo's output root (`target` or `CARGO_TARGET_DIR`).
        target_root: PathBuf,
    },
}

impl BuildStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            BuildStrategy::Ndk { .. } => "cargo-ndk",
            BuildStrategy::Plain { .. } => "cargo build",
        }
    }

    /// The compiler invocation for this strategy.
    pub fn compile_command(&self, config: &BuildConfiguration) -> ProcessBuilder {
        let cmd = match self {
            BuildStrategy::Ndk { .. } => ProcessBuilder::new("cargo")
                .args(["ndk", "-t", config.abi(), "-o"])
                .arg(config.out_dir())
                .args(["build", "-p", config.module()]),
            BuildStrategy::Plain { .. } => ProcessBuilder::new("cargo").args([
                "build",
                "--target",
                config.target(),
                "-p",
                config.module(),
            ]),
        };
        cmd.args(config.profile().cargo_flags())
    }

    /// Compile the module, provisioning the target first on the plain path.
    ///
    /// The compiler's output goes straight to the terminal. A non-zero exit
    /// becomes [`BuildError::CompileFailure`] carrying the same code.
    pub fn build(
        &self,
        config: &BuildConfiguration,
        runner: &mut dyn CommandRunner,
        shell: &Shell,
    ) -> Result<(), BuildError> {
        match self {
            BuildStrategy::Ndk { .. } => {
                shell.status(
                    Status::Compiling,
                    format!(
                        "{} via cargo-ndk ({}, {})",
                        config.module(),
                        config.abi(),
                        config.profile()
                    ),
                );
            }
            BuildStrategy::Plain { .. } => {
                ensure_target_installed(config.target(), runner, shell)?;
                shell.status(
                    Status::Compiling,
                    format!(
                        "{} via cargo build ({}, {})",
                        config.module(),
                        config.target(),
                        config.profile()
                    ),
                );
            }
        }

        let cmd = self.compile_command(config);
        let status = runner.run(&cmd).map_err(|source| BuildError::Spawn {
            command: cmd.display_command(),
            source,
        })?;

        if !status.success() {
            return Err(BuildError::CompileFailure {
                module: config.module().to_string(),
                command: cmd.display_command(),
                code: status.code,
            });
        }

        Ok(())
    }

    /// Where this strategy's output is expected, most specific first.
    ///
    /// cargo-ndk has written both `<out>/<abi>/<profile>/` and `<out>/<abi>/`
    /// depending on its version.
    pub fn candidate_paths(&self, config: &BuildConfiguration) -> CandidatePathSet {
        let file_name = config.artifact_name();
        let profile_dir = config.profile().output_dir_name();

        match self {
            BuildStrategy::Ndk { .. } => {
                let abi_dir = config.out_dir().join(config.abi());
                CandidatePathSet::from_iter([
                    abi_dir.join(profile_dir).join(&file_name),
                    abi_dir.join(&file_name),
                ])
            }
            BuildStrategy::Plain { target_root } => CandidatePathSet::from_iter([target_root
                .join(config.target())
                .join(profile_dir)
                .join(&file_name)]),
        }
    }

    /// Root of the recursive fallback search.
    pub fn search_root<'a>(&'a self, config: &'a BuildConfiguration) -> &'a Path {
        match self {
            BuildStrategy::Ndk { .. } => config.out_dir(),
            BuildStrategy::Plain { target_root } => target_root,
        }
    }
}
