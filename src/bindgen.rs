//! Kotlin binding generation with uniffi-bindgen.
//!
//! Optional: when the generator isn't installed the step is skipped with a
//! warning and the build still succeeds.

use std::path::{Path, PathBuf};

use crate::core::config::BuildConfiguration;
use crate::error::BuildError;
use crate::util::fs::ensure_dir;
use crate::util::process::{CommandRunner, ProcessBuilder, ToolProbe};
use crate::util::shell::{Shell, Status};

/// Language passed to the generator.
pub const BINDING_LANGUAGE: &str = "kotlin";

/// What happened to binding generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingOutcome {
    Generated { out_dir: PathBuf },
    /// The generator executable wasn't found.
    Skipped { generator: String },
    /// Disabled by the caller.
    Disabled,
}

/// The generator invocation for `artifact`.
pub fn generate_command(config: &BuildConfiguration, artifact: &Path) -> ProcessBuilder {
    ProcessBuilder::new(config.bindgen())
        .args(["generate", "--library"])
        .arg(artifact)
        .args(["--language", BINDING_LANGUAGE, "--out-dir"])
        .arg(config.bindings_dir())
}

/// Generate bindings for `artifact` if the configured generator is installed.
///
/// A generator failure is fatal to the run; the artifact stays on disk.
pub fn generate_bindings(
    config: &BuildConfiguration,
    artifact: &Path,
    probe: &dyn ToolProbe,
    runner: &mut dyn CommandRunner,
    shell: &Shell,
) -> Result<BindingOutcome, BuildError> {
    let generator = config.bindgen();

    if !probe.is_available(generator) {
        tracing::debug!("{} not found on PATH", generator);
        shell.warn(format!(
            "`{}` not found, skipping {} bindings",
            generator, BINDING_LANGUAGE
        ));
        return Ok(BindingOutcome::Skipped {
            generator: generator.to_string(),
        });
    }

    let out_dir = config.bindings_dir();
    ensure_dir(out_dir).map_err(|source| BuildError::CreateDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    shell.status(
        Status::Generating,
        format!("{} bindings into {}", BINDING_LANGUAGE, out_dir.display()),
    );

    let cmd = generate_command(config, artifact);
    let status = runner.run(&cmd).map_err(|source| BuildError::Spawn {
        command: cmd.display_command(),
        source,
    })?;

    if !status.success() {
        return Err(BuildError::BindingGenerationFailure {
            artifact: artifact.to_path_buf(),
            command: cmd.display_command(),
            code: status.code,
        });
    }

    Ok(BindingOutcome::Generated {
        out_dir: out_dir.to_path_buf(),
    })
}
