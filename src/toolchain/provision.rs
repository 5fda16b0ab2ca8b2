//! Rust target provisioning through rustup.

use crate::error::BuildError;
use crate::util::process::{CommandRunner, ProcessBuilder, ProcessOutput};
use crate::util::shell::{Shell, Status};

/// What [`ensure_target_installed`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioning {
    AlreadyInstalled,
    Installed,
}

fn list_command() -> ProcessBuilder {
    ProcessBuilder::new("rustup").args(["target", "list", "--installed"])
}

fn add_command(target: &str) -> ProcessBuilder {
    ProcessBuilder::new("rustup").args(["target", "add", target])
}

/// Captured `rustup target list --installed` run.
struct TargetListing {
    command: String,
    output: ProcessOutput,
}

fn list_installed(runner: &mut dyn CommandRunner) -> Result<TargetListing, BuildError> {
    let cmd = list_command();
    let output = runner.capture(&cmd).map_err(|source| BuildError::Spawn {
        command: cmd.display_command(),
        source,
    })?;

    Ok(TargetListing {
        command: cmd.display_command(),
        output,
    })
}

impl TargetListing {
    fn into_targets(self, target: &str) -> Result<Vec<String>, BuildError> {
        if !self.output.status.success() {
            return Err(BuildError::ProvisioningFailure {
                target: target.to_string(),
                command: self.command,
                code: self.output.status.code,
            });
        }

        Ok(self
            .output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }
}

/// Targets rustup reports as installed for the active toolchain.
///
/// rustup's stderr is not shown; callers decide how to report a failure.
pub fn installed_targets(
    target: &str,
    runner: &mut dyn CommandRunner,
) -> Result<Vec<String>, BuildError> {
    list_installed(runner)?.into_targets(target)
}

/// Install `target` unless rustup already lists it.
///
/// `rustup target add` is itself idempotent; the listing only avoids the
/// round trip when nothing needs doing.
pub fn ensure_target_installed(
    target: &str,
    runner: &mut dyn CommandRunner,
    shell: &Shell,
) -> Result<Provisioning, BuildError> {
    let listing = list_installed(runner)?;
    if !listing.output.status.success() {
        // The listing was captured; replay rustup's own diagnostic.
        eprint!("{}", listing.output.stderr);
    }

    if listing.into_targets(target)?.iter().any(|t| t == target) {
        tracing::debug!("target {} already installed", target);
        return Ok(Provisioning::AlreadyInstalled);
    }

    shell.status(Status::Provisioning, format!("rustup target {}", target));

    let cmd = add_command(target);
    let status = runner.run(&cmd).map_err(|source| BuildError::Spawn {
        command: cmd.display_command(),
        source,
    })?;

    if !status.success() {
        return Err(BuildError::ProvisioningFailure {
            target: target.to_string(),
            command: cmd.display_command(),
            code: status.code,
        });
    }

    shell.status(Status::Installed, format!("rustup target {}", target));
    Ok(Provisioning::Installed)
}
