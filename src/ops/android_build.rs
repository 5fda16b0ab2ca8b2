//! Implementation of `droidbuild build` and `droidbuild locate`.
//!
//! The pipeline is strictly sequential and each step gates the next:
//!
//! ```text
//! select strategy -> compile (provision first on the plain path)
//!                 -> locate artifact -> generate bindings
//! ```

use std::path::PathBuf;

use crate::bindgen::{generate_bindings, BindingOutcome};
use crate::core::config::BuildConfiguration;
use crate::error::BuildError;
use crate::locate::{ArtifactLocator, LocatedArtifact, LookupStep};
use crate::toolchain::{default_target_root, select_strategy, BuildStrategy, NDK_HELPER};
use crate::util::process::{CommandRunner, ToolProbe};
use crate::util::shell::{Shell, Status};

/// Options for the build command.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Don't run the binding generator even if it is installed
    pub skip_bindings: bool,

    /// Cargo's output root for the plain strategy
    pub target_root: PathBuf,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            skip_bindings: false,
            target_root: default_target_root(),
        }
    }
}

/// What a successful build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub strategy: BuildStrategy,
    pub artifact: PathBuf,
    /// Which lookup step found the artifact.
    pub found_by: LookupStep,
    pub bindings: BindingOutcome,
}

/// Compile the module, locate the library and generate bindings.
pub fn build(
    config: &BuildConfiguration,
    opts: &BuildOptions,
    probe: &dyn ToolProbe,
    runner: &mut dyn CommandRunner,
    shell: &Shell,
) -> Result<BuildReport, BuildError> {
    let strategy = choose_strategy(config, opts, probe, shell);

    strategy.build(config, runner, shell)?;

    let LocatedArtifact {
        path: artifact,
        found_by,
    } = locate_artifact(&strategy, config, shell)?;

    let bindings = if opts.skip_bindings {
        shell.status(Status::Skipped, "bindings: disabled");
        BindingOutcome::Disabled
    } else {
        generate_bindings(config, &artifact, probe, runner, shell)?
    };

    Ok(BuildReport {
        strategy,
        artifact,
        found_by,
        bindings,
    })
}

/// Locate a previously built library without compiling.
pub fn locate(
    config: &BuildConfiguration,
    opts: &BuildOptions,
    probe: &dyn ToolProbe,
    shell: &Shell,
) -> Result<PathBuf, BuildError> {
    let strategy = choose_strategy(config, opts, probe, shell);
    Ok(locate_artifact(&strategy, config, shell)?.path)
}

fn choose_strategy(
    config: &BuildConfiguration,
    opts: &BuildOptions,
    probe: &dyn ToolProbe,
    shell: &Shell,
) -> BuildStrategy {
    let strategy = select_strategy(probe, opts.target_root.clone());

    match &strategy {
        BuildStrategy::Ndk { helper } => shell.note(format!(
            "{} found at {}, building for ABI {}",
            NDK_HELPER,
            helper.display(),
            config.abi()
        )),
        BuildStrategy::Plain { .. } => shell.note(format!(
            "{} not found, building with cargo for {}",
            NDK_HELPER,
            config.target()
        )),
    }

    strategy
}

fn locate_artifact(
    strategy: &BuildStrategy,
    config: &BuildConfiguration,
    shell: &Shell,
) -> Result<LocatedArtifact, BuildError> {
    let locator = ArtifactLocator::for_strategy(strategy, config);
    shell.status(
        Status::Locating,
        format!(
            "{} ({} output under {})",
            locator.file_name(),
            strategy.name(),
            locator.search_root().display()
        ),
    );

    let artifact = locator.require()?;
    shell.status(
        Status::Finished,
        format!("{} -> {}", locator.file_name(), artifact.path.display()),
    );
    Ok(artifact)
}
