//! `droidbuild build` command

use std::path::Path;

use anyhow::Result;

use crate::cli::BuildArgs;
use droidbuild::bindgen::BindingOutcome;
use droidbuild::ops::android_build::{build, BuildOptions};
use droidbuild::util::{PathProbe, Shell, SystemRunner};

pub fn execute(args: BuildArgs, config_path: Option<&Path>, shell: &Shell) -> Result<()> {
    let skip_bindings = args.skip_bindings;
    let config = super::resolve_config(args.into_overrides(), config_path)?;
    tracing::debug!("resolved configuration: {:?}", config);

    let opts = BuildOptions {
        skip_bindings,
        ..Default::default()
    };

    let report = build(&config, &opts, &PathProbe, &mut SystemRunner, shell)?;

    if let BindingOutcome::Generated { out_dir } = &report.bindings {
        shell.note(format!("bindings written to {}", out_dir.display()));
    }

    Ok(())
}
