//! `droidbuild locate` command

use std::path::Path;

use anyhow::Result;

use crate::cli::LocateArgs;
use droidbuild::ops::android_build::{locate, BuildOptions};
use droidbuild::util::{PathProbe, Shell};

pub fn execute(args: LocateArgs, config_path: Option<&Path>) -> Result<()> {
    let config = super::resolve_config(args.config.into_overrides(), config_path)?;

    // Stdout carries only the path.
    let artifact = locate(&config, &BuildOptions::default(), &PathProbe, &Shell::quiet())?;
    println!("{}", artifact.display());

    Ok(())
}
