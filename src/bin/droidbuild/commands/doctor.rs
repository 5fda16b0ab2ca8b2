//! `droidbuild doctor` command

use std::path::Path;

use anyhow::Result;

use droidbuild::core::ConfigOverrides;
use droidbuild::ops::{doctor, format_report};
use droidbuild::util::{PathProbe, SystemRunner};

pub fn execute(config_path: Option<&Path>, verbose: bool) -> Result<()> {
    let config = super::resolve_config(ConfigOverrides::default(), config_path)?;

    let report = doctor(&config, &PathProbe, &mut SystemRunner);

    print!("{}", format_report(&report, verbose));

    // Exit with error code if required checks failed
    if !report.all_required_passed() {
        std::process::exit(1);
    }

    Ok(())
}
