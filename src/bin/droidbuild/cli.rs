//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use droidbuild::core::ConfigOverrides;
use droidbuild::util::shell::ColorChoice;

/// droidbuild - Build the Android OCR library and its Kotlin bindings
#[derive(Parser)]
#[command(name = "droidbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// Read configuration from this file instead of droidbuild.toml
    #[arg(long, global = true, value_name = "PATH", env = "DROIDBUILD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Defaults to `build` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile the library, locate it and generate bindings
    Build(BuildArgs),

    /// Print the path of an already built library
    Locate(LocateArgs),

    /// Check that the build toolchain is installed
    Doctor,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options that override the environment and config files.
#[derive(Args, Default)]
pub struct ConfigArgs {
    /// Rust target triple for the plain cargo build
    #[arg(long, value_name = "TRIPLE")]
    pub target: Option<String>,

    /// Android ABI for cargo-ndk
    #[arg(long)]
    pub abi: Option<String>,

    /// Cargo profile (release or a custom profile name)
    #[arg(long)]
    pub profile: Option<String>,

    /// cargo-ndk output directory
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn into_overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            target: self.target,
            abi: self.abi,
            profile: self.profile,
            out_dir: self.out_dir,
            ..Default::default()
        }
    }
}

#[derive(Args, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Binding generator executable
    #[arg(long, value_name = "PROGRAM")]
    pub bindgen: Option<String>,

    /// Directory for generated Kotlin sources
    #[arg(long, value_name = "DIR")]
    pub bindings_dir: Option<PathBuf>,

    /// Don't generate bindings
    #[arg(long)]
    pub skip_bindings: bool,
}

impl BuildArgs {
    pub fn into_overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            bindgen: self.bindgen,
            bindings_dir: self.bindings_dir,
            ..self.config.into_overrides()
        }
    }
}

#[derive(Args)]
pub struct LocateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
