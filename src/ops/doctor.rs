//! Environment and toolchain health checks.
//!
//! The `doctor` command verifies that the tools a build needs are on PATH
//! before anything is compiled.
//!
//! ## Usage
//!
//! ```bash
//! droidbuild doctor           # Quick check
//! droidbuild -v doctor        # Paths, versions and details
//! ```
//!
//! ## Checks Performed
//!
//! - cargo (required)
//! - cargo-ndk (optional, selects the NDK build path)
//! - rustup (required when cargo-ndk is missing)
//! - The configured Rust target is installed (optional, installed on first build)
//! - The binding generator (optional)

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::core::config::BuildConfiguration;
use crate::toolchain::{installed_targets, NDK_HELPER};
use crate::util::process::{CommandRunner, ProcessBuilder, ToolProbe};

/// Result of a single health check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,

    /// Whether the check passed
    pub passed: bool,

    /// Human-readable status message
    pub message: String,

    /// Path to the tool (if applicable)
    pub path: Option<PathBuf>,

    /// Version string (if applicable)
    pub version: Option<String>,

    /// How long the check took
    pub duration: Duration,

    /// Whether this check is required or optional
    pub required: bool,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: true,
            message: message.into(),
            path: None,
            version: None,
            duration: Duration::ZERO,
            required: true,
        }
    }

    /// Create a failing check result.
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            passed: false,
            ..CheckResult::pass(name, message)
        }
    }

    /// Mark this check as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set whether this check is required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Summary of all health checks.
#[derive(Debug, Clone, Default)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,

    /// Total time taken
    pub total_duration: Duration,
}

impl DoctorReport {
    pub fn new() -> Self {
        DoctorReport::default()
    }

    pub fn add(&mut self, check: CheckResult) {
        self.checks.push(check);
    }

    /// Look up a check by name.
    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// Check if all required checks passed.
    pub fn all_required_passed(&self) -> bool {
        self.checks.iter().filter(|c| c.required).all(|c| c.passed)
    }

    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    pub fn required_failed_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.required && !c.passed)
            .count()
    }
}

/// Run the doctor checks against `config`.
pub fn doctor(
    config: &BuildConfiguration,
    probe: &dyn ToolProbe,
    runner: &mut dyn CommandRunner,
) -> DoctorReport {
    let start = Instant::now();
    let mut report = DoctorReport::new();

    report.add(check_tool(
        "cargo",
        "cargo",
        "cargo not found (install Rust from https://rustup.rs)",
        probe,
        runner,
    ));

    let ndk = check_tool(
        "cargo-ndk",
        NDK_HELPER,
        "cargo-ndk not found, builds fall back to `cargo build --target`",
        probe,
        runner,
    )
    .optional();
    let has_ndk = ndk.passed;
    report.add(ndk);

    // Without cargo-ndk the plain path needs rustup to provision the target.
    let rustup = check_tool(
        "rustup",
        "rustup",
        "rustup not found (needed to install Rust targets)",
        probe,
        runner,
    )
    .required(!has_ndk);
    let has_rustup = rustup.passed;
    report.add(rustup);

    if has_rustup {
        report.add(check_target(config.target(), runner));
    }

    report.add(
        check_tool(
            "Binding generator",
            config.bindgen(),
            &format!("{} not found, bindings will be skipped", config.bindgen()),
            probe,
            runner,
        )
        .optional(),
    );

    report.total_duration = start.elapsed();
    report
}

/// Check that `program` is on PATH and ask it for a version.
fn check_tool(
    name: &str,
    program: &str,
    missing: &str,
    probe: &dyn ToolProbe,
    runner: &mut dyn CommandRunner,
) -> CheckResult {
    let start = Instant::now();

    let Some(path) = probe.find(program) else {
        return CheckResult::fail(name, missing).with_duration(start.elapsed());
    };

    let version = tool_version(&path, runner).unwrap_or_else(|| "unknown version".to_string());

    CheckResult::pass(name, format!("{} is available", program))
        .with_path(path)
        .with_version(version)
        .with_duration(start.elapsed())
}

/// First line of `<tool> --version`.
fn tool_version(path: &Path, runner: &mut dyn CommandRunner) -> Option<String> {
    let output = runner
        .capture(&ProcessBuilder::new(path).arg("--version"))
        .ok()?;
    if !output.status.success() {
        return None;
    }
    output
        .stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}

fn check_target(target: &str, runner: &mut dyn CommandRunner) -> CheckResult {
    let start = Instant::now();
    let name = format!("Target {}", target);

    let result = match installed_targets(target, runner) {
        Ok(targets) if targets.iter().any(|t| t == target) => {
            CheckResult::pass(name, format!("{} is installed", target))
        }
        Ok(_) => CheckResult::fail(
            name,
            format!("{} is not installed (the first build will add it)", target),
        ),
        Err(e) => CheckResult::fail(name, format!("could not list targets: {}", e)),
    };

    result.optional().with_duration(start.elapsed())
}

/// Format the doctor report for display.
pub fn format_report(report: &DoctorReport, verbose: bool) -> String {
    use std::fmt::Write;

    let mut output = String::new();

    let _ = writeln!(output, "droidbuild doctor");
    let _ = writeln!(output, "=================\n");

    let _ = writeln!(output, "Checks:");
    for check in &report.checks {
        let status = if check.passed { "[OK]" } else { "[!!]" };
        let required = if check.required { "" } else { " (optional)" };

        let _ = writeln!(output, "  {} {}{}", status, check.name, required);

        if verbose || !check.passed {
            let _ = writeln!(output, "      {}", check.message);
        }
        if verbose {
            if let Some(path) = &check.path {
                let _ = writeln!(output, "      Path: {}", path.display());
            }
            if let Some(version) = &check.version {
                let _ = writeln!(output, "      Version: {}", version);
            }
        }
    }

    let _ = writeln!(output);

    let passed = report.passed_count();
    let failed = report.failed_count();
    let required_failed = report.required_failed_count();

    let _ = writeln!(output, "Summary: {} passed, {} failed", passed, failed);

    if required_failed > 0 {
        let _ = writeln!(
            output,
            "\n{} required check(s) failed. Builds will not work until they are fixed.",
            required_failed
        );
    } else if failed > 0 {
        let _ = writeln!(
            output,
            "\nAll required checks passed. {} optional check(s) failed.",
            failed
        );
    } else {
        let _ = writeln!(output, "\nAll checks passed. Ready to build.");
    }

    output
}
