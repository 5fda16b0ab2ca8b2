//! Test utilities and mocks for droidbuild unit tests.
//!
//! Provides stand-ins for the two seams the pipeline talks to the outside
//! world through: [`MockProbe`] for executable lookup and [`MockRunner`]
//! for subprocess execution.
//!
//! # Example
//!
//! ```rust,ignore
//! use droidbuild::test_support::{MockProbe, MockRunner, MockProcessOutput};
//!
//! let probe = MockProbe::with_tools(&["cargo", "rustup"]);
//! let mut runner = MockRunner::new();
//! runner.expect("rustup target list --installed", MockProcessOutput::success(""));
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::util::process::{CommandRunner, ProcessBuilder, ProcessOutput, ProcessStatus, ToolProbe};

pub use fixtures::*;

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (`None` = killed by a signal).
    pub status: Option<i32>,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status: Some(status),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Create an output for a process killed by a signal.
    pub fn signalled() -> Self {
        MockProcessOutput {
            status: None,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    fn to_output(&self) -> ProcessOutput {
        ProcessOutput {
            status: ProcessStatus::from_code(self.status),
            stdout: self.stdout.clone(),
            stderr: self.stderr.clone(),
        }
    }
}

impl Default for MockProcessOutput {
    fn default() -> Self {
        MockProcessOutput::success("")
    }
}

/// Pattern for matching commands in [`MockRunner`].
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
}

impl CommandPattern {
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
        }
    }
}

/// A side effect applied when an expectation fires, such as the file a
/// compiler would have written.
type Effect = Box<dyn Fn() + 'static>;

/// Expectation for a command execution.
pub struct CommandExpectation {
    pub pattern: CommandPattern,
    pub output: MockProcessOutput,
    /// Number of times this expectation can be used (None = unlimited).
    pub times: Option<usize>,
    pub used: usize,
    effect: Option<Effect>,
}

impl CommandExpectation {
    pub fn new(pattern: CommandPattern, output: MockProcessOutput) -> Self {
        CommandExpectation {
            pattern,
            output,
            times: None,
            used: 0,
            effect: None,
        }
    }

    /// Limit how many times this expectation can be used.
    pub fn times(mut self, n: usize) -> Self {
        self.times = Some(n);
        self
    }

    /// Run `effect` every time this expectation matches.
    pub fn with_effect(mut self, effect: impl Fn() + 'static) -> Self {
        self.effect = Some(Box::new(effect));
        self
    }

    fn available(&self) -> bool {
        match self.times {
            Some(n) => self.used < n,
            None => true,
        }
    }
}

/// Mock [`CommandRunner`].
///
/// Records every command and answers with the first matching expectation.
/// Unmatched commands fail to spawn with `NotFound`, like a missing tool.
#[derive(Default)]
pub struct MockRunner {
    expectations: Vec<CommandExpectation>,
    calls: Vec<String>,
}

impl MockRunner {
    pub fn new() -> Self {
        MockRunner::default()
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&mut self, cmd: &str, output: MockProcessOutput) -> &mut Self {
        self.expectations.push(CommandExpectation::new(
            CommandPattern::Exact(cmd.to_string()),
            output,
        ));
        self
    }

    /// Add an expectation for a command starting with a prefix.
    pub fn expect_prefix(&mut self, prefix: &str, output: MockProcessOutput) -> &mut Self {
        self.expectations.push(CommandExpectation::new(
            CommandPattern::StartsWith(prefix.to_string()),
            output,
        ));
        self
    }

    /// Add a custom expectation.
    pub fn expect_pattern(&mut self, expectation: CommandExpectation) -> &mut Self {
        self.expectations.push(expectation);
        self
    }

    /// All commands that were run, in order.
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// Index of the first call starting with `prefix`.
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.calls.iter().position(|c| c.starts_with(prefix))
    }

    /// Whether any call started with `prefix`.
    pub fn was_called(&self, prefix: &str) -> bool {
        self.position(prefix).is_some()
    }

    /// Verify that all expectations with a specific count were satisfied.
    pub fn verify(&self) -> Result<()> {
        for (i, exp) in self.expectations.iter().enumerate() {
            if let Some(expected) = exp.times {
                if exp.used != expected {
                    bail!(
                        "expectation {} ({:?}) was used {} times, expected {}",
                        i,
                        exp.pattern,
                        exp.used,
                        expected
                    );
                }
            }
        }
        Ok(())
    }

    fn answer(&mut self, cmd: &ProcessBuilder) -> io::Result<ProcessOutput> {
        let full_cmd = cmd.display_command();
        self.calls.push(full_cmd.clone());

        for exp in &mut self.expectations {
            if exp.pattern.matches(&full_cmd) && exp.available() {
                exp.used += 1;
                if let Some(effect) = &exp.effect {
                    effect();
                }
                return Ok(exp.output.to_output());
            }
        }

        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("unexpected command: {}", full_cmd),
        ))
    }
}

impl CommandRunner for MockRunner {
    fn run(&mut self, cmd: &ProcessBuilder) -> io::Result<ProcessStatus> {
        self.answer(cmd).map(|output| output.status)
    }

    fn capture(&mut self, cmd: &ProcessBuilder) -> io::Result<ProcessOutput> {
        self.answer(cmd)
    }
}

/// Mock [`ToolProbe`] with a fixed set of installed tools.
#[derive(Debug, Clone, Default)]
pub struct MockProbe {
    tools: HashMap<String, PathBuf>,
}

impl MockProbe {
    pub fn new() -> Self {
        MockProbe::default()
    }

    /// Probe that finds each of `names` under `/usr/local/bin`.
    pub fn with_tools(names: &[&str]) -> Self {
        let mut probe = MockProbe::new();
        for name in names {
            probe.add(name, Path::new("/usr/local/bin").join(name));
        }
        probe
    }

    pub fn add(&mut self, name: &str, path: impl Into<PathBuf>) -> &mut Self {
        self.tools.insert(name.to_string(), path.into());
        self
    }
}

impl ToolProbe for MockProbe {
    fn find(&self, name: &str) -> Option<PathBuf> {
        self.tools.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_mock_runner_records_calls() {
        let mut runner = MockRunner::new();
        runner.expect("cargo --version", MockProcessOutput::success("cargo 1.80.0"));

        let output = runner
            .capture(&ProcessBuilder::new("cargo").arg("--version"))
            .unwrap();

        assert_eq!(output.stdout, "cargo 1.80.0");
        assert_eq!(runner.calls(), &["cargo --version".to_string()]);
    }

    #[test]
    fn test_mock_runner_unexpected_command() {
        let mut runner = MockRunner::new();
        let err = runner.run(&ProcessBuilder::new("rustup")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_mock_runner_times_and_effects() {
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);

        let mut runner = MockRunner::new();
        runner.expect_pattern(
            CommandExpectation::new(
                CommandPattern::StartsWith("cargo build".into()),
                MockProcessOutput::success(""),
            )
            .times(1)
            .with_effect(move || counter.set(counter.get() + 1)),
        );

        let cmd = ProcessBuilder::new("cargo").arg("build");
        assert!(runner.run(&cmd).unwrap().success());
        assert!(runner.run(&cmd).is_err());
        assert_eq!(fired.get(), 1);
        runner.verify().unwrap();
    }

    #[test]
    fn test_mock_probe() {
        let probe = MockProbe::with_tools(&["cargo-ndk"]);
        assert!(probe.is_available("cargo-ndk"));
        assert!(!probe.is_available("uniffi-bindgen"));
        assert_eq!(
            probe.find("cargo-ndk"),
            Some(PathBuf::from("/usr/local/bin/cargo-ndk"))
        );
    }
}
