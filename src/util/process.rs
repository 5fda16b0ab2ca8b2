//! Subprocess execution utilities.
//!
//! Every external tool droidbuild drives (`cargo`, `rustup`, the binding
//! generator) goes through a [`ProcessBuilder`] handed to a
//! [`CommandRunner`]. Executable discovery goes through a [`ToolProbe`].
//! Both traits exist so the orchestration can be exercised without a real
//! Android toolchain installed.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Builder for subprocess execution.
///
/// Arguments are kept as `OsString` so paths reach the child byte for byte.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_os_string()));
        self
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    /// Run with inherited stdio and wait for completion.
    ///
    /// The child's diagnostics go straight to the user's terminal.
    pub fn status(&self) -> io::Result<ProcessStatus> {
        let status = self.build_command().status()?;
        Ok(ProcessStatus::from_code(status.code()))
    }

    /// Run with captured stdout and stderr and wait for completion.
    pub fn output(&self) -> io::Result<ProcessOutput> {
        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output()?;
        Ok(ProcessOutput {
            status: ProcessStatus::from_code(output.status.code()),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Display the command for error messages.
    ///
    /// Lossy: non-UTF-8 bytes are shown as U+FFFD here but passed to the
    /// child unchanged.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

/// Exit status of a finished subprocess.
///
/// `code` is `None` when the process was terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    pub code: Option<i32>,
}

impl ProcessStatus {
    pub fn from_code(code: Option<i32>) -> Self {
        ProcessStatus { code }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Captured result of a finished subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub status: ProcessStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Executes subprocesses on behalf of the build pipeline.
///
/// Calls block until the child exits. There is no timeout.
pub trait CommandRunner {
    /// Run with the terminal attached.
    fn run(&mut self, cmd: &ProcessBuilder) -> io::Result<ProcessStatus>;

    /// Run and collect stdout/stderr.
    fn capture(&mut self, cmd: &ProcessBuilder) -> io::Result<ProcessOutput>;
}

/// [`CommandRunner`] that spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, cmd: &ProcessBuilder) -> io::Result<ProcessStatus> {
        tracing::debug!("running `{}`", cmd.display_command());
        cmd.status()
    }

    fn capture(&mut self, cmd: &ProcessBuilder) -> io::Result<ProcessOutput> {
        tracing::debug!("capturing `{}`", cmd.display_command());
        cmd.output()
    }
}

/// Looks up executables on the search path.
pub trait ToolProbe {
    /// Resolve `name` to an executable path, if one exists.
    fn find(&self, name: &str) -> Option<PathBuf>;

    fn is_available(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}

/// [`ToolProbe`] backed by the process `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathProbe;

impl ToolProbe for PathProbe {
    fn find(&self, name: &str) -> Option<PathBuf> {
        find_executable(name)
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
