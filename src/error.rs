//! Errors that abort a build run.
//!
//! A missing `cargo-ndk` or binding generator is not an error: the first
//! selects the plain cargo path, the second skips binding generation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to provision target `{target}`: `{command}` {}", describe_exit(*code))]
    ProvisioningFailure {
        target: String,
        command: String,
        code: Option<i32>,
    },

    #[error("failed to compile `{module}`: `{command}` {}", describe_exit(*code))]
    CompileFailure {
        module: String,
        command: String,
        code: Option<i32>,
    },

    #[error(
        "could not locate `{file_name}`: no candidate path exists and nothing matched under {}",
        search_root.display()
    )]
    ArtifactNotFound {
        file_name: String,
        search_root: PathBuf,
        candidates: Vec<PathBuf>,
    },

    #[error(
        "binding generation failed for {}: `{command}` {}",
        artifact.display(),
        describe_exit(*code)
    )]
    BindingGenerationFailure {
        artifact: PathBuf,
        command: String,
        code: Option<i32>,
    },

    #[error("failed to run `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    /// Process exit code for this failure.
    ///
    /// Tool failures carry the tool's own exit code. Everything else,
    /// including a missing artifact, exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::ProvisioningFailure { code, .. }
            | BuildError::CompileFailure { code, .. }
            | BuildError::BindingGenerationFailure { code, .. } => {
                code.filter(|c| *c != 0).unwrap_or(1)
            }
            BuildError::ArtifactNotFound { .. }
            | BuildError::Spawn { .. }
            | BuildError::CreateDir { .. } => 1,
        }
    }
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let compile = BuildError::CompileFailure {
            module: "m".into(),
            command: "cargo build".into(),
            code: Some(101),
        };
        assert_eq!(compile.exit_code(), 101);

        let signalled = BuildError::BindingGenerationFailure {
            artifact: PathBuf::from("libm.so"),
            command: "uniffi-bindgen generate".into(),
            code: None,
        };
        assert_eq!(signalled.exit_code(), 1);

        let missing = BuildError::ArtifactNotFound {
            file_name: "libm.so".into(),
            search_root: PathBuf::from("target"),
            candidates: vec![],
        };
        assert_eq!(missing.exit_code(), 1);
    }

    #[test]
    fn test_messages() {
        let err = BuildError::ProvisioningFailure {
            target: "aarch64-linux-android".into(),
            command: "rustup target add aarch64-linux-android".into(),
            code: Some(2),
        };
        assert_eq!(
            err.to_string(),
            "failed to provision target `aarch64-linux-android`: \
             `rustup target add aarch64-linux-android` exited with status 2"
        );

        let err = BuildError::CompileFailure {
            module: "m".into(),
            command: "cargo build".into(),
            code: None,
        };
        assert!(err.to_string().ends_with("was terminated by a signal"));
    }
}
