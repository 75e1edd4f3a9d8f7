use std::io;
use std::process::ExitStatus;

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid registration count '{0}': expected a non-negative integer")]
    InvalidRegistration(String),
    #[error("No registration counts given")]
    EmptyRegistrations,
    #[error("Iterations must be at least 1")]
    ZeroIterations,
    #[error("Timeout must be at least 1 second")]
    ZeroTimeout,
    #[error("Unknown report format '{0}': expected csv or json")]
    UnknownFormat(String),
}

/// Reasons a single compiler invocation did not produce a measurement.
///
/// These never escape the executor; they are logged and collapsed into a
/// failed `BuildOutcome`.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Compiler exited with {status}")]
    CompileFailure { status: ExitStatus, stderr: String },
    #[error("Compilation exceeded the {seconds}s deadline")]
    CompileTimeout { seconds: u64 },
    #[error("Failed to spawn compiler: {0}")]
    Spawn(io::Error),
    #[error("Scratch file error: {0}")]
    Environment(#[from] io::Error),
}

impl BuildError {
    /// Diagnostic text captured from the compiler, if any
    pub fn stderr(&self) -> Option<&str> {
        match self {
            BuildError::CompileFailure { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}
