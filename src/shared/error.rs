use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Every subcommand either prints one JSON document and exits with
/// `Success`, or prints an error document and exits with `Failure`.
/// Argument errors from clap are failures too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The analysis ran and its report was printed
    Success = 0,
    /// Any application error or invalid command-line arguments
    Failure = 1,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::Failure => write!(f, "Failure (1)"),
        }
    }
}

/// Application-specific errors.
///
/// Operator input errors (`PackageNotInManifest`, `LatestVersionUnavailable`)
/// are fatal for the invocation that raised them and are never retried.
#[derive(Debug, Error)]
pub enum DepsightError {
    #[error("Invalid project path: {path}\nReason: {reason}")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("package.json not found in {path}")]
    ManifestNotFound { path: PathBuf },

    #[error("Failed to parse package.json: {path}\nDetails: {details}")]
    ManifestParseError { path: PathBuf, details: String },

    #[error("Package \"{package}\" not found in dependencies or devDependencies of package.json")]
    PackageNotInManifest { package: String },

    #[error("Could not resolve the latest version of \"{package}\": {details}")]
    LatestVersionUnavailable { package: String, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },
}
