use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default limit for a single external command.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_millis(30_000);

/// How to run one command.
#[derive(Debug, Clone)]
pub struct CommandOptions {
    pub cwd: PathBuf,
    pub timeout: Duration,
    /// Extra environment variables on top of the inherited environment.
    pub env: Vec<(String, String)>,
}

impl CommandOptions {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            timeout: DEFAULT_COMMAND_TIMEOUT,
            env: Vec::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

/// Captured result of a command that ran to completion.
///
/// A non-zero `exit_code` is not an error: `outdated` and `audit`
/// subcommands exit non-zero precisely when they have findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// `-1` when the process was terminated by a signal.
    pub exit_code: i32,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Why a command produced no output.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Command `{command}` timed out after {timeout_ms}ms")]
    Timeout { command: String, timeout_ms: u64 },

    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to collect output of `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl CommandError {
    /// The program could not be found on `PATH`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CommandError::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// CommandRunner port for running external programs
///
/// Arguments are always passed as a discrete vector and never through a
/// shell, since package and version names may come from a registry.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` and waits for it, up to `options.timeout`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The process cannot be spawned
    /// - The timeout expires (the child is killed)
    /// - Its output cannot be collected
    async fn run(
        &self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> std::result::Result<CommandOutput, CommandError>;
}

/// Renders `program args...` for messages and logs.
pub fn display_command(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}
