use crate::ports::outbound::{
    display_command, CommandError, CommandOptions, CommandOutput, CommandRunner,
};
use crate::shared::logging::Logger;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn, Instrument};

/// TokioCommandRunner adapter running external programs as child processes
///
/// The child is spawned with `kill_on_drop`, so when the timeout elapses
/// and the pending wait is dropped, the process is killed rather than left
/// running in the background.
pub struct TokioCommandRunner {
    logger: Logger,
}

impl TokioCommandRunner {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger: logger.child("command"),
        }
    }
}

#[async_trait]
impl CommandRunner for TokioCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandOutput, CommandError> {
        execute(program, args, options)
            .instrument(self.logger.span().clone())
            .await
    }
}

async fn execute(
    program: &str,
    args: &[String],
    options: &CommandOptions,
) -> Result<CommandOutput, CommandError> {
    let command = display_command(program, args);
    debug!(command = %command, cwd = %options.cwd.display(), "Running command");

    let child = Command::new(program)
        .args(args)
        .current_dir(&options.cwd)
        .envs(options.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| CommandError::Spawn {
            command: command.clone(),
            source,
        })?;

    let output = match tokio::time::timeout(options.timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(|source| CommandError::Io {
            command: command.clone(),
            source,
        })?,
        Err(_) => {
            let timeout_ms = options.timeout.as_millis() as u64;
            warn!(command = %command, timeout_ms, "Command timed out");
            return Err(CommandError::Timeout {
                command,
                timeout_ms,
            });
        }
    };

    let exit_code = output.status.code().unwrap_or(-1);
    debug!(command = %command, exit_code, "Command finished");

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn runner() -> TokioCommandRunner {
        TokioCommandRunner::new(Logger::disabled())
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_captures_stdout_and_exit_code() {
        let options = CommandOptions::new(std::env::temp_dir());
        let output = runner()
            .run("sh", &args(&["-c", "echo hello; echo oops >&2; exit 3"]), &options)
            .await
            .unwrap();
        assert_eq!(output.stdout.trim(), "hello");
        assert_eq!(output.stderr.trim(), "oops");
        assert_eq!(output.exit_code, 3);
        assert!(!output.success());
    }

    #[tokio::test]
    async fn test_arguments_are_not_shell_interpreted() {
        let options = CommandOptions::new(std::env::temp_dir());
        let output = runner()
            .run("echo", &args(&["$(whoami); rm -rf /"]), &options)
            .await
            .unwrap();
        assert_eq!(output.stdout.trim(), "$(whoami); rm -rf /");
    }

    #[tokio::test]
    async fn test_env_is_passed() {
        let options = CommandOptions::new(std::env::temp_dir()).with_env("DEPSIGHT_PROBE", "42");
        let output = runner()
            .run("sh", &args(&["-c", "printf %s \"$DEPSIGHT_PROBE\""]), &options)
            .await
            .unwrap();
        assert_eq!(output.stdout, "42");
    }

    #[tokio::test]
    async fn test_timeout_is_distinct_error() {
        let options =
            CommandOptions::new(std::env::temp_dir()).with_timeout(Duration::from_millis(200));
        let started = Instant::now();
        let error = runner()
            .run("sleep", &args(&["5"]), &options)
            .await
            .unwrap_err();
        assert!(matches!(error, CommandError::Timeout { timeout_ms: 200, .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let options = CommandOptions::new(std::env::temp_dir());
        let error = runner()
            .run("depsight-no-such-program", &[], &options)
            .await
            .unwrap_err();
        assert!(error.is_not_found());
    }
}
