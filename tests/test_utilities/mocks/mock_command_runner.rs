use async_trait::async_trait;
use depsight::ports::outbound::display_command;
use depsight::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
enum Scripted {
    Output(CommandOutput),
    Timeout,
}

/// Mock CommandRunner answering by the full command line, e.g.
/// `pnpm outdated --format json`.
///
/// Unscripted commands fail to spawn, the same as a missing executable.
#[derive(Default, Clone)]
pub struct MockCommandRunner {
    responses: HashMap<String, Scripted>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, command: &str, stdout: &str, exit_code: i32) -> Self {
        self.responses.insert(
            command.to_string(),
            Scripted::Output(CommandOutput {
                stdout: stdout.to_string(),
                stderr: String::new(),
                exit_code,
            }),
        );
        self
    }

    pub fn with_failure(mut self, command: &str, stderr: &str, exit_code: i32) -> Self {
        self.responses.insert(
            command.to_string(),
            Scripted::Output(CommandOutput {
                stdout: String::new(),
                stderr: stderr.to_string(),
                exit_code,
            }),
        );
        self
    }

    pub fn with_timeout(mut self, command: &str) -> Self {
        self.responses.insert(command.to_string(), Scripted::Timeout);
        self
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for MockCommandRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        options: &CommandOptions,
    ) -> std::result::Result<CommandOutput, CommandError> {
        let command = display_command(program, args);
        self.calls.lock().unwrap().push(command.clone());

        match self.responses.get(&command) {
            Some(Scripted::Output(output)) => Ok(output.clone()),
            Some(Scripted::Timeout) => Err(CommandError::Timeout {
                command,
                timeout_ms: u64::try_from(options.timeout.as_millis()).unwrap_or(u64::MAX),
            }),
            None => Err(CommandError::Spawn {
                command,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not scripted"),
            }),
        }
    }
}
