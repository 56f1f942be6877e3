mod tokio_command_runner;

pub use tokio_command_runner::TokioCommandRunner;
