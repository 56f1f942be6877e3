/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (processes, file system, console, etc.).
pub mod command_runner;
pub mod output_presenter;
pub mod progress_reporter;
pub mod project_reader;
pub mod pull_request_source;
pub mod usage_scanner;

pub use command_runner::{
    display_command, CommandError, CommandOptions, CommandOutput, CommandRunner,
    DEFAULT_COMMAND_TIMEOUT,
};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use project_reader::ProjectReader;
pub use pull_request_source::PullRequestSource;
pub use usage_scanner::UsageScanner;
