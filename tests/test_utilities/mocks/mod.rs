/// Mock implementations for testing
mod mock_command_runner;
mod mock_progress_reporter;
mod mock_project_reader;
mod mock_pull_request_source;
mod mock_usage_scanner;

pub use mock_command_runner::MockCommandRunner;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_project_reader::MockProjectReader;
pub use mock_pull_request_source::MockPullRequestSource;
pub use mock_usage_scanner::MockUsageScanner;
