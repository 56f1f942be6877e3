use crate::ports::outbound::{CommandOptions, DEFAULT_COMMAND_TIMEOUT};
use std::path::PathBuf;
use std::time::Duration;

/// AnalysisRequest - Internal request DTO shared by the project analyses
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Path to the project directory containing package.json
    pub project_path: PathBuf,
    /// Limit for each external package-manager command
    pub timeout: Duration,
}

impl AnalysisRequest {
    pub fn new(project_path: PathBuf) -> Self {
        Self {
            project_path,
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Options for commands run inside the project.
    pub fn command_options(&self) -> CommandOptions {
        CommandOptions::new(&self.project_path).with_timeout(self.timeout)
    }
}

/// RiskRequest - Internal request DTO for the upgrade-risk assessment
///
/// Versions left as `None` are resolved from the manifest (`from`) and the
/// registry (`to`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskRequest {
    pub package: String,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl RiskRequest {
    pub fn new(package: impl Into<String>, from: Option<String>, to: Option<String>) -> Self {
        Self {
            package: package.into(),
            from,
            to,
        }
    }
}
