use crate::analysis::domain::{DependabotError, PullRequest};
use async_trait::async_trait;
use std::path::Path;

/// PullRequestSource port for listing open Dependabot pull requests
///
/// Prerequisite failures (no CLI, not authenticated, not a GitHub
/// repository) are expected outcomes, so they are returned as a typed
/// [`DependabotError`] rather than an opaque error.
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    async fn open_dependabot_pull_requests(
        &self,
        project_dir: &Path,
    ) -> std::result::Result<Vec<PullRequest>, DependabotError>;
}
