use async_trait::async_trait;
use depsight::prelude::*;
use std::path::Path;

/// Mock PullRequestSource with a fixed answer
pub struct MockPullRequestSource {
    pub result: std::result::Result<Vec<PullRequest>, DependabotError>,
}

impl MockPullRequestSource {
    /// Open PRs given as `(number, title)` pairs.
    pub fn new(pull_requests: &[(u64, &str)]) -> Self {
        Self {
            result: Ok(pull_requests
                .iter()
                .map(|(number, title)| PullRequest {
                    number: *number,
                    title: title.to_string(),
                    url: format!("https://github.com/acme/web/pull/{}", number),
                    created_at: None,
                })
                .collect()),
        }
    }

    pub fn with_error(kind: DependabotErrorKind, message: &str) -> Self {
        Self {
            result: Err(DependabotError::new(kind, message)),
        }
    }
}

#[async_trait]
impl PullRequestSource for MockPullRequestSource {
    async fn open_dependabot_pull_requests(
        &self,
        _project_dir: &Path,
    ) -> std::result::Result<Vec<PullRequest>, DependabotError> {
        self.result.clone()
    }
}
