use crate::analysis::domain::{DependabotReport, DependabotUpdate};
use crate::ports::outbound::{ProgressReporter, PullRequestSource};
use crate::shared::logging::Logger;
use crate::shared::Result;
use std::path::Path;
use tracing::{debug, info};

/// ListDependabotUpdatesUseCase - Lists open Dependabot PRs as version bumps
///
/// Prerequisite failures surface as a [`DependabotError`] inside the
/// returned error, so callers can report its type tag.
///
/// [`DependabotError`]: crate::analysis::domain::DependabotError
pub struct ListDependabotUpdatesUseCase<'a, PS, PG> {
    pull_request_source: &'a PS,
    progress_reporter: &'a PG,
    logger: Logger,
}

impl<'a, PS: PullRequestSource, PG: ProgressReporter> ListDependabotUpdatesUseCase<'a, PS, PG> {
    pub fn new(pull_request_source: &'a PS, progress_reporter: &'a PG, logger: &Logger) -> Self {
        Self {
            pull_request_source,
            progress_reporter,
            logger: logger.child("dependabot"),
        }
    }

    pub async fn execute(&self, project_dir: &Path) -> Result<DependabotReport> {
        self.progress_reporter
            .report("Listing open Dependabot pull requests");
        let pull_requests = self
            .pull_request_source
            .open_dependabot_pull_requests(project_dir)
            .await?;

        let mut updates = Vec::new();
        let mut skipped = 0;
        for pr in pull_requests {
            let number = pr.number;
            match DependabotUpdate::from_pull_request(pr) {
                Some(update) => updates.push(update),
                None => {
                    skipped += 1;
                    self.logger
                        .in_scope(|| debug!(number, "Skipping pull request without a version bump title"));
                }
            }
        }

        self.logger.in_scope(|| {
            info!(
                updates = updates.len(),
                skipped, "Dependabot listing complete"
            )
        });
        Ok(DependabotReport { updates, skipped })
    }
}
