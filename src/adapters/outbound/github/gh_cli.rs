use crate::analysis::domain::{DependabotError, DependabotErrorKind, PullRequest};
use crate::ports::outbound::{
    display_command, CommandError, CommandOptions, CommandOutput, CommandRunner, PullRequestSource,
};
use crate::shared::logging::Logger;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, Instrument};

const GH: &str = "gh";
const GIT: &str = "git";
const GITHUB_HOST: &str = "github.com";
const PR_FIELDS: &str = "number,title,url,createdAt";

/// GhCliPullRequestSource adapter listing Dependabot PRs through the GitHub CLI
///
/// Prerequisites are probed in order and the first failing one is reported:
/// gh installed, gh authenticated, inside a git work tree, GitHub remote.
pub struct GhCliPullRequestSource<R: CommandRunner> {
    runner: R,
    timeout: Duration,
    logger: Logger,
}

impl<R: CommandRunner> GhCliPullRequestSource<R> {
    pub fn new(runner: R, timeout: Duration, logger: Logger) -> Self {
        Self {
            runner,
            timeout,
            logger: logger.child("github"),
        }
    }

    async fn run(
        &self,
        program: &str,
        args: &[&str],
        project_dir: &Path,
    ) -> Result<CommandOutput, CommandError> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let options = CommandOptions::new(project_dir).with_timeout(self.timeout);
        self.runner.run(program, &args, &options).await
    }

    /// Runs a probe and maps any failure (spawn error or non-zero exit) to `kind`.
    async fn require(
        &self,
        program: &str,
        args: &[&str],
        project_dir: &Path,
        kind: DependabotErrorKind,
        message: &str,
    ) -> Result<CommandOutput, DependabotError> {
        match self.run(program, args, project_dir).await {
            Ok(output) if output.success() => Ok(output),
            Ok(output) => {
                debug!(exit_code = output.exit_code, probe = program, "Prerequisite probe failed");
                Err(DependabotError::new(kind, message))
            }
            Err(e) => {
                debug!(error = %e, "Prerequisite probe failed");
                Err(DependabotError::new(kind, message))
            }
        }
    }

    async fn check_prerequisites(&self, project_dir: &Path) -> Result<(), DependabotError> {
        self.require(
            GH,
            &["--version"],
            project_dir,
            DependabotErrorKind::GhNotInstalled,
            "GitHub CLI (gh) is not installed. Install it from https://cli.github.com/",
        )
        .await?;

        self.require(
            GH,
            &["auth", "status"],
            project_dir,
            DependabotErrorKind::GhNotAuthenticated,
            "GitHub CLI is not authenticated. Run `gh auth login` first.",
        )
        .await?;

        let not_a_repository = "Not a git repository. Run this command inside a GitHub repository.";
        let work_tree = self
            .require(
                GIT,
                &["rev-parse", "--is-inside-work-tree"],
                project_dir,
                DependabotErrorKind::NotGitRepository,
                not_a_repository,
            )
            .await?;
        if work_tree.stdout.trim() != "true" {
            return Err(DependabotError::new(
                DependabotErrorKind::NotGitRepository,
                not_a_repository,
            ));
        }

        let no_remote = "No GitHub remote found for this repository.";
        let remotes = self
            .require(
                GIT,
                &["remote", "-v"],
                project_dir,
                DependabotErrorKind::NoGithubRemote,
                no_remote,
            )
            .await?;
        if !remotes.stdout.contains(GITHUB_HOST) {
            return Err(DependabotError::new(
                DependabotErrorKind::NoGithubRemote,
                no_remote,
            ));
        }

        Ok(())
    }

    async fn list(&self, project_dir: &Path) -> Result<Vec<PullRequest>, DependabotError> {
        self.check_prerequisites(project_dir).await?;

        let args = [
            "pr",
            "list",
            "--author",
            "app/dependabot",
            "--state",
            "open",
            "--json",
            PR_FIELDS,
        ];
        let command = display_command(GH, &args.map(String::from));
        let output = self
            .run(GH, &args, project_dir)
            .await
            .map_err(|e| DependabotError::new(DependabotErrorKind::CommandFailed, e.to_string()))?;

        if !output.success() {
            let stderr = output.stderr.trim();
            let message = if stderr.is_empty() {
                format!("`{}` exited with code {}", command, output.exit_code)
            } else {
                format!("`{}` failed: {}", command, stderr)
            };
            return Err(DependabotError::new(DependabotErrorKind::CommandFailed, message));
        }

        let pull_requests: Vec<PullRequest> =
            serde_json::from_str(output.stdout.trim()).map_err(|e| {
                DependabotError::new(
                    DependabotErrorKind::CommandFailed,
                    format!("Failed to parse `{}` output: {}", command, e),
                )
            })?;
        debug!(count = pull_requests.len(), "Listed open Dependabot pull requests");
        Ok(pull_requests)
    }
}

#[async_trait]
impl<R: CommandRunner> PullRequestSource for GhCliPullRequestSource<R> {
    async fn open_dependabot_pull_requests(
        &self,
        project_dir: &Path,
    ) -> Result<Vec<PullRequest>, DependabotError> {
        self.list(project_dir)
            .instrument(self.logger.span().clone())
            .await
    }
}
