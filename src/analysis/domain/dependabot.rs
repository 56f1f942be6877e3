use super::version::UpdateType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

static BUMP_TITLE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)\bbump\s+(\S+)\s+from\s+v?(\S+)\s+to\s+v?(\S+)")
        .expect("bump title pattern is valid")
});

/// Package and version range named by a Dependabot PR title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BumpTitle {
    pub package: String,
    pub from: String,
    pub to: String,
}

impl BumpTitle {
    /// Parses `Bump <pkg> from <a> to <b>`, with or without a conventional
    /// commit prefix or a trailing ` in /dir`. Returns `None` when any part
    /// is missing.
    pub fn parse(title: &str) -> Option<Self> {
        let caps = BUMP_TITLE.captures(title)?;
        Some(Self {
            package: caps[1].to_string(),
            from: caps[2].to_string(),
            to: caps[3].to_string(),
        })
    }
}

/// An open pull request as listed by the GitHub CLI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A Dependabot PR whose title names a version bump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependabotUpdate {
    pub number: u64,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub package: String,
    pub from: String,
    pub to: String,
    pub update_type: UpdateType,
}

impl DependabotUpdate {
    pub fn from_pull_request(pr: PullRequest) -> Option<Self> {
        let bump = BumpTitle::parse(&pr.title)?;
        let update_type = UpdateType::between(&bump.from, &bump.to);
        Some(Self {
            number: pr.number,
            title: pr.title,
            url: pr.url,
            created_at: pr.created_at,
            package: bump.package,
            from: bump.from,
            to: bump.to,
            update_type,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependabotReport {
    pub updates: Vec<DependabotUpdate>,
    pub skipped: usize,
}

/// Machine-readable tag of a Dependabot prerequisite failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependabotErrorKind {
    GhNotInstalled,
    GhNotAuthenticated,
    NotGitRepository,
    NoGithubRemote,
    CommandFailed,
}

/// Typed failure for the Dependabot listing. Reported as `{error, type}`.
#[derive(Debug, Clone, Error, Serialize)]
#[error("{message}")]
pub struct DependabotError {
    #[serde(rename = "type")]
    pub kind: DependabotErrorKind,
    #[serde(rename = "error")]
    pub message: String,
}

impl DependabotError {
    pub fn new(kind: DependabotErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
