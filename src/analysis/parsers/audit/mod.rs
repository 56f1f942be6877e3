mod npm;
mod pnpm;
mod yarn;

use crate::analysis::domain::{AuditResult, AuditSummary, PackageManagerName, Severity, Vulnerability};
use serde::Deserialize;
use std::sync::LazyLock;

pub use npm::parse_npm_audit;
pub use pnpm::parse_pnpm_audit;
pub use yarn::parse_yarn_audit;

/// `patched_versions` value meaning no release fixes the advisory.
const NO_FIX_SENTINEL: &str = "<0.0.0";

static VERSION_IN_RANGE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\d+\.\d+\.\d+").expect("version pattern is valid"));

/// Dispatches to the parser for `manager`'s audit output. Bun has no
/// parseable audit report, so it is always `None`.
pub fn parse_audit(manager: PackageManagerName, raw: &str) -> Option<AuditResult> {
    match manager {
        PackageManagerName::Npm => parse_npm_audit(raw),
        PackageManagerName::Pnpm => parse_pnpm_audit(raw),
        PackageManagerName::Yarn => parse_yarn_audit(raw),
        PackageManagerName::Bun => None,
    }
}

/// npm-v6 style advisory shared by pnpm and yarn classic.
#[derive(Debug, Deserialize)]
struct Advisory {
    #[serde(default)]
    module_name: String,
    #[serde(default)]
    severity: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    patched_versions: Option<String>,
    #[serde(default)]
    findings: Vec<Finding>,
}

impl Advisory {
    fn to_vulnerability(
        &self,
        path: String,
        fix_available: bool,
        fix_version: Option<String>,
    ) -> Vulnerability {
        Vulnerability::new(
            self.module_name.clone(),
            Severity::normalize(&self.severity),
            self.title.clone(),
            path,
            fix_available,
            fix_version,
        )
    }
}

#[derive(Debug, Deserialize)]
struct Finding {
    #[serde(default)]
    paths: Vec<String>,
}

/// Five-severity count block used by pnpm metadata and yarn's summary.
#[derive(Debug, Default, Deserialize)]
struct SeverityCounts {
    #[serde(default)]
    info: u64,
    #[serde(default)]
    low: u64,
    #[serde(default)]
    moderate: u64,
    #[serde(default)]
    high: u64,
    #[serde(default)]
    critical: u64,
}

impl SeverityCounts {
    fn to_summary(&self) -> AuditSummary {
        AuditSummary::new(
            self.critical,
            self.high,
            self.moderate,
            self.low,
            [self.low, self.moderate, self.high, self.critical]
                .into_iter()
                .fold(self.info, u64::saturating_add),
        )
    }
}

/// Rewrites a `a>b>c` dependency path as `a > b > c`.
fn normalize_path(path: &str) -> String {
    path.split('>')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(" > ")
}

/// Reads a `patched_versions` range. A fix exists unless the range is
/// missing or the no-fix sentinel; the version is the first
/// `major.minor.patch` found in it, if any.
fn fix_from_patched_versions(patched: Option<&str>) -> (bool, Option<String>) {
    match patched.map(str::trim) {
        Some(range) if !range.is_empty() && range != NO_FIX_SENTINEL => {
            let version = VERSION_IN_RANGE
                .find(range)
                .map(|m| m.as_str().to_string());
            (true, version)
        }
        _ => (false, None),
    }
}
