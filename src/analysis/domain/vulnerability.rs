use super::package_manager::PackageManagerName;
use serde::Serialize;
use std::fmt;

/// Canonical five-level severity taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    /// Case-insensitive parse; `medium` is an alias for `moderate`.
    /// Anything unrecognised is `Info`.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "moderate" | "medium" => Severity::Moderate,
            "low" => Severity::Low,
            _ => Severity::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Moderate => "moderate",
            Severity::Low => "low",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single vulnerability finding.
///
/// `fix_version` is only set when `fix_available` is true and the report
/// carried a concrete patched version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    pub package: String,
    pub severity: Severity,
    pub title: String,
    pub path: String,
    pub fix_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_version: Option<String>,
}

impl Vulnerability {
    pub fn new(
        package: String,
        severity: Severity,
        title: String,
        path: String,
        fix_available: bool,
        fix_version: Option<String>,
    ) -> Self {
        Self {
            package,
            severity,
            title,
            path,
            fix_available,
            fix_version: fix_version.filter(|_| fix_available),
        }
    }
}

/// Severity counts. `total` may exceed the four buckets when a manager
/// folds `info` findings into it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub critical: u64,
    pub high: u64,
    pub moderate: u64,
    pub low: u64,
    pub total: u64,
}

impl AuditSummary {
    /// Builds a summary, raising `total` to the bucket sum if a report
    /// under-counts it.
    pub fn new(critical: u64, high: u64, moderate: u64, low: u64, total: u64) -> Self {
        let tracked = critical
            .saturating_add(high)
            .saturating_add(moderate)
            .saturating_add(low);
        Self {
            critical,
            high,
            moderate,
            low,
            total: total.max(tracked),
        }
    }

    /// Synthesizes counts from a list of findings.
    pub fn from_vulnerabilities(vulnerabilities: &[Vulnerability]) -> Self {
        let count = |severity: Severity| {
            vulnerabilities
                .iter()
                .filter(|v| v.severity == severity)
                .count() as u64
        };
        Self::new(
            count(Severity::Critical),
            count(Severity::High),
            count(Severity::Moderate),
            count(Severity::Low),
            vulnerabilities.len() as u64,
        )
    }
}

/// Normalized output of one audit parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditResult {
    pub vulnerabilities: Vec<Vulnerability>,
    pub summary: AuditSummary,
}

/// Result of the `audit` analysis. `available` is false when the audit
/// could not run or its output was unusable, which is distinct from a
/// clean audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub package_manager: PackageManagerName,
    pub available: bool,
    pub vulnerabilities: Vec<Vulnerability>,
    pub summary: AuditSummary,
}

impl AuditReport {
    pub fn from_result(package_manager: PackageManagerName, result: Option<AuditResult>) -> Self {
        match result {
            Some(result) => Self {
                package_manager,
                available: true,
                vulnerabilities: result.vulnerabilities,
                summary: result.summary,
            },
            None => Self {
                package_manager,
                available: false,
                vulnerabilities: Vec::new(),
                summary: AuditSummary::default(),
            },
        }
    }
}
