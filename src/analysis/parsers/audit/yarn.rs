use super::{fix_from_patched_versions, normalize_path, Advisory, SeverityCounts};
use crate::analysis::domain::{AuditResult, AuditSummary, Vulnerability};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(tag = "type", content = "data")]
enum YarnAuditLine {
    #[serde(rename = "auditAdvisory")]
    Advisory(AdvisoryData),
    #[serde(rename = "auditSummary")]
    Summary(SummaryData),
}

#[derive(Debug, Deserialize)]
struct AdvisoryData {
    advisory: Advisory,
    #[serde(default)]
    resolution: Option<Resolution>,
}

#[derive(Debug, Deserialize)]
struct Resolution {
    #[serde(default)]
    path: String,
}

#[derive(Debug, Deserialize)]
struct SummaryData {
    #[serde(default)]
    vulnerabilities: SeverityCounts,
}

/// Parses `yarn audit --json` (yarn classic NDJSON).
///
/// Each `auditAdvisory` line is one finding; the `auditSummary` line carries
/// the counts. Lines that are not JSON or have another `type` are skipped.
/// Returns `None` when neither kind of line is present.
pub fn parse_yarn_audit(raw: &str) -> Option<AuditResult> {
    let mut vulnerabilities: Vec<Vulnerability> = Vec::new();
    let mut summary: Option<AuditSummary> = None;

    for line in raw.lines() {
        let Ok(parsed) = serde_json::from_str::<YarnAuditLine>(line.trim()) else {
            continue;
        };
        match parsed {
            YarnAuditLine::Advisory(data) => vulnerabilities.push(to_vulnerability(data)),
            YarnAuditLine::Summary(data) => summary = Some(data.vulnerabilities.to_summary()),
        }
    }

    if vulnerabilities.is_empty() && summary.is_none() {
        return None;
    }

    let summary = summary.unwrap_or_else(|| AuditSummary::from_vulnerabilities(&vulnerabilities));
    Some(AuditResult {
        vulnerabilities,
        summary,
    })
}

fn to_vulnerability(data: AdvisoryData) -> Vulnerability {
    let advisory = data.advisory;
    let path = data
        .resolution
        .map(|resolution| resolution.path)
        .filter(|path| !path.trim().is_empty())
        .map(|path| normalize_path(&path))
        .unwrap_or_else(|| advisory.module_name.clone());
    let (fix_available, fix_version) =
        fix_from_patched_versions(advisory.patched_versions.as_deref());
    advisory.to_vulnerability(path, fix_available, fix_version)
}
