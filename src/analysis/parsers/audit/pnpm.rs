use super::{fix_from_patched_versions, normalize_path, Advisory, SeverityCounts};
use crate::analysis::domain::{AuditResult, AuditSummary, Vulnerability};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct PnpmAuditReport {
    #[serde(default)]
    advisories: BTreeMap<String, Advisory>,
    #[serde(default)]
    metadata: Option<PnpmMetadata>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct PnpmMetadata {
    #[serde(default)]
    vulnerabilities: SeverityCounts,
}

/// Parses `pnpm audit --json`.
///
/// Returns `None` when pnpm reports an `error` instead of advisories (for
/// example when there is no lockfile), so callers can tell "audit could not
/// run" from "no advisories". pnpm's metadata has no total, so it is the
/// sum of all five severities.
pub fn parse_pnpm_audit(raw: &str) -> Option<AuditResult> {
    let report: PnpmAuditReport = serde_json::from_str(raw.trim()).ok()?;
    if report.error.is_some() {
        return None;
    }

    let vulnerabilities: Vec<Vulnerability> = report
        .advisories
        .values()
        .map(|advisory| {
            let path = advisory
                .findings
                .first()
                .and_then(|finding| finding.paths.first())
                .map(|path| normalize_path(path))
                .unwrap_or_else(|| advisory.module_name.clone());
            let (fix_available, fix_version) =
                fix_from_patched_versions(advisory.patched_versions.as_deref());
            advisory.to_vulnerability(path, fix_available, fix_version)
        })
        .collect();

    let summary = match report.metadata {
        Some(metadata) => metadata.vulnerabilities.to_summary(),
        None => AuditSummary::from_vulnerabilities(&vulnerabilities),
    };

    Some(AuditResult {
        vulnerabilities,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::domain::Severity;

    const PNPM_AUDIT: &str = r#"{
  "actions": [],
  "advisories": {
    "1096": {
      "id": 1096,
      "module_name": "lodash",
      "severity": "high",
      "title": "Prototype Pollution in lodash",
      "patched_versions": ">=4.17.21",
      "vulnerable_versions": "<4.17.21",
      "findings": [{"version": "4.17.20", "paths": [".>lodash", ".>async>lodash"]}]
    },
    "1179": {
      "id": 1179,
      "module_name": "minimist",
      "severity": "MEDIUM",
      "title": "Prototype Pollution in minimist",
      "patched_versions": "<0.0.0",
      "vulnerable_versions": ">=0.0.0",
      "findings": [{"version": "0.0.8", "paths": ["packages__app>mkdirp>minimist"]}]
    }
  },
  "muted": [],
  "metadata": {
    "vulnerabilities": {"info": 1, "low": 0, "moderate": 1, "high": 1, "critical": 0},
    "dependencies": 120,
    "devDependencies": 0,
    "optionalDependencies": 0,
    "totalDependencies": 120
  }
}"#;

    #[test]
    fn test_parses_advisories() {
        let result = parse_pnpm_audit(PNPM_AUDIT).unwrap();
        assert_eq!(result.vulnerabilities.len(), 2);

        let lodash = &result.vulnerabilities[0];
        assert_eq!(lodash.package, "lodash");
        assert_eq!(lodash.severity, Severity::High);
        assert_eq!(lodash.title, "Prototype Pollution in lodash");
        assert_eq!(lodash.path, ". > lodash");
        assert!(lodash.fix_available);
        assert_eq!(lodash.fix_version.as_deref(), Some("4.17.21"));
    }

    #[test]
    fn test_no_fix_sentinel() {
        let result = parse_pnpm_audit(PNPM_AUDIT).unwrap();
        let minimist = &result.vulnerabilities[1];
        assert_eq!(minimist.severity, Severity::Moderate);
        assert_eq!(minimist.path, "packages__app > mkdirp > minimist");
        assert!(!minimist.fix_available);
        assert!(minimist.fix_version.is_none());
    }

    #[test]
    fn test_total_sums_all_five_severities() {
        let result = parse_pnpm_audit(PNPM_AUDIT).unwrap();
        assert_eq!(result.summary.high, 1);
        assert_eq!(result.summary.moderate, 1);
        assert_eq!(result.summary.total, 3);
    }

    #[test]
    fn test_error_payload_is_none() {
        let raw = r#"{"error": {"code": "ERR_PNPM_AUDIT_NO_LOCKFILE", "message": "No pnpm-lock.yaml found"}}"#;
        assert!(parse_pnpm_audit(raw).is_none());
    }

    #[test]
    fn test_no_advisories_is_some_and_empty() {
        let raw = r#"{"actions": [], "advisories": {}, "muted": [], "metadata": {"vulnerabilities": {"info": 0, "low": 0, "moderate": 0, "high": 0, "critical": 0}}}"#;
        let result = parse_pnpm_audit(raw).unwrap();
        assert!(result.vulnerabilities.is_empty());
        assert_eq!(result.summary.total, 0);
    }

    #[test]
    fn test_malformed_is_none() {
        assert!(parse_pnpm_audit("not json").is_none());
    }

    #[test]
    fn test_missing_findings_uses_module_name() {
        let raw = r#"{"advisories": {"1": {"module_name": "tar", "severity": "critical", "title": "Arbitrary File Creation", "patched_versions": ">=6.1.9"}}}"#;
        let result = parse_pnpm_audit(raw).unwrap();
        assert_eq!(result.vulnerabilities[0].path, "tar");
        assert_eq!(result.summary.critical, 1);
    }
}
