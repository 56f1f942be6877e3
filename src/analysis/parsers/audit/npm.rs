use crate::analysis::domain::{AuditResult, AuditSummary, Severity, Vulnerability};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Deserialize)]
struct NpmAuditReport {
    #[serde(default)]
    vulnerabilities: Option<BTreeMap<String, NpmVulnerability>>,
    #[serde(default)]
    metadata: Option<NpmMetadata>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct NpmVulnerability {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    severity: Option<String>,
    #[serde(default)]
    via: Vec<Value>,
    #[serde(default)]
    effects: Vec<String>,
    #[serde(default, rename = "fixAvailable")]
    fix_available: Value,
}

#[derive(Debug, Deserialize)]
struct NpmMetadata {
    #[serde(default)]
    vulnerabilities: NpmCounts,
}

#[derive(Debug, Default, Deserialize)]
struct NpmCounts {
    #[serde(default)]
    critical: u64,
    #[serde(default)]
    high: u64,
    #[serde(default)]
    moderate: u64,
    #[serde(default)]
    low: u64,
    #[serde(default)]
    total: u64,
}

/// Parses `npm audit --json` (report version 2).
///
/// Entries whose `via` is a single bare package name only point at another
/// entry's advisory and are left out of the list; they still count in the
/// summary, which comes from `metadata`. Returns `None` for malformed JSON
/// or an error payload.
pub fn parse_npm_audit(raw: &str) -> Option<AuditResult> {
    let report: NpmAuditReport = serde_json::from_str(raw.trim()).ok()?;
    if report.error.is_some() {
        return None;
    }
    if report.vulnerabilities.is_none() && report.metadata.is_none() {
        return None;
    }

    let entries = report.vulnerabilities.unwrap_or_default();
    let vulnerabilities: Vec<Vulnerability> = entries
        .iter()
        .filter(|(_, entry)| !is_pass_through(entry))
        .map(|(key, entry)| to_vulnerability(key, entry, &entries))
        .collect();

    let summary = match report.metadata {
        Some(metadata) => {
            let counts = metadata.vulnerabilities;
            AuditSummary::new(
                counts.critical,
                counts.high,
                counts.moderate,
                counts.low,
                counts.total,
            )
        }
        None => AuditSummary::from_vulnerabilities(&vulnerabilities),
    };

    Some(AuditResult {
        vulnerabilities,
        summary,
    })
}

/// `via: ["other-package"]`: the advisory lives on another entry.
fn is_pass_through(entry: &NpmVulnerability) -> bool {
    matches!(entry.via.as_slice(), [Value::String(_)])
}

fn to_vulnerability(
    key: &str,
    entry: &NpmVulnerability,
    entries: &BTreeMap<String, NpmVulnerability>,
) -> Vulnerability {
    let package = entry.name.clone().unwrap_or_else(|| key.to_string());
    let title = entry
        .via
        .iter()
        .find_map(|via| via.get("title").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| fallback_title(entry));

    let mut visited = HashSet::new();
    let path = dependency_path(key, entries, &mut visited);

    let (fix_available, fix_version) = match &entry.fix_available {
        Value::Bool(available) => (*available, None),
        Value::Object(fix) => (
            true,
            fix.get("version").and_then(Value::as_str).map(str::to_string),
        ),
        _ => (false, None),
    };

    Vulnerability::new(
        package,
        Severity::normalize(entry.severity.as_deref().unwrap_or("info")),
        title,
        path,
        fix_available,
        fix_version,
    )
}

fn fallback_title(entry: &NpmVulnerability) -> String {
    let names: Vec<&str> = entry.via.iter().filter_map(Value::as_str).collect();
    if names.is_empty() {
        "Unknown vulnerability".to_string()
    } else {
        format!("Depends on vulnerable {}", names.join(", "))
    }
}

/// Builds `root > ... > name` by following `effects` (the packages that
/// depend on `name`) upward. `visited` guarantees termination on cycles.
fn dependency_path(
    name: &str,
    entries: &BTreeMap<String, NpmVulnerability>,
    visited: &mut HashSet<String>,
) -> String {
    if !visited.insert(name.to_string()) {
        return name.to_string();
    }

    let parent = entries
        .get(name)
        .and_then(|entry| entry.effects.first())
        .filter(|parent| !visited.contains(parent.as_str()));

    match parent {
        Some(parent) if entries.contains_key(parent) => {
            format!("{} > {}", dependency_path(parent, entries, visited), name)
        }
        Some(parent) => format!("{} > {}", parent, name),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NPM_AUDIT: &str = r#"{
  "auditReportVersion": 2,
  "vulnerabilities": {
    "qs": {
      "name": "qs",
      "severity": "high",
      "isDirect": false,
      "via": [
        {
          "source": 1090134,
          "name": "qs",
          "dependency": "qs",
          "title": "qs vulnerable to Prototype Pollution",
          "url": "https://github.com/advisories/GHSA-hrpp-h998-j3pp",
          "severity": "high",
          "range": "<6.10.3"
        }
      ],
      "effects": ["body-parser"],
      "range": "<6.10.3",
      "nodes": ["node_modules/qs"],
      "fixAvailable": {"name": "express", "version": "4.18.2", "isSemVerMajor": false}
    },
    "body-parser": {
      "name": "body-parser",
      "severity": "high",
      "isDirect": false,
      "via": ["qs"],
      "effects": ["express"],
      "range": "<=1.19.1",
      "nodes": ["node_modules/body-parser"],
      "fixAvailable": true
    },
    "express": {
      "name": "express",
      "severity": "high",
      "isDirect": true,
      "via": ["body-parser", "qs"],
      "effects": [],
      "range": "<=4.17.2",
      "nodes": ["node_modules/express"],
      "fixAvailable": true
    },
    "minimist": {
      "name": "minimist",
      "severity": "Medium",
      "isDirect": true,
      "via": [{"title": "Prototype Pollution in minimist", "severity": "moderate"}],
      "effects": [],
      "fixAvailable": false
    }
  },
  "metadata": {
    "vulnerabilities": {"info": 0, "low": 0, "moderate": 1, "high": 3, "critical": 0, "total": 4}
  }
}"#;

    #[test]
    fn test_pass_through_entry_excluded_but_counted() {
        let result = parse_npm_audit(NPM_AUDIT).unwrap();
        let names: Vec<&str> = result.vulnerabilities.iter().map(|v| v.package.as_str()).collect();
        assert!(!names.contains(&"body-parser"));
        assert!(names.contains(&"express"));
        assert!(names.contains(&"qs"));
        assert_eq!(result.summary.high, 3);
        assert_eq!(result.summary.total, 4);
    }

    #[test]
    fn test_path_follows_effects_to_root() {
        let result = parse_npm_audit(NPM_AUDIT).unwrap();
        let qs = result.vulnerabilities.iter().find(|v| v.package == "qs").unwrap();
        assert_eq!(qs.path, "express > body-parser > qs");

        let express = result.vulnerabilities.iter().find(|v| v.package == "express").unwrap();
        assert_eq!(express.path, "express");
    }

    #[test]
    fn test_fix_version_only_from_object() {
        let result = parse_npm_audit(NPM_AUDIT).unwrap();
        let qs = result.vulnerabilities.iter().find(|v| v.package == "qs").unwrap();
        assert!(qs.fix_available);
        assert_eq!(qs.fix_version.as_deref(), Some("4.18.2"));

        let express = result.vulnerabilities.iter().find(|v| v.package == "express").unwrap();
        assert!(express.fix_available);
        assert!(express.fix_version.is_none());

        let minimist = result.vulnerabilities.iter().find(|v| v.package == "minimist").unwrap();
        assert!(!minimist.fix_available);
    }

    #[test]
    fn test_title_and_severity_normalization() {
        let result = parse_npm_audit(NPM_AUDIT).unwrap();
        let qs = result.vulnerabilities.iter().find(|v| v.package == "qs").unwrap();
        assert_eq!(qs.title, "qs vulnerable to Prototype Pollution");

        let minimist = result.vulnerabilities.iter().find(|v| v.package == "minimist").unwrap();
        assert_eq!(minimist.severity, Severity::Moderate);

        let express = result.vulnerabilities.iter().find(|v| v.package == "express").unwrap();
        assert_eq!(express.title, "Depends on vulnerable body-parser, qs");
    }

    #[test]
    fn test_cyclic_effects_terminate() {
        let raw = r#"{
  "vulnerabilities": {
    "a": {"name": "a", "severity": "low", "via": [{"title": "A"}], "effects": ["b"], "fixAvailable": false},
    "b": {"name": "b", "severity": "low", "via": [{"title": "B"}], "effects": ["a"], "fixAvailable": false}
  },
  "metadata": {"vulnerabilities": {"low": 2, "total": 2}}
}"#;
        let result = parse_npm_audit(raw).unwrap();
        let a = result.vulnerabilities.iter().find(|v| v.package == "a").unwrap();
        assert_eq!(a.path, "b > a");
        let b = result.vulnerabilities.iter().find(|v| v.package == "b").unwrap();
        assert_eq!(b.path, "a > b");
    }

    #[test]
    fn test_effect_outside_map_becomes_root() {
        let raw = r#"{
  "vulnerabilities": {
    "semver": {"name": "semver", "severity": "moderate", "via": [{"title": "ReDoS"}], "effects": ["make-dir"], "fixAvailable": true}
  },
  "metadata": {"vulnerabilities": {"moderate": 1, "total": 1}}
}"#;
        let result = parse_npm_audit(raw).unwrap();
        assert_eq!(result.vulnerabilities[0].path, "make-dir > semver");
    }

    #[test]
    fn test_clean_audit() {
        let raw = r#"{"auditReportVersion": 2, "vulnerabilities": {}, "metadata": {"vulnerabilities": {"info": 0, "low": 0, "moderate": 0, "high": 0, "critical": 0, "total": 0}}}"#;
        let result = parse_npm_audit(raw).unwrap();
        assert!(result.vulnerabilities.is_empty());
        assert_eq!(result.summary, AuditSummary::default());
    }

    #[test]
    fn test_error_payload_is_none() {
        let raw = r#"{"error": {"code": "ENOLOCK", "summary": "This command requires an existing lockfile."}}"#;
        assert!(parse_npm_audit(raw).is_none());
    }

    #[test]
    fn test_huge_metadata_counts_saturate() {
        let raw = r#"{"vulnerabilities": {}, "metadata": {"vulnerabilities": {"critical": 18446744073709551615, "high": 1}}}"#;
        let result = parse_npm_audit(raw).unwrap();
        assert_eq!(result.summary.critical, u64::MAX);
        assert_eq!(result.summary.high, 1);
        assert_eq!(result.summary.total, u64::MAX);
    }

    #[test]
    fn test_metadata_without_counts() {
        let raw = r#"{"vulnerabilities": {}, "metadata": {"dependencies": {"total": 12}}}"#;
        let result = parse_npm_audit(raw).unwrap();
        assert!(result.vulnerabilities.is_empty());
        assert_eq!(result.summary, AuditSummary::default());
    }

    #[test]
    fn test_null_severity_is_info() {
        let raw = r#"{
  "vulnerabilities": {
    "ms": {"name": "ms", "severity": null, "via": [{"title": "ReDoS"}], "effects": [], "fixAvailable": false}
  },
  "metadata": {"vulnerabilities": {"info": 1, "total": 1}}
}"#;
        let result = parse_npm_audit(raw).unwrap();
        assert_eq!(result.vulnerabilities.len(), 1);
        assert_eq!(result.vulnerabilities[0].severity, Severity::Info);
        assert_eq!(result.summary.total, 1);
    }

    #[test]
    fn test_malformed_is_none() {
        assert!(parse_npm_audit("").is_none());
        assert!(parse_npm_audit("{\"vulnerabilities\": ").is_none());
    }
}
