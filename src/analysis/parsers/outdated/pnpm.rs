use crate::analysis::domain::OutdatedPackage;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PnpmOutdatedEntry {
    #[serde(default)]
    current: Option<String>,
    #[serde(default)]
    wanted: Option<String>,
    #[serde(default)]
    latest: Option<String>,
    #[serde(default)]
    dependency_type: Option<String>,
}

/// Parses `pnpm outdated --format json`.
///
/// An object keyed by package name; `dependencyType` tells dev
/// dependencies apart.
pub fn parse_pnpm_outdated(raw: &str) -> Vec<OutdatedPackage> {
    let Ok(report) = serde_json::from_str::<BTreeMap<String, Value>>(raw.trim()) else {
        return Vec::new();
    };

    report
        .into_iter()
        .filter_map(|(name, value)| {
            let entry: PnpmOutdatedEntry = serde_json::from_value(value).ok()?;
            let current = entry.current.or(entry.wanted)?;
            let latest = entry.latest?;
            let is_dev_dep = entry.dependency_type.as_deref() == Some("devDependencies");
            Some(OutdatedPackage::new(name, current, latest, is_dev_dep))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::domain::UpdateType;

    #[test]
    fn test_parses_report_with_dependency_types() {
        let raw = r#"{
  "lodash": {
    "current": "4.17.20",
    "latest": "4.17.21",
    "wanted": "4.17.21",
    "isDeprecated": false,
    "dependencyType": "dependencies"
  },
  "typescript": {
    "current": "5.0.0",
    "latest": "5.3.0",
    "wanted": "5.0.4",
    "isDeprecated": false,
    "dependencyType": "devDependencies"
  }
}"#;
        let packages = parse_pnpm_outdated(raw);
        assert_eq!(packages.len(), 2);

        let lodash = packages.iter().find(|p| p.name == "lodash").unwrap();
        assert!(!lodash.is_dev_dep);
        assert_eq!(lodash.update_type, UpdateType::Patch);

        let typescript = packages.iter().find(|p| p.name == "typescript").unwrap();
        assert!(typescript.is_dev_dep);
        assert_eq!(typescript.update_type, UpdateType::Minor);
    }

    #[test]
    fn test_optional_dependency_is_not_dev() {
        let raw = r#"{"fsevents": {"current": "2.3.2", "latest": "2.3.3", "dependencyType": "optionalDependencies"}}"#;
        assert!(!parse_pnpm_outdated(raw)[0].is_dev_dep);
    }

    #[test]
    fn test_skips_entries_without_latest() {
        let raw = r#"{"private-pkg": {"current": "1.0.0", "dependencyType": "dependencies"}}"#;
        assert!(parse_pnpm_outdated(raw).is_empty());
    }

    #[test]
    fn test_malformed_json() {
        assert!(parse_pnpm_outdated("ERR_PNPM_NO_LOCKFILE").is_empty());
    }
}
