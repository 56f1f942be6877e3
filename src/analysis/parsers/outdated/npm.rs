use crate::analysis::domain::OutdatedPackage;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct NpmOutdatedEntry {
    #[serde(default)]
    current: Option<String>,
    #[serde(default)]
    wanted: Option<String>,
    #[serde(default)]
    latest: Option<String>,
}

/// Parses `npm outdated --json`.
///
/// The report is an object keyed by package name. npm does not say whether
/// a package is a dev dependency, so `is_dev_dep` is always false. In
/// workspaces a key may map to an array of entries; the first is used.
/// Uninstalled packages have no `current`, in which case `wanted` stands in.
pub fn parse_npm_outdated(raw: &str) -> Vec<OutdatedPackage> {
    let Ok(report) = serde_json::from_str::<BTreeMap<String, Value>>(raw.trim()) else {
        return Vec::new();
    };

    report
        .into_iter()
        .filter_map(|(name, value)| {
            let value = match value {
                Value::Array(mut entries) if !entries.is_empty() => entries.swap_remove(0),
                other => other,
            };
            let entry: NpmOutdatedEntry = serde_json::from_value(value).ok()?;
            let current = entry.current.or(entry.wanted)?;
            let latest = entry.latest?;
            Some(OutdatedPackage::new(name, current, latest, false))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::domain::UpdateType;

    #[test]
    fn test_parses_report() {
        let raw = r#"{
  "lodash": {
    "current": "4.17.20",
    "wanted": "4.17.21",
    "latest": "4.17.21",
    "dependent": "app",
    "location": "node_modules/lodash"
  },
  "react": {
    "current": "17.0.2",
    "wanted": "17.0.2",
    "latest": "18.2.0",
    "dependent": "app",
    "location": "node_modules/react"
  }
}"#;
        let packages = parse_npm_outdated(raw);
        assert_eq!(packages.len(), 2);

        let lodash = packages.iter().find(|p| p.name == "lodash").unwrap();
        assert_eq!(lodash.current, "4.17.20");
        assert_eq!(lodash.latest, "4.17.21");
        assert_eq!(lodash.update_type, UpdateType::Patch);
        assert!(!lodash.is_dev_dep);

        let react = packages.iter().find(|p| p.name == "react").unwrap();
        assert_eq!(react.update_type, UpdateType::Major);
    }

    #[test]
    fn test_missing_current_falls_back_to_wanted() {
        let raw = r#"{"chalk": {"wanted": "5.3.0", "latest": "5.3.0"}}"#;
        let packages = parse_npm_outdated(raw);
        assert_eq!(packages[0].current, "5.3.0");
        assert_eq!(packages[0].update_type, UpdateType::None);
    }

    #[test]
    fn test_workspace_array_entries() {
        let raw = r#"{"zod": [{"current": "3.20.0", "latest": "3.22.4"}, {"current": "3.21.0", "latest": "3.22.4"}]}"#;
        let packages = parse_npm_outdated(raw);
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].current, "3.20.0");
    }

    #[test]
    fn test_empty_object() {
        assert!(parse_npm_outdated("{}").is_empty());
    }

    #[test]
    fn test_malformed_json() {
        assert!(parse_npm_outdated(r#"{"lodash": {"current": "#).is_empty());
        assert!(parse_npm_outdated("[1, 2, 3]").is_empty());
    }
}
