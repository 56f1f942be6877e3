use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Characters stripped from the front of a declared range to get a version.
const RANGE_PREFIXES: &[char] = &['^', '~', '>', '=', '<'];

/// The parts of `package.json` the toolkit reads.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    /// Corepack spec, e.g. `pnpm@8.15.0`.
    #[serde(default)]
    pub package_manager: Option<String>,
    #[serde(default)]
    pub eslint_config: Option<Value>,
    #[serde(default)]
    pub prettier: Option<Value>,
}

impl PackageJson {
    /// `dependencies` plus `devDependencies` entries.
    pub fn total_dependencies(&self) -> usize {
        self.dependencies.len() + self.dev_dependencies.len()
    }

    /// Declared range for `package`, production entries first.
    pub fn declared_range(&self, package: &str) -> Option<&str> {
        self.dependencies
            .get(package)
            .or_else(|| self.dev_dependencies.get(package))
            .map(String::as_str)
    }

    /// Declared range with its `^~>=<` prefix removed.
    pub fn declared_version(&self, package: &str) -> Option<String> {
        self.declared_range(package)
            .map(|range| range.trim().trim_start_matches(RANGE_PREFIXES).trim().to_string())
            .filter(|version| !version.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
  "name": "web",
  "packageManager": "pnpm@8.15.0",
  "dependencies": {"react": "^18.2.0", "zod": "3.22.4"},
  "devDependencies": {"typescript": "~5.3.3", "vitest": ">=1.0.0"},
  "eslintConfig": {"extends": "next"}
}"#;

    #[test]
    fn test_parses_fields() {
        let manifest: PackageJson = serde_json::from_str(MANIFEST).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("web"));
        assert_eq!(manifest.package_manager.as_deref(), Some("pnpm@8.15.0"));
        assert_eq!(manifest.total_dependencies(), 4);
        assert!(manifest.eslint_config.is_some());
        assert!(manifest.prettier.is_none());
    }

    #[test]
    fn test_declared_version_strips_range_prefix() {
        let manifest: PackageJson = serde_json::from_str(MANIFEST).unwrap();
        assert_eq!(manifest.declared_version("react").as_deref(), Some("18.2.0"));
        assert_eq!(manifest.declared_version("zod").as_deref(), Some("3.22.4"));
        assert_eq!(manifest.declared_version("typescript").as_deref(), Some("5.3.3"));
        assert_eq!(manifest.declared_version("vitest").as_deref(), Some("1.0.0"));
        assert_eq!(manifest.declared_version("lodash"), None);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let manifest: PackageJson = serde_json::from_str("{}").unwrap();
        assert_eq!(manifest.total_dependencies(), 0);
        assert_eq!(manifest.declared_range("react"), None);
    }
}
