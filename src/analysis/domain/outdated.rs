use super::package_manager::PackageManagerName;
use super::version::UpdateType;
use serde::Serialize;

/// One package reported by a package manager's outdated check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutdatedPackage {
    pub name: String,
    pub current: String,
    pub latest: String,
    pub update_type: UpdateType,
    pub is_dev_dep: bool,
}

impl OutdatedPackage {
    /// Builds a row, classifying the update from `current` to `latest`.
    pub fn new(name: String, current: String, latest: String, is_dev_dep: bool) -> Self {
        let update_type = UpdateType::between(&current, &latest);
        Self {
            name,
            current,
            latest,
            update_type,
            is_dev_dep,
        }
    }
}

/// Counts of outdated packages by update type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutdatedSummary {
    pub outdated: usize,
    pub major: usize,
    pub minor: usize,
    pub patch: usize,
}

impl OutdatedSummary {
    pub fn from_packages(packages: &[OutdatedPackage]) -> Self {
        packages
            .iter()
            .fold(Self::default(), |mut summary, package| {
                summary.outdated += 1;
                match package.update_type {
                    UpdateType::Major => summary.major += 1,
                    UpdateType::Minor => summary.minor += 1,
                    UpdateType::Patch => summary.patch += 1,
                    UpdateType::None => {}
                }
                summary
            })
    }
}

/// Result of the `deps` analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepsReport {
    pub package_manager: PackageManagerName,
    pub total_dependencies: usize,
    pub outdated: Vec<OutdatedPackage>,
    pub summary: OutdatedSummary,
}

impl DepsReport {
    pub fn new(
        package_manager: PackageManagerName,
        total_dependencies: usize,
        outdated: Vec<OutdatedPackage>,
    ) -> Self {
        let summary = OutdatedSummary::from_packages(&outdated);
        Self {
            package_manager,
            total_dependencies,
            outdated,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_classifies_update() {
        let pkg = OutdatedPackage::new(
            "lodash".to_string(),
            "4.17.20".to_string(),
            "4.17.21".to_string(),
            false,
        );
        assert_eq!(pkg.update_type, UpdateType::Patch);
    }

    #[test]
    fn test_summary_counts_by_update_type() {
        let packages = vec![
            OutdatedPackage::new("lodash".into(), "4.17.20".into(), "4.17.21".into(), false),
            OutdatedPackage::new("typescript".into(), "5.0.0".into(), "5.3.0".into(), true),
        ];
        let summary = OutdatedSummary::from_packages(&packages);
        assert_eq!(
            summary,
            OutdatedSummary {
                outdated: 2,
                major: 0,
                minor: 1,
                patch: 1
            }
        );
    }

    #[test]
    fn test_serializes_camel_case() {
        let pkg = OutdatedPackage::new("react".into(), "17.0.2".into(), "18.2.0".into(), false);
        let json = serde_json::to_value(&pkg).unwrap();
        assert_eq!(json["updateType"], "major");
        assert_eq!(json["isDevDep"], false);
    }
}
