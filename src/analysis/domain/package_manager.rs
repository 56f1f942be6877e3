use serde::Serialize;
use std::fmt;

/// The four supported package managers, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerName {
    Bun,
    Pnpm,
    Yarn,
    Npm,
}

impl PackageManagerName {
    /// Highest priority first: lockfile evidence for an earlier entry wins.
    pub const PRIORITY: [PackageManagerName; 4] = [
        PackageManagerName::Bun,
        PackageManagerName::Pnpm,
        PackageManagerName::Yarn,
        PackageManagerName::Npm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManagerName::Bun => "bun",
            PackageManagerName::Pnpm => "pnpm",
            PackageManagerName::Yarn => "yarn",
            PackageManagerName::Npm => "npm",
        }
    }

    /// Parses a manager name as it appears in a corepack spec.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "bun" => Some(PackageManagerName::Bun),
            "pnpm" => Some(PackageManagerName::Pnpm),
            "yarn" => Some(PackageManagerName::Yarn),
            "npm" => Some(PackageManagerName::Npm),
            _ => None,
        }
    }

    /// Lockfile names that count as evidence for this manager.
    pub fn lockfiles(&self) -> &'static [&'static str] {
        match self {
            PackageManagerName::Bun => &["bun.lock", "bun.lockb"],
            PackageManagerName::Pnpm => &["pnpm-lock.yaml"],
            PackageManagerName::Yarn => &["yarn.lock"],
            PackageManagerName::Npm => &["package-lock.json"],
        }
    }

    /// Executable to invoke.
    pub fn program(&self) -> &'static str {
        self.as_str()
    }

    pub fn install_command(&self) -> String {
        format!("{} install", self.as_str())
    }

    pub fn upgrade_command(&self) -> String {
        match self {
            PackageManagerName::Yarn => "yarn upgrade".to_string(),
            other => format!("{} update", other.as_str()),
        }
    }

    /// Arguments for the machine-readable outdated report.
    pub fn outdated_args(&self) -> Vec<String> {
        let args: &[&str] = match self {
            PackageManagerName::Npm => &["outdated", "--json"],
            PackageManagerName::Pnpm => &["outdated", "--format", "json"],
            PackageManagerName::Yarn => &["outdated", "--json"],
            PackageManagerName::Bun => &["outdated"],
        };
        args.iter().map(|s| s.to_string()).collect()
    }

    /// Arguments for the machine-readable audit report, or `None` when the
    /// manager has no audit output we can parse.
    pub fn audit_args(&self) -> Option<Vec<String>> {
        match self {
            PackageManagerName::Bun => None,
            _ => Some(vec!["audit".to_string(), "--json".to_string()]),
        }
    }

    /// Program and arguments printing the latest published version of
    /// `package` as a bare string.
    pub fn latest_version_command(&self, package: &str) -> (&'static str, Vec<String>) {
        match self {
            PackageManagerName::Pnpm => (
                "pnpm",
                vec!["view".to_string(), package.to_string(), "version".to_string()],
            ),
            PackageManagerName::Yarn => (
                "yarn",
                vec![
                    "info".to_string(),
                    package.to_string(),
                    "version".to_string(),
                    "--silent".to_string(),
                ],
            ),
            PackageManagerName::Npm | PackageManagerName::Bun => (
                "npm",
                vec!["view".to_string(), package.to_string(), "version".to_string()],
            ),
        }
    }
}

impl fmt::Display for PackageManagerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which package manager governs a project, and the evidence for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManagerInfo {
    pub name: PackageManagerName,
    pub lockfile: Option<String>,
    pub install_command: String,
    pub upgrade_command: String,
    pub has_multiple_lockfiles: bool,
    pub detected_lockfiles: Vec<String>,
    pub corepack_spec: Option<String>,
}

impl PackageManagerInfo {
    pub fn new(name: PackageManagerName) -> Self {
        Self {
            name,
            lockfile: None,
            install_command: name.install_command(),
            upgrade_command: name.upgrade_command(),
            has_multiple_lockfiles: false,
            detected_lockfiles: Vec::new(),
            corepack_spec: None,
        }
    }
}
