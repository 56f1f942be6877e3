use crate::analysis::domain::{PackageManagerInfo, PackageManagerName};

/// PackageManagerResolver service: decides which manager governs a project
/// from lockfile evidence and the manifest's corepack spec.
///
/// This is pure decision logic; finding which lockfiles exist is done by
/// the caller.
pub struct PackageManagerResolver;

impl PackageManagerResolver {
    /// Resolves the governing package manager.
    ///
    /// # Arguments
    /// * `present_lockfiles` - Names of the lockfiles found in the project root
    /// * `corepack_spec` - The manifest's `packageManager` field, if any
    ///
    /// # Returns
    /// Lockfile evidence wins by priority (bun > pnpm > yarn > npm). Without
    /// a lockfile a corepack spec naming a known manager is used, and npm is
    /// the final default.
    pub fn resolve(present_lockfiles: &[String], corepack_spec: Option<&str>) -> PackageManagerInfo {
        let mut detected_lockfiles = Vec::new();
        let mut managers = Vec::new();

        for manager in PackageManagerName::PRIORITY {
            for lockfile in manager.lockfiles() {
                if present_lockfiles.iter().any(|present| present == lockfile) {
                    detected_lockfiles.push(lockfile.to_string());
                    if !managers.contains(&manager) {
                        managers.push(manager);
                    }
                }
            }
        }

        if let Some(&name) = managers.first() {
            let lockfile = detected_lockfiles
                .iter()
                .find(|lockfile| name.lockfiles().iter().any(|owned| *owned == lockfile.as_str()))
                .cloned();
            return PackageManagerInfo {
                lockfile,
                has_multiple_lockfiles: managers.len() > 1,
                detected_lockfiles,
                corepack_spec: corepack_spec.map(str::to_string),
                ..PackageManagerInfo::new(name)
            };
        }

        if let Some(spec) = corepack_spec {
            if let Some(name) = Self::parse_corepack_spec(spec) {
                return PackageManagerInfo {
                    corepack_spec: Some(spec.to_string()),
                    ..PackageManagerInfo::new(name)
                };
            }
        }

        PackageManagerInfo::new(PackageManagerName::Npm)
    }

    /// `pnpm@8.15.0` → pnpm. The version part (and any `+sha...` hash) is
    /// ignored.
    pub fn parse_corepack_spec(spec: &str) -> Option<PackageManagerName> {
        let name = spec.split('@').next()?;
        PackageManagerName::from_name(name)
    }
}
