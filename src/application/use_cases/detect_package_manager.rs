use crate::analysis::domain::{PackageJson, PackageManagerInfo};
use crate::analysis::services::PackageManagerResolver;
use crate::ports::outbound::ProjectReader;
use crate::shared::logging::Logger;
use std::path::Path;
use tracing::{debug, warn};

/// DetectPackageManagerUseCase - Decides which package manager governs a project
///
/// Lockfile evidence wins over the manifest's `packageManager` field; with
/// neither, npm is assumed.
pub struct DetectPackageManagerUseCase<'a, PR> {
    project_reader: &'a PR,
    logger: Logger,
}

impl<'a, PR: ProjectReader> DetectPackageManagerUseCase<'a, PR> {
    pub fn new(project_reader: &'a PR, logger: &Logger) -> Self {
        Self {
            project_reader,
            logger: logger.child("detector"),
        }
    }

    /// Detects the package manager, reading the manifest if there is one.
    ///
    /// A missing or broken manifest only removes the corepack evidence; it
    /// never fails detection.
    pub fn execute(&self, project_dir: &Path) -> PackageManagerInfo {
        let manifest = match self.project_reader.read_manifest(project_dir) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                self.logger
                    .in_scope(|| debug!(error = %e, "No usable manifest for corepack detection"));
                None
            }
        };
        self.detect(project_dir, manifest.as_ref())
    }

    /// Detects the package manager from an already-read manifest.
    pub fn detect(&self, project_dir: &Path, manifest: Option<&PackageJson>) -> PackageManagerInfo {
        let lockfiles = self.project_reader.present_lockfiles(project_dir);
        let corepack_spec = manifest.and_then(|m| m.package_manager.as_deref());
        let info = PackageManagerResolver::resolve(&lockfiles, corepack_spec);

        self.logger.in_scope(|| {
            if info.has_multiple_lockfiles {
                warn!(
                    lockfiles = ?info.detected_lockfiles,
                    selected = %info.name,
                    "Multiple lockfiles detected; using the highest-priority package manager"
                );
            }
            debug!(
                package_manager = %info.name,
                lockfile = ?info.lockfile,
                corepack_spec = ?info.corepack_spec,
                "Package manager detected"
            );
        });
        info
    }
}
