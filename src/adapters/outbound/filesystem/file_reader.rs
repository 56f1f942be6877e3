use crate::analysis::domain::{
    CoverageSignal, LintSignal, PackageJson, PackageManagerName, TsConfigSignal,
};
use crate::analysis::parsers::signals::{
    detect_lint_setup, parse_coverage_summary, parse_lcov, parse_tsconfig,
};
use crate::ports::outbound::ProjectReader;
use crate::shared::error::DepsightError;
use crate::shared::logging::Logger;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use std::fs;
use std::path::{Component, Path};
use tracing::{debug, warn};

const MANIFEST_FILE: &str = "package.json";
const TSCONFIG_FILE: &str = "tsconfig.json";
const COVERAGE_SUMMARY_FILE: &str = "coverage/coverage-summary.json";
const LCOV_FILE: &str = "coverage/lcov.info";

/// FileSystemReader adapter for reading a project from the file system
///
/// Every read goes through [`read_regular_file`], so symbolic links and
/// oversized files are never followed or loaded.
pub struct FileSystemReader {
    logger: Logger,
}

impl FileSystemReader {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger: logger.child("project_reader"),
        }
    }

    /// Reads an optional project file; anything unreadable counts as absent.
    fn read_optional(&self, project_dir: &Path, relative_path: &str) -> Option<String> {
        let path = project_dir.join(relative_path);
        if !path.exists() {
            return None;
        }
        match read_regular_file(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                self.logger.in_scope(|| {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable file")
                });
                None
            }
        }
    }
}

impl ProjectReader for FileSystemReader {
    fn read_manifest(&self, project_dir: &Path) -> Result<PackageJson> {
        let manifest_path = project_dir.join(MANIFEST_FILE);

        if !manifest_path.exists() {
            return Err(DepsightError::ManifestNotFound {
                path: project_dir.to_path_buf(),
            }
            .into());
        }

        let content = read_regular_file(&manifest_path).map_err(|e| {
            DepsightError::ManifestParseError {
                path: manifest_path.clone(),
                details: e.to_string(),
            }
        })?;

        serde_json::from_str(&content).map_err(|e| {
            DepsightError::ManifestParseError {
                path: manifest_path,
                details: e.to_string(),
            }
            .into()
        })
    }

    fn present_lockfiles(&self, project_dir: &Path) -> Vec<String> {
        let present: Vec<String> = PackageManagerName::PRIORITY
            .iter()
            .flat_map(|manager| manager.lockfiles().iter())
            .filter(|lockfile| self.file_exists(project_dir, lockfile))
            .map(|lockfile| lockfile.to_string())
            .collect();
        self.logger
            .in_scope(|| debug!(lockfiles = ?present, "Scanned for lockfiles"));
        present
    }

    fn file_exists(&self, project_dir: &Path, relative_path: &str) -> bool {
        let relative = Path::new(relative_path);
        let stays_inside = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        if !stays_inside {
            return false;
        }
        fs::symlink_metadata(project_dir.join(relative))
            .map(|metadata| metadata.is_file())
            .unwrap_or(false)
    }

    fn read_coverage(&self, project_dir: &Path) -> CoverageSignal {
        if let Some(percentage) = self
            .read_optional(project_dir, COVERAGE_SUMMARY_FILE)
            .and_then(|raw| parse_coverage_summary(&raw))
        {
            return CoverageSignal::found(percentage, COVERAGE_SUMMARY_FILE);
        }
        if let Some(percentage) = self
            .read_optional(project_dir, LCOV_FILE)
            .and_then(|raw| parse_lcov(&raw))
        {
            return CoverageSignal::found(percentage, LCOV_FILE);
        }
        CoverageSignal::not_found()
    }

    fn read_tsconfig(&self, project_dir: &Path) -> TsConfigSignal {
        match self.read_optional(project_dir, TSCONFIG_FILE) {
            Some(raw) => parse_tsconfig(&raw),
            None => TsConfigSignal::not_found(),
        }
    }

    fn read_lint_setup(&self, project_dir: &Path, manifest: Option<&PackageJson>) -> LintSignal {
        detect_lint_setup(|name| self.file_exists(project_dir, name), manifest)
    }
}
