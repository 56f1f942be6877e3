use crate::analysis::domain::{CoverageSignal, LintSignal, PackageJson, TsConfigSignal};
use crate::shared::Result;
use std::path::Path;

/// ProjectReader port for reading a JavaScript/TypeScript project on disk
///
/// Missing optional sources (coverage report, tsconfig, lint config) are
/// never errors: they come back as "not found" signals.
pub trait ProjectReader {
    /// Reads and parses `package.json`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - `package.json` does not exist
    /// - It cannot be read or is not valid JSON
    fn read_manifest(&self, project_dir: &Path) -> Result<PackageJson>;

    /// Names of the known lockfiles present in the project root.
    fn present_lockfiles(&self, project_dir: &Path) -> Vec<String>;

    /// Whether the project-relative `relative_path` exists as a file.
    fn file_exists(&self, project_dir: &Path, relative_path: &str) -> bool;

    fn read_coverage(&self, project_dir: &Path) -> CoverageSignal;

    fn read_tsconfig(&self, project_dir: &Path) -> TsConfigSignal;

    /// `manifest` is consulted for inline `eslintConfig`/`prettier` entries.
    fn read_lint_setup(&self, project_dir: &Path, manifest: Option<&PackageJson>) -> LintSignal;
}
