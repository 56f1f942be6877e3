use crate::analysis::domain::UsageReport;
use crate::shared::Result;
use std::path::Path;

/// UsageScanner port for finding every import of one package
pub trait UsageScanner {
    /// Scans source files under `project_dir` for imports of `package` or
    /// any of its subpaths.
    ///
    /// Files that cannot be read or parsed are skipped.
    ///
    /// # Errors
    /// Returns an error if the directory tree itself cannot be walked.
    fn scan(&self, project_dir: &Path, package: &str) -> Result<UsageReport>;
}
