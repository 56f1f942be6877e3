use crate::analysis::domain::UsageReport;
use crate::ports::outbound::{ProgressReporter, UsageScanner};
use crate::shared::logging::Logger;
use crate::shared::Result;
use std::path::Path;
use tracing::info;

/// ScanUsageUseCase - Finds every import of one package in a project
pub struct ScanUsageUseCase<'a, US, PG> {
    usage_scanner: &'a US,
    progress_reporter: &'a PG,
    logger: Logger,
}

impl<'a, US: UsageScanner, PG: ProgressReporter> ScanUsageUseCase<'a, US, PG> {
    pub fn new(usage_scanner: &'a US, progress_reporter: &'a PG, logger: &Logger) -> Self {
        Self {
            usage_scanner,
            progress_reporter,
            logger: logger.child("usage"),
        }
    }

    /// # Errors
    /// Returns an error if `package` is blank or the scan itself fails.
    pub fn execute(&self, project_dir: &Path, package: &str) -> Result<UsageReport> {
        let package = package.trim();
        anyhow::ensure!(!package.is_empty(), "Package name must not be empty");

        self.progress_reporter
            .report(&format!("Scanning imports of {}", package));
        let report = self.usage_scanner.scan(project_dir, package)?;

        self.logger.in_scope(|| {
            info!(
                package,
                files = report.files.len(),
                imports = report.total_imports,
                "Usage scan complete"
            )
        });
        Ok(report)
    }
}
