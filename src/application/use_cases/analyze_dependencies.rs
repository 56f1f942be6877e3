use crate::analysis::domain::{DepsReport, PackageJson, PackageManagerName};
use crate::analysis::parsers::parse_outdated;
use crate::application::dto::AnalysisRequest;
use crate::application::use_cases::DetectPackageManagerUseCase;
use crate::ports::outbound::{display_command, CommandRunner, ProgressReporter, ProjectReader};
use crate::shared::logging::Logger;
use crate::shared::Result;
use tracing::{debug, info, warn, Instrument};

/// AnalyzeDependenciesUseCase - Reports outdated dependencies
///
/// # Type Parameters
/// * `PR` - ProjectReader implementation
/// * `CR` - CommandRunner implementation
/// * `PG` - ProgressReporter implementation
pub struct AnalyzeDependenciesUseCase<'a, PR, CR, PG> {
    project_reader: &'a PR,
    command_runner: &'a CR,
    progress_reporter: &'a PG,
    logger: Logger,
}

impl<'a, PR, CR, PG> AnalyzeDependenciesUseCase<'a, PR, CR, PG>
where
    PR: ProjectReader,
    CR: CommandRunner,
    PG: ProgressReporter,
{
    pub fn new(
        project_reader: &'a PR,
        command_runner: &'a CR,
        progress_reporter: &'a PG,
        logger: &Logger,
    ) -> Self {
        Self {
            project_reader,
            command_runner,
            progress_reporter,
            logger: logger.child("deps"),
        }
    }

    /// Executes the dependency analysis
    ///
    /// # Errors
    /// Returns an error if `package.json` is missing or unparseable. A failed
    /// outdated command is not an error: it yields an empty outdated list.
    pub async fn execute(&self, request: &AnalysisRequest) -> Result<DepsReport> {
        let manifest = self.project_reader.read_manifest(&request.project_path)?;
        let package_manager = DetectPackageManagerUseCase::new(self.project_reader, &self.logger)
            .detect(&request.project_path, Some(&manifest));

        Ok(self.analyze(request, &manifest, package_manager.name).await)
    }

    /// Runs the manager's outdated check and normalizes its output.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
        manifest: &PackageJson,
        package_manager: PackageManagerName,
    ) -> DepsReport {
        self.progress_reporter
            .report(&format!("Checking outdated packages with {}", package_manager));

        let args = package_manager.outdated_args();
        let command = display_command(package_manager.program(), &args);
        let options = request.command_options();

        let outdated = async {
            match self
                .command_runner
                .run(package_manager.program(), &args, &options)
                .await
            {
                Ok(output) => {
                    debug!(command = %command, exit_code = output.exit_code, "Outdated check finished");
                    parse_outdated(package_manager, &output.stdout)
                }
                Err(e) => {
                    warn!(error = %e, "Outdated check failed; reporting no outdated packages");
                    Vec::new()
                }
            }
        }
        .instrument(self.logger.span().clone())
        .await;

        let report = DepsReport::new(package_manager, manifest.total_dependencies(), outdated);
        self.logger.in_scope(|| {
            info!(
                total = report.total_dependencies,
                outdated = report.summary.outdated,
                "Dependency analysis complete"
            )
        });
        report
    }
}
