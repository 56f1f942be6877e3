use crate::analysis::domain::{AuditReport, PackageManagerName};
use crate::analysis::parsers::parse_audit;
use crate::application::dto::AnalysisRequest;
use crate::application::use_cases::DetectPackageManagerUseCase;
use crate::ports::outbound::{CommandRunner, ProgressReporter, ProjectReader};
use crate::shared::logging::Logger;
use crate::shared::Result;
use tracing::{debug, info, warn, Instrument};

/// AuditDependenciesUseCase - Runs the package manager's security audit
///
/// An audit that could not run, or whose output could not be read, is
/// reported with `available: false` rather than as a clean result.
pub struct AuditDependenciesUseCase<'a, PR, CR, PG> {
    project_reader: &'a PR,
    command_runner: &'a CR,
    progress_reporter: &'a PG,
    logger: Logger,
}

impl<'a, PR, CR, PG> AuditDependenciesUseCase<'a, PR, CR, PG>
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
            logger: logger.child("audit"),
        }
    }

    pub async fn execute(&self, request: &AnalysisRequest) -> Result<AuditReport> {
        let package_manager = DetectPackageManagerUseCase::new(self.project_reader, &self.logger)
            .execute(&request.project_path);
        Ok(self.audit(request, package_manager.name).await)
    }

    pub async fn audit(
        &self,
        request: &AnalysisRequest,
        package_manager: PackageManagerName,
    ) -> AuditReport {
        let Some(args) = package_manager.audit_args() else {
            self.logger.in_scope(|| {
                info!(package_manager = %package_manager, "Security audit not supported")
            });
            return AuditReport::from_result(package_manager, None);
        };

        self.progress_reporter
            .report(&format!("Running security audit with {}", package_manager));
        let options = request.command_options();

        let result = async {
            match self
                .command_runner
                .run(package_manager.program(), &args, &options)
                .await
            {
                Ok(output) => {
                    debug!(exit_code = output.exit_code, "Audit finished");
                    let parsed = parse_audit(package_manager, &output.stdout);
                    if parsed.is_none() {
                        warn!("Audit output could not be used");
                    }
                    parsed
                }
                Err(e) => {
                    warn!(error = %e, "Audit command failed");
                    None
                }
            }
        }
        .instrument(self.logger.span().clone())
        .await;

        AuditReport::from_result(package_manager, result)
    }
}
