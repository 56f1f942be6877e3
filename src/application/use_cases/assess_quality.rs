use crate::analysis::domain::{QualityReport, QualityWeights};
use crate::analysis::policies::{QualityScorer, QualitySignals};
use crate::application::dto::AnalysisRequest;
use crate::application::use_cases::{
    AnalyzeDependenciesUseCase, AuditDependenciesUseCase, DetectPackageManagerUseCase,
};
use crate::ports::outbound::{CommandRunner, ProgressReporter, ProjectReader};
use crate::shared::logging::Logger;
use crate::shared::Result;
use tracing::info;

/// AssessQualityUseCase - Aggregates project health signals into a weighted score
///
/// All five signals are gathered in one `tokio::join!`. The outdated check
/// and the audit wait on child processes, and the coverage, tsconfig and
/// lint reads run while those commands are in flight.
///
/// # Type Parameters
/// * `PR` - ProjectReader implementation
/// * `CR` - CommandRunner implementation
/// * `PG` - ProgressReporter implementation
pub struct AssessQualityUseCase<'a, PR, CR, PG> {
    project_reader: &'a PR,
    command_runner: &'a CR,
    progress_reporter: &'a PG,
    weights: QualityWeights,
    logger: Logger,
}

impl<'a, PR, CR, PG> AssessQualityUseCase<'a, PR, CR, PG>
where
    PR: ProjectReader,
    CR: CommandRunner,
    PG: ProgressReporter,
{
    pub fn new(
        project_reader: &'a PR,
        command_runner: &'a CR,
        progress_reporter: &'a PG,
        weights: QualityWeights,
        logger: &Logger,
    ) -> Self {
        Self {
            project_reader,
            command_runner,
            progress_reporter,
            weights,
            logger: logger.child("quality"),
        }
    }

    /// Executes the quality assessment
    ///
    /// # Errors
    /// Returns an error if `package.json` is missing or unparseable.
    pub async fn execute(&self, request: &AnalysisRequest) -> Result<QualityReport> {
        let project_dir = &request.project_path;
        let manifest = self.project_reader.read_manifest(project_dir)?;
        let package_manager = DetectPackageManagerUseCase::new(self.project_reader, &self.logger)
            .detect(project_dir, Some(&manifest))
            .name;

        let deps = AnalyzeDependenciesUseCase::new(
            self.project_reader,
            self.command_runner,
            self.progress_reporter,
            &self.logger,
        );
        let audit = AuditDependenciesUseCase::new(
            self.project_reader,
            self.command_runner,
            self.progress_reporter,
            &self.logger,
        );
        let (deps_report, audit_report, coverage, tsconfig, lint) = tokio::join!(
            deps.analyze(request, &manifest, package_manager),
            audit.audit(request, package_manager),
            async { self.project_reader.read_coverage(project_dir) },
            async { self.project_reader.read_tsconfig(project_dir) },
            async {
                self.project_reader
                    .read_lint_setup(project_dir, Some(&manifest))
            },
        );

        let signals = QualitySignals {
            total_dependencies: deps_report.total_dependencies,
            outdated_dependencies: deps_report.summary.outdated,
            audit: audit_report.available.then_some(audit_report.summary),
            coverage,
            tsconfig,
            lint,
        };

        let report = QualityScorer::score(&signals, &self.weights);
        self.logger.in_scope(|| {
            info!(
                score = report.score,
                grade = %report.grade,
                recommendations = report.recommendations.len(),
                "Quality assessment complete"
            )
        });
        Ok(report)
    }
}
