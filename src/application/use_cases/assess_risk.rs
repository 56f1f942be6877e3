use crate::analysis::domain::{PackageManagerName, RiskAssessment};
use crate::analysis::policies::{RiskInputs, RiskScorer, TestConventions};
use crate::application::dto::{AnalysisRequest, RiskRequest};
use crate::application::use_cases::DetectPackageManagerUseCase;
use crate::ports::outbound::{
    display_command, CommandRunner, ProgressReporter, ProjectReader, UsageScanner,
};
use crate::shared::error::DepsightError;
use crate::shared::logging::Logger;
use crate::shared::Result;
use std::path::Path;
use tracing::{debug, info, Instrument};

/// AssessRiskUseCase - Scores the risk of upgrading one package
///
/// # Type Parameters
/// * `PR` - ProjectReader implementation
/// * `CR` - CommandRunner implementation
/// * `US` - UsageScanner implementation
/// * `PG` - ProgressReporter implementation
pub struct AssessRiskUseCase<'a, PR, CR, US, PG> {
    project_reader: &'a PR,
    command_runner: &'a CR,
    usage_scanner: &'a US,
    progress_reporter: &'a PG,
    logger: Logger,
}

impl<'a, PR, CR, US, PG> AssessRiskUseCase<'a, PR, CR, US, PG>
where
    PR: ProjectReader,
    CR: CommandRunner,
    US: UsageScanner,
    PG: ProgressReporter,
{
    pub fn new(
        project_reader: &'a PR,
        command_runner: &'a CR,
        usage_scanner: &'a US,
        progress_reporter: &'a PG,
        logger: &Logger,
    ) -> Self {
        Self {
            project_reader,
            command_runner,
            usage_scanner,
            progress_reporter,
            logger: logger.child("risk"),
        }
    }

    /// Executes the risk assessment
    ///
    /// # Errors
    /// Returns an error if:
    /// - `from` is not given and the package is not declared in `package.json`
    /// - `to` is not given and the latest version cannot be resolved
    /// - The usage scan fails
    pub async fn execute(
        &self,
        request: &AnalysisRequest,
        risk: &RiskRequest,
    ) -> Result<RiskAssessment> {
        let project_dir = &request.project_path;
        let package = risk.package.trim();
        anyhow::ensure!(!package.is_empty(), "Package name must not be empty");

        let manifest = self.project_reader.read_manifest(project_dir);

        let from = match &risk.from {
            Some(from) => from.clone(),
            None => manifest?
                .declared_version(package)
                .ok_or_else(|| DepsightError::PackageNotInManifest {
                    package: package.to_string(),
                })?,
        };

        let to = match &risk.to {
            Some(to) => to.clone(),
            None => {
                let package_manager =
                    DetectPackageManagerUseCase::new(self.project_reader, &self.logger)
                        .execute(project_dir)
                        .name;
                self.latest_version(request, package_manager, package).await?
            }
        };

        self.progress_reporter
            .report(&format!("Scanning imports of {}", package));
        let usage = self.usage_scanner.scan(project_dir, package)?;
        let importing_files: Vec<String> =
            usage.file_paths().into_iter().map(str::to_string).collect();
        let tested_files = self.count_tested(project_dir, &importing_files);

        let assessment = RiskScorer::assess(&RiskInputs {
            package,
            from: &from,
            to: &to,
            importing_files: &importing_files,
            tested_files,
        });

        self.logger.in_scope(|| {
            info!(
                package,
                from = %assessment.from,
                to = %assessment.to,
                score = assessment.risk_score,
                level = ?assessment.risk_level,
                "Risk assessment complete"
            )
        });
        Ok(assessment)
    }

    /// Importing files that are tests themselves, or that have a test under
    /// one of the recognised conventions.
    fn count_tested(&self, project_dir: &Path, importing_files: &[String]) -> usize {
        importing_files
            .iter()
            .filter(|path| {
                TestConventions::is_test_file(path)
                    || TestConventions::candidates(path)
                        .iter()
                        .any(|candidate| self.project_reader.file_exists(project_dir, candidate))
            })
            .count()
    }

    /// Asks the registry for the latest published version of `package`.
    async fn latest_version(
        &self,
        request: &AnalysisRequest,
        package_manager: PackageManagerName,
        package: &str,
    ) -> Result<String> {
        self.progress_reporter
            .report(&format!("Resolving latest version of {}", package));

        let (program, args) = package_manager.latest_version_command(package);
        let command = display_command(program, &args);
        let unavailable = |details: String| DepsightError::LatestVersionUnavailable {
            package: package.to_string(),
            details,
        };

        let output = self
            .command_runner
            .run(program, &args, &request.command_options())
            .instrument(self.logger.span().clone())
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        if !output.success() {
            let stderr = output.stderr.trim();
            return Err(unavailable(if stderr.is_empty() {
                format!("`{}` exited with code {}", command, output.exit_code)
            } else {
                format!("`{}` failed: {}", command, stderr)
            })
            .into());
        }

        let version = parse_version_output(&output.stdout)
            .ok_or_else(|| unavailable(format!("`{}` printed no version", command)))?;
        self.logger
            .in_scope(|| debug!(package, version = %version, "Resolved latest version"));
        Ok(version)
    }
}

/// Last non-empty line of a registry query, without surrounding quotes.
fn parse_version_output(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(|line| line.trim().trim_matches('"'))
        .filter(|line| !line.is_empty())
        .last()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_output_takes_last_line() {
        assert_eq!(parse_version_output("18.3.1\n"), Some("18.3.1".to_string()));
        assert_eq!(
            parse_version_output("npm warn config\n\"5.4.2\"\n\n"),
            Some("5.4.2".to_string())
        );
        assert_eq!(parse_version_output("  \n"), None);
    }
}
