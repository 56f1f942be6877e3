//! depsight - repo-health reports for JavaScript/TypeScript projects
//!
//! This library inspects a JS/TS project for dependency freshness, security
//! advisories, import usage and code-quality signals, normalizing the output
//! of npm, pnpm, yarn and bun into one data model, and scores the result.
//! It follows hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`analysis`): Value objects, output parsers, scoring policies
//! - **Application Layer** (`application`): Use cases, one per subcommand
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Error types, logging context, file-system safety
//!
//! # Example
//!
//! ```no_run
//! use depsight::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<()> {
//! let logger = Logger::root("deps");
//! let project_reader = FileSystemReader::new(logger.clone());
//! let command_runner = TokioCommandRunner::new(logger.clone());
//! let progress_reporter = StderrProgressReporter::quiet();
//!
//! let use_case = AnalyzeDependenciesUseCase::new(
//!     &project_reader,
//!     &command_runner,
//!     &progress_reporter,
//!     &logger,
//! );
//!
//! let request = AnalysisRequest::new(PathBuf::from("."));
//! let report = use_case.execute(&request).await?;
//! println!("{} outdated", report.summary.outdated);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod analysis;
pub mod application;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::github::GhCliPullRequestSource;
    pub use crate::adapters::outbound::process::TokioCommandRunner;
    pub use crate::adapters::outbound::source::TreeSitterImportScanner;
    pub use crate::analysis::domain::{
        AuditReport, AuditSummary, CoverageSignal, DependabotError, DependabotErrorKind,
        DependabotReport, DepsReport, FileUsage, ImportKind, LintSignal, OutdatedPackage,
        PackageJson, PackageManagerInfo, PackageManagerName, PullRequest, QualityReport,
        QualityWeights, RiskAssessment, RiskLevel, Severity, TsConfigSignal, UpdateType,
        UsageReport, Vulnerability,
    };
    pub use crate::application::dto::{AnalysisRequest, RiskRequest};
    pub use crate::application::use_cases::{
        AnalyzeDependenciesUseCase, AssessQualityUseCase, AssessRiskUseCase,
        AuditDependenciesUseCase, DetectPackageManagerUseCase, ListDependabotUpdatesUseCase,
        ScanUsageUseCase,
    };
    pub use crate::ports::outbound::{
        CommandError, CommandOptions, CommandOutput, CommandRunner, OutputPresenter,
        ProgressReporter, ProjectReader, PullRequestSource, UsageScanner,
    };
    pub use crate::shared::logging::Logger;
    pub use crate::shared::Result;
}
