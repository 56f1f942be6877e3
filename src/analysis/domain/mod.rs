pub mod dependabot;
pub mod manifest;
pub mod outdated;
pub mod package_manager;
pub mod quality;
pub mod risk;
pub mod signals;
pub mod usage;
pub mod version;
pub mod vulnerability;

pub use dependabot::{
    BumpTitle, DependabotError, DependabotErrorKind, DependabotReport, DependabotUpdate,
    PullRequest,
};
pub use manifest::PackageJson;
pub use outdated::{DepsReport, OutdatedPackage, OutdatedSummary};
pub use package_manager::{PackageManagerInfo, PackageManagerName};
pub use quality::{
    Grade, MetricBreakdown, Priority, QualityBreakdown, QualityReport, QualityWeights,
    Recommendation,
};
pub use risk::{RiskAssessment, RiskFactor, RiskFactors, RiskLevel};
pub use signals::{CoverageSignal, LintSignal, TsConfigSignal};
pub use usage::{matches_package, FileUsage, ImportKind, ImportRecord, UsageBreakdown, UsageReport};
pub use version::{compare_versions, SemverParts, UpdateType};
pub use vulnerability::{AuditReport, AuditResult, AuditSummary, Severity, Vulnerability};
