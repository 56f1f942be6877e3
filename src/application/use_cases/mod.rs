/// Use cases module: one use case per subcommand, generic over the ports it needs
mod analyze_dependencies;
mod assess_quality;
mod assess_risk;
mod audit_dependencies;
mod detect_package_manager;
mod list_dependabot_updates;
mod scan_usage;

pub use analyze_dependencies::AnalyzeDependenciesUseCase;
pub use assess_quality::AssessQualityUseCase;
pub use assess_risk::AssessRiskUseCase;
pub use audit_dependencies::AuditDependenciesUseCase;
pub use detect_package_manager::DetectPackageManagerUseCase;
pub use list_dependabot_updates::ListDependabotUpdatesUseCase;
pub use scan_usage::ScanUsageUseCase;
