mod critical_paths;
mod quality_scoring;
mod risk_scoring;
mod test_conventions;

pub use critical_paths::{CriticalPathHits, CriticalPaths};
pub use quality_scoring::{QualityScorer, QualitySignals};
pub use risk_scoring::{RiskInputs, RiskScorer};
pub use test_conventions::TestConventions;
