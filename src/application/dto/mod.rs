/// Data Transfer Objects for application layer
///
/// Requests carry what a use case needs from the command line; the
/// reports themselves are domain value objects serialized as they are.
mod analysis_request;

pub use analysis_request::{AnalysisRequest, RiskRequest};
