use super::version::UpdateType;
use serde::Serialize;

/// Upgrade risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// 0–25 low, 26–50 medium, 51–75 high, 76+ critical.
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=25 => RiskLevel::Low,
            26..=50 => RiskLevel::Medium,
            51..=75 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskFactor {
    pub score: u32,
    pub reason: String,
}

impl RiskFactor {
    pub fn new(score: u32, reason: impl Into<String>) -> Self {
        Self {
            score,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactors {
    pub update_type: RiskFactor,
    pub usage_scope: RiskFactor,
    pub critical_paths: RiskFactor,
    pub test_coverage: RiskFactor,
}

impl RiskFactors {
    pub fn total(&self) -> u32 {
        self.update_type.score
            + self.usage_scope.score
            + self.critical_paths.score
            + self.test_coverage.score
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub package: String,
    pub from: String,
    pub to: String,
    pub update_type: UpdateType,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub factors: RiskFactors,
    pub recommendations: Vec<String>,
}
