use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter grade for an overall quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// ≥90 A, ≥80 B, ≥70 C, ≥60 D, else F.
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

/// One scored quality dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricBreakdown {
    pub score: u32,
    pub weight: u32,
    pub details: String,
}

impl MetricBreakdown {
    pub fn new(score: u32, weight: u32, details: impl Into<String>) -> Self {
        Self {
            score: score.min(100),
            weight,
            details: details.into(),
        }
    }
}

/// Weight of each dimension in the overall score.
///
/// The defaults sum to 100, but any positive total is accepted since the
/// overall score is normalized by the weight sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityWeights {
    pub dependency_freshness: u32,
    pub security: u32,
    pub test_coverage: u32,
    pub typescript_strictness: u32,
    pub linting: u32,
    pub dead_code: u32,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            dependency_freshness: 20,
            security: 25,
            test_coverage: 20,
            typescript_strictness: 10,
            linting: 10,
            dead_code: 15,
        }
    }
}

impl QualityWeights {
    pub fn total(&self) -> u32 {
        [
            self.security,
            self.test_coverage,
            self.typescript_strictness,
            self.linting,
            self.dead_code,
        ]
        .into_iter()
        .fold(self.dependency_freshness, u32::saturating_add)
    }
}

/// The six dimensions of a quality report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityBreakdown {
    pub dependency_freshness: MetricBreakdown,
    pub security: MetricBreakdown,
    pub test_coverage: MetricBreakdown,
    pub typescript_strictness: MetricBreakdown,
    pub linting: MetricBreakdown,
    pub dead_code: MetricBreakdown,
}

impl QualityBreakdown {
    pub fn metrics(&self) -> [&MetricBreakdown; 6] {
        [
            &self.dependency_freshness,
            &self.security,
            &self.test_coverage,
            &self.typescript_strictness,
            &self.linting,
            &self.dead_code,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub action: String,
}

impl Recommendation {
    pub fn new(priority: Priority, action: impl Into<String>) -> Self {
        Self {
            priority,
            action: action.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityReport {
    pub score: u32,
    pub grade: Grade,
    pub breakdown: QualityBreakdown,
    pub recommendations: Vec<Recommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::from_score(100), Grade::A);
        assert_eq!(Grade::from_score(90), Grade::A);
        assert_eq!(Grade::from_score(89), Grade::B);
        assert_eq!(Grade::from_score(80), Grade::B);
        assert_eq!(Grade::from_score(79), Grade::C);
        assert_eq!(Grade::from_score(70), Grade::C);
        assert_eq!(Grade::from_score(69), Grade::D);
        assert_eq!(Grade::from_score(60), Grade::D);
        assert_eq!(Grade::from_score(59), Grade::F);
        assert_eq!(Grade::from_score(0), Grade::F);
    }

    #[test]
    fn test_default_weights_sum_to_100() {
        assert_eq!(QualityWeights::default().total(), 100);
    }

    #[test]
    fn test_partial_weights_fill_defaults() {
        let weights: QualityWeights = serde_json::from_str(r#"{"security": 50}"#).unwrap();
        assert_eq!(weights.security, 50);
        assert_eq!(weights.linting, 10);
        assert_eq!(weights.total(), 125);
    }

    #[test]
    fn test_grade_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Grade::B).unwrap(), "\"B\"");
    }
}
