use super::critical_paths::{CriticalPathHits, CriticalPaths};
use crate::analysis::domain::{RiskAssessment, RiskFactor, RiskFactors, RiskLevel, UpdateType};

/// Files importing a package beyond which an upgrade should be staged.
const INCREMENTAL_UPGRADE_THRESHOLD: usize = 20;

/// What the risk of one upgrade is computed from.
#[derive(Debug, Clone)]
pub struct RiskInputs<'a> {
    pub package: &'a str,
    pub from: &'a str,
    pub to: &'a str,
    /// Project-relative paths of every file importing the package.
    pub importing_files: &'a [String],
    /// How many of `importing_files` have a test.
    pub tested_files: usize,
}

/// RiskScorer policy: four additive factors (update type, usage scope,
/// critical paths, caller test coverage) with a natural budget of 100.
pub struct RiskScorer;

impl RiskScorer {
    pub fn assess(inputs: &RiskInputs<'_>) -> RiskAssessment {
        let update_type = UpdateType::between(inputs.from, inputs.to);
        let hits = CriticalPaths::detect(inputs.importing_files.iter().map(String::as_str));

        let factors = RiskFactors {
            update_type: Self::update_type_factor(update_type),
            usage_scope: Self::usage_scope_factor(inputs.importing_files.len()),
            critical_paths: Self::critical_paths_factor(&hits),
            test_coverage: Self::test_coverage_factor(
                inputs.importing_files.len(),
                inputs.tested_files,
            ),
        };
        let risk_score = factors.total();
        let risk_level = RiskLevel::from_score(risk_score);
        let recommendations =
            Self::recommendations(inputs, update_type, &factors, &hits, risk_level);

        RiskAssessment {
            package: inputs.package.to_string(),
            from: inputs.from.to_string(),
            to: inputs.to.to_string(),
            update_type,
            risk_score,
            risk_level,
            factors,
            recommendations,
        }
    }

    pub fn update_type_factor(update_type: UpdateType) -> RiskFactor {
        match update_type {
            UpdateType::Major => RiskFactor::new(40, "Major version update may contain breaking changes"),
            UpdateType::Minor => RiskFactor::new(15, "Minor version update adds features"),
            UpdateType::Patch => RiskFactor::new(5, "Patch update contains fixes only"),
            UpdateType::None => RiskFactor::new(0, "No version change detected"),
        }
    }

    /// 0 files → 0, 1–5 → 10, 6–20 → 20, 21+ → 30.
    pub fn usage_scope_factor(file_count: usize) -> RiskFactor {
        let score = match file_count {
            0 => 0,
            1..=5 => 10,
            6..=20 => 20,
            _ => 30,
        };
        let reason = match file_count {
            0 => "Not imported by any source file".to_string(),
            1 => "Imported in 1 file".to_string(),
            n => format!("Imported in {} files", n),
        };
        RiskFactor::new(score, reason)
    }

    pub fn critical_paths_factor(hits: &CriticalPathHits) -> RiskFactor {
        if !hits.any() {
            return RiskFactor::new(0, "Not used in critical paths");
        }
        RiskFactor::new(
            hits.score(),
            format!("Used in critical paths: {}", hits.areas().join(", ")),
        )
    }

    /// More than half of importing files tested → 0, some tested → 5,
    /// none → 10. No importing files counts as fully covered.
    pub fn test_coverage_factor(file_count: usize, tested: usize) -> RiskFactor {
        if file_count == 0 {
            return RiskFactor::new(0, "No importing files to cover");
        }
        let tested = tested.min(file_count);
        let percentage = (100.0 * tested as f64 / file_count as f64).round() as u32;
        let score = if tested * 2 > file_count {
            0
        } else if tested > 0 {
            5
        } else {
            10
        };
        RiskFactor::new(
            score,
            format!("{}% of importing files have tests", percentage),
        )
    }

    fn recommendations(
        inputs: &RiskInputs<'_>,
        update_type: UpdateType,
        factors: &RiskFactors,
        hits: &CriticalPathHits,
        level: RiskLevel,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if update_type == UpdateType::Major {
            recommendations.push(format!(
                "Review the {} changelog for breaking changes between {} and {}",
                inputs.package, inputs.from, inputs.to
            ));
        }
        if inputs.importing_files.len() > INCREMENTAL_UPGRADE_THRESHOLD {
            recommendations.push(format!(
                "Upgrade incrementally: {} is imported in {} files",
                inputs.package,
                inputs.importing_files.len()
            ));
        }
        if hits.any() {
            recommendations.push(format!(
                "Add integration tests covering {} before upgrading",
                hits.areas().join(", ")
            ));
        }
        if factors.test_coverage.score > 0 {
            recommendations.push(format!(
                "Add tests for the files importing {}",
                inputs.package
            ));
        }
        if level == RiskLevel::Low {
            recommendations.push("Low risk: safe to upgrade with standard testing".to_string());
        }

        recommendations
    }
}
