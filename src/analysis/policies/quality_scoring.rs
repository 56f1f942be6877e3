use crate::analysis::domain::{
    AuditSummary, CoverageSignal, Grade, LintSignal, MetricBreakdown, Priority, QualityBreakdown,
    QualityReport, QualityWeights, Recommendation, TsConfigSignal,
};

const CRITICAL_PENALTY: u64 = 25;
const HIGH_PENALTY: u64 = 15;
const MODERATE_PENALTY: u64 = 5;
const LOW_PENALTY: u64 = 2;

const DEAD_CODE_BASE: u32 = 50;
const DEAD_CODE_FLAG_BONUS: u32 = 25;

/// Everything the quality score is computed from.
#[derive(Debug, Clone)]
pub struct QualitySignals {
    pub total_dependencies: usize,
    pub outdated_dependencies: usize,
    /// `None` when the audit could not run.
    pub audit: Option<AuditSummary>,
    pub coverage: CoverageSignal,
    pub tsconfig: TsConfigSignal,
    pub lint: LintSignal,
}

/// QualityScorer policy: six metrics, a weighted mean, a grade, and
/// rule-based recommendations.
pub struct QualityScorer;

impl QualityScorer {
    pub fn score(signals: &QualitySignals, weights: &QualityWeights) -> QualityReport {
        let breakdown = QualityBreakdown {
            dependency_freshness: Self::freshness(
                signals.total_dependencies,
                signals.outdated_dependencies,
                weights.dependency_freshness,
            ),
            security: Self::security(signals.audit.as_ref(), weights.security),
            test_coverage: Self::coverage(&signals.coverage, weights.test_coverage),
            typescript_strictness: MetricBreakdown::new(
                signals.tsconfig.score,
                weights.typescript_strictness,
                signals.tsconfig.details.clone(),
            ),
            linting: MetricBreakdown::new(
                signals.lint.score,
                weights.linting,
                signals.lint.details.clone(),
            ),
            dead_code: Self::dead_code(&signals.tsconfig, weights.dead_code),
        };

        let score = Self::weighted_mean(&breakdown);
        let recommendations = Self::recommendations(signals, &breakdown);

        QualityReport {
            score,
            grade: Grade::from_score(score),
            breakdown,
            recommendations,
        }
    }

    /// Σ(score × weight) / Σweight, rounded. A zero weight sum scores 0.
    pub fn weighted_mean(breakdown: &QualityBreakdown) -> u32 {
        let metrics = breakdown.metrics();
        let total_weight: u64 = metrics.iter().map(|m| u64::from(m.weight)).sum();
        if total_weight == 0 {
            return 0;
        }
        let weighted: u64 = metrics
            .iter()
            .map(|m| u64::from(m.score) * u64::from(m.weight))
            .sum();
        (weighted as f64 / total_weight as f64).round() as u32
    }

    /// Share of dependencies that are up to date.
    pub fn freshness(total: usize, outdated: usize, weight: u32) -> MetricBreakdown {
        if total == 0 {
            return MetricBreakdown::new(100, weight, "No dependencies declared");
        }
        let current = total.saturating_sub(outdated);
        let score = (100.0 * current as f64 / total as f64).round() as u32;
        MetricBreakdown::new(
            score,
            weight,
            format!("{} of {} dependencies up to date", current, total),
        )
    }

    /// 100 minus a fixed penalty per finding, floored at 0. An audit that
    /// could not run does not penalize.
    pub fn security(summary: Option<&AuditSummary>, weight: u32) -> MetricBreakdown {
        let Some(summary) = summary else {
            return MetricBreakdown::new(100, weight, "Security audit unavailable");
        };

        let penalty = [
            (summary.critical, CRITICAL_PENALTY),
            (summary.high, HIGH_PENALTY),
            (summary.moderate, MODERATE_PENALTY),
            (summary.low, LOW_PENALTY),
        ]
        .into_iter()
        .fold(0u64, |total, (count, each)| {
            total.saturating_add(count.saturating_mul(each))
        })
        .min(100);
        let score = (100 - penalty) as u32;

        let buckets = [
            (summary.critical, "critical"),
            (summary.high, "high"),
            (summary.moderate, "moderate"),
            (summary.low, "low"),
        ];
        let parts: Vec<String> = buckets
            .iter()
            .filter(|(count, _)| *count > 0)
            .map(|(count, label)| format!("{} {}", count, label))
            .collect();
        let details = if parts.is_empty() {
            "No known vulnerabilities".to_string()
        } else {
            format!("{} vulnerabilities", parts.join(", "))
        };

        MetricBreakdown::new(score, weight, details)
    }

    pub fn coverage(signal: &CoverageSignal, weight: u32) -> MetricBreakdown {
        if !signal.found {
            return MetricBreakdown::new(0, weight, "No coverage data found");
        }
        let source = signal.source.as_deref().unwrap_or("coverage report");
        MetricBreakdown::new(
            signal.percentage.round() as u32,
            weight,
            format!("{:.1}% line coverage ({})", signal.percentage, source),
        )
    }

    /// Heuristic: 50, plus 25 for each of `noUnusedLocals` and
    /// `noUnusedParameters`.
    pub fn dead_code(tsconfig: &TsConfigSignal, weight: u32) -> MetricBreakdown {
        let mut score = DEAD_CODE_BASE;
        let mut enabled = Vec::new();
        if tsconfig.no_unused_locals {
            score += DEAD_CODE_FLAG_BONUS;
            enabled.push("noUnusedLocals");
        }
        if tsconfig.no_unused_parameters {
            score += DEAD_CODE_FLAG_BONUS;
            enabled.push("noUnusedParameters");
        }
        let details = if enabled.is_empty() {
            "No unused-code compiler checks enabled".to_string()
        } else {
            format!("{} enabled", enabled.join(" and "))
        };
        MetricBreakdown::new(score, weight, details)
    }

    /// Emitted in metric priority order: security, freshness, coverage,
    /// dead code, TypeScript, linting.
    fn recommendations(
        signals: &QualitySignals,
        breakdown: &QualityBreakdown,
    ) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        let security = &breakdown.security;
        match &signals.audit {
            None => recommendations.push(Recommendation::new(
                Priority::Medium,
                "Run a security audit; none could be performed for this project",
            )),
            Some(summary) => {
                if security.details.contains("critical") {
                    recommendations.push(Recommendation::new(
                        Priority::High,
                        format!(
                            "Fix {} critical vulnerabilities immediately",
                            summary.critical
                        ),
                    ));
                }
                if summary.high > 0 {
                    recommendations.push(Recommendation::new(
                        Priority::High,
                        format!("Resolve {} high severity vulnerabilities", summary.high),
                    ));
                }
                if summary.moderate.saturating_add(summary.low) > 0 {
                    recommendations.push(Recommendation::new(
                        Priority::Medium,
                        format!(
                            "Review {} moderate/low severity vulnerabilities",
                            summary.moderate.saturating_add(summary.low)
                        ),
                    ));
                }
            }
        }

        let freshness = &breakdown.dependency_freshness;
        if freshness.score < 50 {
            recommendations.push(Recommendation::new(
                Priority::High,
                format!(
                    "Update outdated dependencies ({} of {} are behind)",
                    signals.outdated_dependencies, signals.total_dependencies
                ),
            ));
        } else if freshness.score < 80 {
            recommendations.push(Recommendation::new(
                Priority::Medium,
                format!(
                    "Update {} outdated dependencies",
                    signals.outdated_dependencies
                ),
            ));
        }

        let coverage = &breakdown.test_coverage;
        if !signals.coverage.found {
            recommendations.push(Recommendation::new(
                Priority::Medium,
                "Set up test coverage reporting",
            ));
        } else if coverage.score < 50 {
            recommendations.push(Recommendation::new(
                Priority::High,
                "Increase test coverage above 50%",
            ));
        } else if coverage.score < 80 {
            recommendations.push(Recommendation::new(
                Priority::Low,
                "Increase test coverage toward 80%",
            ));
        }

        if breakdown.dead_code.score < 100 {
            recommendations.push(Recommendation::new(
                Priority::Low,
                "Enable noUnusedLocals and noUnusedParameters to catch unused code",
            ));
        }

        if !signals.tsconfig.found {
            recommendations.push(Recommendation::new(
                Priority::Low,
                "Add a tsconfig.json with strict compiler options",
            ));
        } else if breakdown.typescript_strictness.score < 70 {
            recommendations.push(Recommendation::new(
                Priority::Medium,
                "Enable strict mode in tsconfig.json",
            ));
        }

        if !signals.lint.has_linter {
            recommendations.push(Recommendation::new(
                Priority::Medium,
                "Add a linter such as ESLint or Biome",
            ));
        }
        if !signals.lint.has_formatter {
            recommendations.push(Recommendation::new(
                Priority::Low,
                "Add a formatter such as Prettier or Biome",
            ));
        }

        recommendations
    }
}
