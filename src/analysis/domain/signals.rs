use serde::Serialize;

/// Test coverage found on disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageSignal {
    pub found: bool,
    pub percentage: f64,
    pub source: Option<String>,
}

impl CoverageSignal {
    pub fn not_found() -> Self {
        Self {
            found: false,
            percentage: 0.0,
            source: None,
        }
    }

    pub fn found(percentage: f64, source: &str) -> Self {
        Self {
            found: true,
            percentage: percentage.clamp(0.0, 100.0),
            source: Some(source.to_string()),
        }
    }
}

/// TypeScript compiler strictness as read from tsconfig.json.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfigSignal {
    pub found: bool,
    pub score: u32,
    pub details: String,
    pub no_unused_locals: bool,
    pub no_unused_parameters: bool,
}

impl TsConfigSignal {
    pub fn not_found() -> Self {
        Self {
            found: false,
            score: 0,
            details: "No tsconfig.json found".to_string(),
            no_unused_locals: false,
            no_unused_parameters: false,
        }
    }
}

/// Linter/formatter setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintSignal {
    pub has_linter: bool,
    pub has_formatter: bool,
    pub score: u32,
    pub details: String,
}

impl LintSignal {
    /// Linter worth 70, formatter worth 30.
    pub fn new(linter: Option<&str>, formatter: Option<&str>) -> Self {
        let mut score = 0;
        let mut parts = Vec::new();
        if let Some(linter) = linter {
            score += 70;
            parts.push(format!("{} configured", linter));
        } else {
            parts.push("No linter configured".to_string());
        }
        if let Some(formatter) = formatter {
            score += 30;
            parts.push(format!("{} formatting", formatter));
        } else {
            parts.push("no formatter".to_string());
        }
        Self {
            has_linter: linter.is_some(),
            has_formatter: formatter.is_some(),
            score,
            details: parts.join(", "),
        }
    }
}
