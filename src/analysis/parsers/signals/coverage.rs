use serde_json::Value;

/// Line coverage from an istanbul `coverage-summary.json` (`total.lines.pct`).
///
/// Istanbul writes `"Unknown"` instead of a number when no lines were
/// instrumented; that and any other non-numeric value yield `None`.
pub fn parse_coverage_summary(raw: &str) -> Option<f64> {
    let summary: Value = serde_json::from_str(raw.trim()).ok()?;
    summary
        .get("total")?
        .get("lines")?
        .get("pct")?
        .as_f64()
}

/// Line coverage from an lcov tracefile: Σ`LH` / Σ`LF` across all records.
pub fn parse_lcov(raw: &str) -> Option<f64> {
    let mut hit: u64 = 0;
    let mut found: u64 = 0;

    for line in raw.lines() {
        let line = line.trim();
        if let Some(value) = line.strip_prefix("LH:") {
            hit += value.trim().parse::<u64>().unwrap_or(0);
        } else if let Some(value) = line.strip_prefix("LF:") {
            found += value.trim().parse::<u64>().unwrap_or(0);
        }
    }

    if found == 0 {
        return None;
    }
    Some(100.0 * hit as f64 / found as f64)
}
