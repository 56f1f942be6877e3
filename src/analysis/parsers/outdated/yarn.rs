use crate::analysis::domain::OutdatedPackage;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct YarnLine {
    #[serde(rename = "type")]
    line_type: String,
    #[serde(default)]
    data: Value,
}

/// Cells stay untyped: yarn prints `null` for missing values such as URL.
#[derive(Debug, Deserialize)]
struct YarnTable {
    head: Vec<String>,
    body: Vec<Vec<Value>>,
}

/// Column positions resolved from the table header.
struct Columns {
    package: usize,
    current: usize,
    latest: usize,
    package_type: Option<usize>,
}

impl Columns {
    fn resolve(head: &[String]) -> Option<Self> {
        let find = |name: &str| head.iter().position(|h| h.trim().eq_ignore_ascii_case(name));
        Some(Self {
            package: find("Package")?,
            current: find("Current")?,
            latest: find("Latest")?,
            package_type: find("Package Type"),
        })
    }
}

/// Parses `yarn outdated --json` (NDJSON).
///
/// Only the `table` line carries data; other lines (info, warnings,
/// non-JSON noise) are skipped. Columns are located by header name, and a
/// row missing a package, current or latest string is dropped on its own.
pub fn parse_yarn_outdated(raw: &str) -> Vec<OutdatedPackage> {
    raw.lines()
        .filter_map(|line| serde_json::from_str::<YarnLine>(line.trim()).ok())
        .filter(|line| line.line_type == "table")
        .filter_map(|line| serde_json::from_value::<YarnTable>(line.data).ok())
        .flat_map(|table| parse_table(&table))
        .collect()
}

fn parse_table(table: &YarnTable) -> Vec<OutdatedPackage> {
    let Some(columns) = Columns::resolve(&table.head) else {
        return Vec::new();
    };

    table
        .body
        .iter()
        .filter_map(|row| {
            let cell = |index: usize| row.get(index).and_then(Value::as_str);
            let name = cell(columns.package)?;
            let current = cell(columns.current)?;
            let latest = cell(columns.latest)?;
            let is_dev_dep = columns
                .package_type
                .and_then(cell)
                .is_some_and(|kind| kind == "devDependencies");
            Some(OutdatedPackage::new(
                name.to_string(),
                current.to_string(),
                latest.to_string(),
                is_dev_dep,
            ))
        })
        .collect()
}
