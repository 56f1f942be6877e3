use crate::analysis::domain::OutdatedPackage;

const DEV_SUFFIX: &str = "(dev)";

/// Parses the table printed by `bun outdated`.
///
/// Bun prints no JSON, only a table drawn with `|` or box-drawing
/// characters:
///
/// ```text
/// | Package          | Current | Update | Latest |
/// |------------------|---------|--------|--------|
/// | typescript (dev) | 5.0.0   | 5.0.4  | 5.3.0  |
/// ```
///
/// A `(dev)` suffix on the package cell marks a dev dependency and is
/// stripped from the name. `Current` and `Latest` are located by header;
/// without a header row they are the second and last cells.
pub fn parse_bun_outdated(raw: &str) -> Vec<OutdatedPackage> {
    let mut columns: Option<Columns> = None;
    let mut packages = Vec::new();

    for line in raw.lines() {
        let line = line.replace('│', "|");
        if !line.contains('|') || is_separator(&line) {
            continue;
        }

        let cells = split_cells(&line);
        if cells.len() < 3 {
            continue;
        }

        if cells[0].eq_ignore_ascii_case("package") {
            columns = Some(Columns::resolve(&cells));
            continue;
        }

        let current_index = columns.as_ref().and_then(|c| c.current).unwrap_or(1);
        let latest_index = columns
            .as_ref()
            .and_then(|c| c.latest)
            .unwrap_or(cells.len() - 1);
        let (Some(current), Some(latest)) = (cells.get(current_index), cells.get(latest_index))
        else {
            continue;
        };

        let (name, is_dev_dep) = match cells[0].strip_suffix(DEV_SUFFIX) {
            Some(stripped) => (stripped.trim(), true),
            None => (cells[0], false),
        };
        if name.is_empty() {
            continue;
        }

        packages.push(OutdatedPackage::new(
            name.to_string(),
            current.to_string(),
            latest.to_string(),
            is_dev_dep,
        ));
    }

    packages
}

struct Columns {
    current: Option<usize>,
    latest: Option<usize>,
}

impl Columns {
    fn resolve(header: &[&str]) -> Self {
        let find = |name: &str| header.iter().position(|c| c.eq_ignore_ascii_case(name));
        Self {
            current: find("current"),
            latest: find("latest"),
        }
    }
}

fn split_cells(line: &str) -> Vec<&str> {
    let trimmed = line.trim().trim_start_matches('|').trim_end_matches('|');
    trimmed.split('|').map(str::trim).collect()
}

/// Border and rule lines contain only drawing characters.
fn is_separator(line: &str) -> bool {
    line.chars().all(|c| {
        c.is_whitespace()
            || matches!(
                c,
                '|' | '-' | '+' | '=' | ':' | '─' | '┼' | '├' | '┤' | '┌' | '┐' | '└' | '┘' | '┬'
                    | '┴'
            )
    })
}
