use crate::analysis::domain::TsConfigSignal;
use serde_json::Value;

/// Compiler options counted towards strictness, in reporting order.
const STRICT_CHECKS: &[&str] = &[
    "strict",
    "noImplicitAny",
    "strictNullChecks",
    "noImplicitReturns",
    "noFallthroughCasesInSwitch",
    "noUncheckedIndexedAccess",
    "noUnusedLocals",
    "noUnusedParameters",
];

/// Options that `strict: true` turns on unless explicitly disabled.
const IMPLIED_BY_STRICT: &[&str] = &["noImplicitAny", "strictNullChecks"];

/// Scores a `tsconfig.json` by how many strictness options it enables.
///
/// The file is JSONC: comments and trailing commas are accepted. `extends`
/// is not followed. A file that still fails to parse counts as found with
/// a score of 0.
pub fn parse_tsconfig(raw: &str) -> TsConfigSignal {
    let Ok(config) = serde_json::from_str::<Value>(&strip_jsonc(raw)) else {
        return TsConfigSignal {
            found: true,
            score: 0,
            details: "tsconfig.json could not be parsed".to_string(),
            no_unused_locals: false,
            no_unused_parameters: false,
        };
    };

    let options = config.get("compilerOptions");
    let flag = |name: &str| options.and_then(|o| o.get(name)).and_then(Value::as_bool);
    let strict = flag("strict") == Some(true);
    let enabled = |name: &str| match flag(name) {
        Some(value) => value,
        None => strict && IMPLIED_BY_STRICT.iter().any(|implied| *implied == name),
    };

    let missing: Vec<&str> = STRICT_CHECKS
        .iter()
        .copied()
        .filter(|name| !enabled(*name))
        .collect();
    let enabled_count = STRICT_CHECKS.len() - missing.len();
    let score = (100.0 * enabled_count as f64 / STRICT_CHECKS.len() as f64).round() as u32;

    let details = if missing.is_empty() {
        format!("{}/{} strict checks enabled", enabled_count, STRICT_CHECKS.len())
    } else {
        format!(
            "{}/{} strict checks enabled (missing: {})",
            enabled_count,
            STRICT_CHECKS.len(),
            missing.join(", ")
        )
    };

    TsConfigSignal {
        found: true,
        score,
        details,
        no_unused_locals: enabled("noUnusedLocals"),
        no_unused_parameters: enabled("noUnusedParameters"),
    }
}

/// Removes `//` and `/* */` comments and trailing commas outside strings.
pub fn strip_jsonc(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut without_comments = String::with_capacity(raw.len());
    let mut i = 0;
    let mut in_string = false;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            without_comments.push(c);
            if c == '\\' {
                if let Some(&escaped) = chars.get(i + 1) {
                    without_comments.push(escaped);
                    i += 1;
                }
            } else if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match (c, chars.get(i + 1)) {
            ('"', _) => {
                in_string = true;
                without_comments.push(c);
                i += 1;
            }
            ('/', Some('/')) => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            ('/', Some('*')) => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i += 2;
            }
            _ => {
                without_comments.push(c);
                i += 1;
            }
        }
    }

    remove_trailing_commas(&without_comments)
}

fn remove_trailing_commas(json: &str) -> String {
    let chars: Vec<char> = json.chars().collect();
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(&escaped) = chars.get(i + 1) {
                    out.push(escaped);
                    i += 1;
                }
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
            out.push(c);
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if !matches!(next, Some('}') | Some(']')) {
                out.push(c);
            }
        } else {
            out.push(c);
        }
        i += 1;
    }

    out
}
