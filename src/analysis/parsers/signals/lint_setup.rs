use crate::analysis::domain::{LintSignal, PackageJson};

pub const ESLINT_CONFIG_FILES: &[&str] = &[
    "eslint.config.js",
    "eslint.config.mjs",
    "eslint.config.cjs",
    "eslint.config.ts",
    ".eslintrc",
    ".eslintrc.js",
    ".eslintrc.cjs",
    ".eslintrc.json",
    ".eslintrc.yml",
    ".eslintrc.yaml",
];

pub const BIOME_CONFIG_FILES: &[&str] = &["biome.json", "biome.jsonc"];

pub const PRETTIER_CONFIG_FILES: &[&str] = &[
    ".prettierrc",
    ".prettierrc.json",
    ".prettierrc.yml",
    ".prettierrc.yaml",
    ".prettierrc.js",
    ".prettierrc.cjs",
    ".prettierrc.mjs",
    ".prettierrc.toml",
    "prettier.config.js",
    "prettier.config.cjs",
    "prettier.config.mjs",
];

/// Detects the linter and formatter a project is set up with.
///
/// `exists` answers whether a root-level file is present. ESLint can also
/// be configured through `eslintConfig` in the manifest and Prettier
/// through `prettier`. Biome counts as both linter and formatter.
pub fn detect_lint_setup(exists: impl Fn(&str) -> bool, manifest: Option<&PackageJson>) -> LintSignal {
    let any = |files: &[&str]| files.iter().any(|file| exists(*file));

    let eslint = any(ESLINT_CONFIG_FILES) || manifest.is_some_and(|m| m.eslint_config.is_some());
    let biome = any(BIOME_CONFIG_FILES);
    let prettier = any(PRETTIER_CONFIG_FILES) || manifest.is_some_and(|m| m.prettier.is_some());

    let linter = if eslint {
        Some("ESLint")
    } else if biome {
        Some("Biome")
    } else {
        None
    };
    let formatter = if prettier {
        Some("Prettier")
    } else if biome {
        Some("Biome")
    } else {
        None
    };

    LintSignal::new(linter, formatter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present<'a>(files: &'a [&'a str]) -> impl Fn(&str) -> bool + 'a {
        move |name| files.iter().any(|file| *file == name)
    }

    #[test]
    fn test_eslint_and_prettier_files() {
        let signal = detect_lint_setup(present(&["eslint.config.js", ".prettierrc"]), None);
        assert_eq!(signal.score, 100);
        assert_eq!(signal.details, "ESLint configured, Prettier formatting");
    }

    #[test]
    fn test_biome_is_both() {
        let signal = detect_lint_setup(present(&["biome.json"]), None);
        assert!(signal.has_linter);
        assert!(signal.has_formatter);
        assert_eq!(signal.details, "Biome configured, Biome formatting");
    }

    #[test]
    fn test_manifest_fields() {
        let manifest: PackageJson =
            serde_json::from_str(r#"{"eslintConfig": {"root": true}}"#).unwrap();
        let signal = detect_lint_setup(present(&[]), Some(&manifest));
        assert_eq!(signal.score, 70);
        assert!(!signal.has_formatter);
    }

    #[test]
    fn test_nothing_configured() {
        let signal = detect_lint_setup(present(&["README.md"]), None);
        assert_eq!(signal.score, 0);
    }
}
