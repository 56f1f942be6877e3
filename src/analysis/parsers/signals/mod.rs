mod coverage;
mod lint_setup;
mod tsconfig;

pub use coverage::{parse_coverage_summary, parse_lcov};
pub use lint_setup::{
    detect_lint_setup, BIOME_CONFIG_FILES, ESLINT_CONFIG_FILES, PRETTIER_CONFIG_FILES,
};
pub use tsconfig::{parse_tsconfig, strip_jsonc};
