mod bun;
mod npm;
mod pnpm;
mod yarn;

use crate::analysis::domain::{OutdatedPackage, PackageManagerName};

pub use bun::parse_bun_outdated;
pub use npm::parse_npm_outdated;
pub use pnpm::parse_pnpm_outdated;
pub use yarn::parse_yarn_outdated;

/// Dispatches to the parser for `manager`'s outdated output.
pub fn parse_outdated(manager: PackageManagerName, raw: &str) -> Vec<OutdatedPackage> {
    match manager {
        PackageManagerName::Npm => parse_npm_outdated(raw),
        PackageManagerName::Pnpm => parse_pnpm_outdated(raw),
        PackageManagerName::Yarn => parse_yarn_outdated(raw),
        PackageManagerName::Bun => parse_bun_outdated(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_parser_returns_empty_on_empty_input() {
        for manager in PackageManagerName::PRIORITY {
            assert!(parse_outdated(manager, "").is_empty(), "{manager}");
            assert!(parse_outdated(manager, "   \n").is_empty(), "{manager}");
        }
    }

    #[test]
    fn test_every_parser_returns_empty_on_garbage() {
        for manager in PackageManagerName::PRIORITY {
            assert!(parse_outdated(manager, "{not json").is_empty(), "{manager}");
            assert!(parse_outdated(manager, "npm ERR! code E404").is_empty(), "{manager}");
        }
    }
}
