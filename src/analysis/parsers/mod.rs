//! Pure parsers: raw package-manager output and project files in, domain
//! values out. None of them fail; unparseable input is an empty or absent
//! result.
pub mod audit;
pub mod outdated;
pub mod signals;

pub use audit::parse_audit;
pub use outdated::parse_outdated;
