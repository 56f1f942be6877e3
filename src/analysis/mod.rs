/// Analysis core - pure business logic for repository health
///
/// Nothing here performs I/O. Package-manager output arrives as strings and
/// leaves as domain values; scores are computed from already-gathered
/// signals.
pub mod domain;
pub mod parsers;
pub mod policies;
pub mod services;
