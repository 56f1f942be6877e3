/// Ports module defining interfaces for hexagonal architecture
///
/// The analysis core only talks to the outside world through these
/// outbound (driven) ports.
pub mod outbound;
