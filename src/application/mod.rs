/// Application layer - Use cases and DTOs
///
/// This layer orchestrates the analysis domain and reaches the outside
/// world only through the outbound ports.
pub mod dto;
pub mod factories;
pub mod use_cases;
