/// Shared kernel: error types, result alias, logging context and
/// file-system safety checks used across all layers.
pub mod error;
pub mod logging;
pub mod result;
pub mod security;

pub use result::Result;
