use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// This port abstracts the output destination (stdout, file, etc.)
/// where the JSON report is written.
pub trait OutputPresenter {
    /// Presents the serialized report
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - The destination is a symbolic link or its directory is missing
    fn present(&self, content: &str) -> Result<()>;
}
