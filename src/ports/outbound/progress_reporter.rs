/// ProgressReporter port for user feedback during long-running steps
///
/// Output goes to stderr so it never mixes with the JSON on stdout.
pub trait ProgressReporter {
    /// Shows `message` as the current step.
    fn report(&self, message: &str);

    /// Clears the indicator once the work is done.
    fn finish(&self);
}
