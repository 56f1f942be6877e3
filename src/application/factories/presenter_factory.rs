use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Where a rendered report is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportDestination {
    Stdout,
    File(PathBuf),
}

impl ReportDestination {
    /// Reads the `--output` flag. No flag, or `-`, means stdout.
    pub fn from_output_flag(output: Option<PathBuf>) -> Self {
        match output {
            Some(path) if path.as_os_str() != "-" => ReportDestination::File(path),
            _ => ReportDestination::Stdout,
        }
    }
}

/// Builds the presenter for a [`ReportDestination`].
///
/// # Examples
/// ```
/// use depsight::application::factories::{PresenterFactory, ReportDestination};
///
/// let presenter = PresenterFactory::create(ReportDestination::from_output_flag(None));
/// ```
pub struct PresenterFactory;

impl PresenterFactory {
    pub fn create(destination: ReportDestination) -> Box<dyn OutputPresenter> {
        match destination {
            ReportDestination::Stdout => Box::new(StdoutPresenter::new()),
            ReportDestination::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flag_is_stdout() {
        assert_eq!(
            ReportDestination::from_output_flag(None),
            ReportDestination::Stdout
        );
    }

    #[test]
    fn test_dash_is_stdout() {
        assert_eq!(
            ReportDestination::from_output_flag(Some(PathBuf::from("-"))),
            ReportDestination::Stdout
        );
    }

    #[test]
    fn test_path_is_file() {
        assert_eq!(
            ReportDestination::from_output_flag(Some(PathBuf::from("reports/deps.json"))),
            ReportDestination::File(PathBuf::from("reports/deps.json"))
        );
    }

    #[test]
    fn test_file_presenter_writes_report() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("quality.json");
        let presenter = PresenterFactory::create(ReportDestination::File(path.clone()));
        presenter.present("{\"score\": 80}\n").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{\"score\": 80}\n");
    }

    #[test]
    fn test_file_presenter_rejects_missing_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("risk.json");
        let presenter = PresenterFactory::create(ReportDestination::File(path));
        let err = presenter.present("{}").unwrap_err().to_string();
        assert!(err.contains("Parent directory does not exist"));
    }
}
