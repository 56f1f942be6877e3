/// Filesystem adapters for project reads and report output
mod file_reader;
mod file_writer;

pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
