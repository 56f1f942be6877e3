pub mod console;
pub mod filesystem;
pub mod github;
pub mod process;
pub mod source;
