/// Source-code adapters
mod import_scanner;

pub use import_scanner::{extract_imports, TreeSitterImportScanner, DEFAULT_EXCLUDED_DIRS};
