use crate::shared::error::DepsightError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Largest project file (manifest, tsconfig, coverage summary, source file)
/// we are willing to read into memory.
pub const MAX_FILE_SIZE: u64 = 20 * 1024 * 1024;

/// Validates that `path` is an existing, non-symlinked directory.
///
/// Runs before any analysis so that every subcommand fails early and
/// uniformly on a bad `--cwd`.
pub fn validate_project_dir(path: &Path) -> Result<()> {
    let invalid = |reason: String| DepsightError::InvalidProjectPath {
        path: path.to_path_buf(),
        reason,
    };

    if !path.exists() {
        return Err(invalid("Directory does not exist".to_string()).into());
    }

    let metadata = fs::symlink_metadata(path)
        .map_err(|e| invalid(format!("Failed to read path metadata: {}", e)))?;

    if metadata.is_symlink() {
        return Err(invalid(
            "Project path is a symbolic link. Symbolic links are not allowed.".to_string(),
        )
        .into());
    }

    if !metadata.is_dir() {
        return Err(invalid("Not a directory".to_string()).into());
    }

    Ok(())
}

/// Reads a regular file after rejecting symlinks and oversized files.
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist or its metadata can't be read
/// - The path is a symbolic link or not a regular file
/// - The file exceeds [`MAX_FILE_SIZE`]
pub fn read_regular_file(path: &Path) -> Result<String> {
    let metadata = fs::symlink_metadata(path).map_err(|e| DepsightError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. Symbolic links are not followed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    if metadata.len() > MAX_FILE_SIZE {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            metadata.len(),
            MAX_FILE_SIZE
        );
    }

    fs::read_to_string(path).map_err(|e| {
        DepsightError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}
