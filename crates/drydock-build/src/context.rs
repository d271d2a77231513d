use std::path::{Path, PathBuf};

/// Build descriptor every service directory must carry.
pub const DOCKERFILE: &str = "Dockerfile";

/// Check that a service directory is buildable.
///
/// Runs before anything builds or mutates; a violation aborts the run with
/// the missing item named.
pub fn validate_context(dir: &Path) -> Result<(), ContextError> {
    if !dir.is_dir() {
        return Err(ContextError::MissingDirectory(dir.to_path_buf()));
    }
    if !dir.join(DOCKERFILE).is_file() {
        return Err(ContextError::MissingDockerfile(dir.to_path_buf()));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("service directory {0} does not exist")]
    MissingDirectory(PathBuf),

    #[error("no Dockerfile in service directory {0}")]
    MissingDockerfile(PathBuf),
}
