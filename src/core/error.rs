//! Error kinds surfaced by the trek core.
//!
//! Filesystem errors are converted into [CoreError] at the directory reader and search
//! boundaries. None of them is fatal: the app shows them as a timed notice.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("{0}")]
    ResourceLimitExceeded(String),
    #[error("{0}")]
    BoundaryCondition(String),
    #[error("I/O error on {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
}

impl CoreError {
    /// Maps an [io::Error] raised while touching `path` onto a core error kind.
    pub fn from_io(err: &io::Error, path: &Path) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path),
            io::ErrorKind::NotFound => CoreError::NotFound(path),
            io::ErrorKind::NotADirectory => CoreError::NotADirectory(path),
            _ => CoreError::Io {
                path,
                message: err.to_string(),
            },
        }
    }

    pub fn no_parent() -> Self {
        CoreError::BoundaryCondition("No parent directory".to_string())
    }

    pub fn no_forward() -> Self {
        CoreError::BoundaryCondition("No forward history".to_string())
    }

    /// Informational conditions are notices, not failures.
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            CoreError::BoundaryCondition(_) | CoreError::ResourceLimitExceeded(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_kinds_are_mapped() {
        let path = Path::new("/some/where");
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        let missing = io::Error::from(io::ErrorKind::NotFound);
        let other = io::Error::other("boom");

        assert_eq!(
            CoreError::from_io(&denied, path),
            CoreError::PermissionDenied(path.to_path_buf())
        );
        assert_eq!(
            CoreError::from_io(&missing, path),
            CoreError::NotFound(path.to_path_buf())
        );
        assert!(matches!(
            CoreError::from_io(&other, path),
            CoreError::Io { .. }
        ));
    }

    #[test]
    fn boundary_is_informational() {
        assert!(CoreError::no_parent().is_informational());
        assert!(!CoreError::NotFound(PathBuf::from("x")).is_informational());
        assert_eq!(CoreError::no_parent().to_string(), "No parent directory");
    }
}
