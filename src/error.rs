use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Path '{}' does not exist.", .path.display())]
    PathNotFound { path: PathBuf },

    #[error("'{}' is not a directory.", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("cannot read directory '{}'", .path.display())]
    Enumeration {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl TreeError {
    /// Root validation failures are reported as a single line and a clean return.
    pub fn is_invalid_root(&self) -> bool {
        matches!(
            self,
            TreeError::PathNotFound { .. } | TreeError::NotADirectory { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TreeError>;
