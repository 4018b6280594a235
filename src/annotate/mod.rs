//! Annotation module - stamp sourceURL markers onto files
//!
//! - filetype: tag to comment-style registry
//! - marker: the per-file annotator
//! - walk: recursive directory traversal feeding the annotator

pub mod filetype;
pub mod marker;
pub mod walk;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Filesystem failures. Any of these aborts the whole run.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("root {} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to traverse {}", path.display())]
    Traverse {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl WalkError {
    pub(crate) fn traverse(source: walkdir::Error, fallback: &std::path::Path) -> Self {
        let path = source
            .path()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| fallback.to_path_buf());
        WalkError::Traverse { path, source }
    }
}
