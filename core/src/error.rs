//! Error types for locating and reading the memory file.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a harvest before any candidate is considered.
///
/// Everything past reading the memory file degrades gracefully instead of
/// producing one of these.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// An explicitly requested memory file does not exist.
    #[error("memory file not found: {}", path.display())]
    MemoryFileNotFound {
        /// The resolved path that was checked.
        path: PathBuf,
    },

    /// None of the default memory file names exist in the project directory.
    #[error("no memory file found in {} (CLAUDE.md/Claude.md/claude.md)", project_dir.display())]
    NoMemoryFile {
        /// The project directory that was searched.
        project_dir: PathBuf,
    },

    /// The memory file exists but could not be read.
    #[error("failed to read memory file at {}: {source}", path.display())]
    ReadMemory {
        /// Path to the memory file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
