//! Locating and reading the session memory file.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::HarvestError;

/// File names searched, in order, when no memory file is given explicitly.
pub const MEMORY_FILE_NAMES: [&str; 3] = ["CLAUDE.md", "Claude.md", "claude.md"];

/// Locates the memory file for a project.
///
/// An explicit path is resolved against `project_dir` when relative and must
/// exist. Otherwise the first of [`MEMORY_FILE_NAMES`] present in
/// `project_dir` is used.
///
/// # Errors
///
/// Returns [`HarvestError::MemoryFileNotFound`] if the explicit path does not
/// exist, or [`HarvestError::NoMemoryFile`] if no default name is present.
pub fn locate_memory_file(
    project_dir: &Path,
    explicit: Option<&Path>,
) -> Result<PathBuf, HarvestError> {
    if let Some(path) = explicit {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_dir.join(path)
        };
        return if path.is_file() {
            Ok(path)
        } else {
            Err(HarvestError::MemoryFileNotFound { path })
        };
    }

    MEMORY_FILE_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| HarvestError::NoMemoryFile {
            project_dir: project_dir.to_path_buf(),
        })
}

/// Reads the memory file into lines, replacing invalid UTF-8.
///
/// # Errors
///
/// Returns [`HarvestError::ReadMemory`] if the file cannot be read.
pub fn read_lines(path: &Path) -> Result<Vec<String>, HarvestError> {
    let bytes = std::fs::read(path).map_err(|source| HarvestError::ReadMemory {
        path: path.to_path_buf(),
        source,
    })?;
    let lines: Vec<String> = String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect();
    debug!(path = %path.display(), lines = lines.len(), "Read memory file");
    Ok(lines)
}

/// Where generated skills go when no output directory is configured.
#[must_use]
pub fn default_output_dir(project_dir: &Path) -> PathBuf {
    project_dir
        .join("agents_library")
        .join("agent-orchestrator-universal")
        .join("skills")
        .join("generated")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_locate_default_name() {
        let dir = tempdir().expect("create temp dir");
        fs::write(dir.path().join("claude.md"), "# memory").expect("write memory");

        let found = locate_memory_file(dir.path(), None).expect("locate memory file");
        assert_eq!(found.file_name().and_then(|n| n.to_str()), Some("claude.md"));
    }

    #[test]
    fn test_locate_prefers_first_name() {
        let dir = tempdir().expect("create temp dir");
        fs::write(dir.path().join("CLAUDE.md"), "upper").expect("write memory");
        fs::write(dir.path().join("Claude.md"), "title").expect("write memory");

        let found = locate_memory_file(dir.path(), None).expect("locate memory file");
        assert_eq!(fs::read_to_string(found).expect("read memory"), "upper");
    }

    #[test]
    fn test_locate_missing_default() {
        let dir = tempdir().expect("create temp dir");
        let result = locate_memory_file(dir.path(), None);
        assert!(matches!(result, Err(HarvestError::NoMemoryFile { .. })));
    }

    #[test]
    fn test_locate_explicit_relative() {
        let dir = tempdir().expect("create temp dir");
        fs::create_dir(dir.path().join("notes")).expect("create notes dir");
        fs::write(dir.path().join("notes/memory.md"), "log").expect("write memory");

        let found = locate_memory_file(dir.path(), Some(Path::new("notes/memory.md")))
            .expect("locate explicit file");
        assert_eq!(found, dir.path().join("notes/memory.md"));
    }

    #[test]
    fn test_locate_explicit_missing() {
        let dir = tempdir().expect("create temp dir");
        fs::write(dir.path().join("CLAUDE.md"), "present").expect("write memory");

        let result = locate_memory_file(dir.path(), Some(Path::new("other.md")));
        assert!(matches!(result, Err(HarvestError::MemoryFileNotFound { .. })));
    }

    #[test]
    fn test_read_lines_lossy() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("CLAUDE.md");
        fs::write(&path, [b'a', b'\n', 0xFE, b'b', b'\r', b'\n']).expect("write memory");

        let lines = read_lines(&path).expect("read lines");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "a");
        assert!(lines[1].ends_with('b'));
    }
}
