//! Referenced-file extraction and snippet collection.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static BOLD_FILES_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\*\*Files (Created|Modified|Involved)\*\*").expect("valid label regex")
});

static PLAIN_FILES_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Files (Created|Modified|Involved)").expect("valid label regex")
});

static FILE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_./-]+\.[A-Za-z0-9]+").expect("valid file regex"));

/// Paths listed under `Files Created/Modified/Involved` labels in a task body.
///
/// Each `-` bullet after a label contributes one path. A blank line or a
/// heading ends the list; a later label starts capturing again.
#[must_use]
pub fn files_from_section<S: AsRef<str>>(body: &[S]) -> Vec<String> {
    let mut files = Vec::new();
    let mut capture = false;

    for line in body {
        let text = line.as_ref().trim();
        if BOLD_FILES_LABEL.is_match(text) || PLAIN_FILES_LABEL.is_match(text) {
            capture = true;
            continue;
        }
        if !capture {
            continue;
        }
        if text.starts_with('-') {
            let path = text.trim_start_matches(['-', ' ']).trim();
            if !path.is_empty() {
                files.push(path.to_string());
            }
        } else if text.is_empty() || text.starts_with('#') {
            capture = false;
        }
    }

    files
}

/// Bare `name.ext` tokens mentioned in free-text notes.
#[must_use]
pub fn files_from_notes(notes: &str) -> Vec<String> {
    FILE_NAME
        .find_iter(notes)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Files for a task: its section's file list, or the notes' file names if
/// the section lists none.
#[must_use]
pub fn referenced_files<S: AsRef<str>>(body: &[S], notes: &str) -> Vec<String> {
    let files = files_from_section(body);
    if files.is_empty() {
        files_from_notes(notes)
    } else {
        files
    }
}

/// Limits applied while collecting snippets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnippetOptions {
    /// Maximum number of snippets per candidate.
    pub max_files: usize,
    /// Maximum number of lines read from each file.
    pub max_lines: usize,
}

impl Default for SnippetOptions {
    fn default() -> Self {
        Self {
            max_files: 3,
            max_lines: 80,
        }
    }
}

/// The leading lines of a referenced file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// The path as it was written in the memory file.
    pub path: String,
    /// The first lines of the file, newline-joined.
    pub text: String,
}

/// Resolves a referenced path against the project root.
///
/// Existing absolute paths are used as-is; anything else is joined onto
/// `root` after dropping a leading `./`. Returns `None` if nothing exists
/// there.
#[must_use]
pub fn resolve_file_path(root: &Path, file_path: &str) -> Option<PathBuf> {
    if file_path.is_empty() {
        return None;
    }
    let as_given = Path::new(file_path);
    if as_given.is_absolute() && as_given.exists() {
        return Some(as_given.to_path_buf());
    }
    let cleaned = file_path.strip_prefix("./").unwrap_or(file_path);
    let candidate = root.join(cleaned);
    candidate.exists().then_some(candidate)
}

/// Reads the first lines of each resolvable file, up to `options.max_files`.
///
/// Unresolvable or unreadable files are skipped. Invalid UTF-8 is replaced
/// rather than rejected.
#[must_use]
pub fn collect_snippets<S: AsRef<str>>(
    root: &Path,
    files: &[S],
    options: SnippetOptions,
) -> Vec<Snippet> {
    let mut snippets = Vec::new();

    for file_path in files.iter().map(AsRef::as_ref) {
        if snippets.len() >= options.max_files {
            break;
        }
        let Some(resolved) = resolve_file_path(root, file_path) else {
            debug!(path = file_path, "Skipping unresolved file reference");
            continue;
        };
        let bytes = match std::fs::read(&resolved) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(path = %resolved.display(), error = %err, "Skipping unreadable file");
                continue;
            }
        };
        let content = String::from_utf8_lossy(&bytes);
        let text = content
            .lines()
            .take(options.max_lines)
            .collect::<Vec<_>>()
            .join("\n");
        snippets.push(Snippet {
            path: file_path.to_string(),
            text,
        });
    }

    snippets
}
