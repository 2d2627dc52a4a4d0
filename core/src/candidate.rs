//! Joining the memory file's tables and task sections into skill candidates.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::files::{Snippet, SnippetOptions, collect_snippets, referenced_files};
use crate::markdown::{TaskSection, parse_task_sections, table_rows};
use crate::{contains_marker, default_markers, duration_to_minutes};

/// Heading of the table listing finished tasks.
pub const COMPLETION_LOG_HEADING: &str = "Task Completion Log";
/// Heading of the table mapping task identifiers to titles.
pub const ASSIGNMENT_QUEUE_HEADING: &str = "Task Assignment Queue";

/// Settings that decide which tasks become candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestConfig {
    /// Tasks at least this long are candidates.
    pub min_minutes: u32,
    /// Lowercase keywords marking a task as involving debugging.
    pub markers: Vec<String>,
    /// Maximum number of candidates, in document order.
    pub max_candidates: usize,
    /// Collect file snippets with these limits; `None` skips collection.
    pub snippets: Option<SnippetOptions>,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            min_minutes: 30,
            markers: default_markers(),
            max_candidates: 10,
            snippets: None,
        }
    }
}

/// One row of the completion log table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRow {
    /// Completion date as written.
    pub date: String,
    /// Agent that worked the task.
    pub agent: String,
    /// Task identifier.
    pub task_id: String,
    /// Raw duration text.
    pub duration: String,
    /// Status text.
    pub status: String,
    /// Free-text notes.
    pub notes: String,
}

impl CompletionRow {
    /// Builds a row from parsed table columns. Rows with fewer than six
    /// columns are rejected; extra columns are ignored.
    #[must_use]
    pub fn from_columns(cols: &[String]) -> Option<Self> {
        let [date, agent, task_id, duration, status, notes, ..] = cols else {
            return None;
        };
        Some(Self {
            date: date.clone(),
            agent: agent.clone(),
            task_id: task_id.clone(),
            duration: duration.clone(),
            status: status.clone(),
            notes: notes.clone(),
        })
    }
}

/// A past task selected for skill extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Task identifier.
    pub task_id: String,
    /// Agent that worked the task.
    pub agent: String,
    /// Normalized duration, if it could be parsed.
    pub duration_minutes: Option<u32>,
    /// Status text from the completion log.
    pub status: String,
    /// Notes from the completion log.
    pub notes: String,
    /// Assignment title, section title, or the task identifier.
    pub title: String,
    /// Body lines of the task's detail section.
    pub body: Vec<String>,
    /// Files referenced by the section or the notes.
    pub files: Vec<String>,
    /// Collected snippets; `None` when collection was not requested.
    pub snippets: Option<Vec<Snippet>>,
}

impl Candidate {
    /// `"<N> min"`, or `"unknown"` when the duration could not be parsed.
    #[must_use]
    pub fn duration_label(&self) -> String {
        self.duration_minutes
            .map_or_else(|| "unknown".to_string(), |m| format!("{m} min"))
    }

    /// One-line summary used in reports: `T1: Title (45 min)`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{}: {} ({})", self.task_id, self.title, self.duration_label())
    }
}

/// The parts of a memory file the candidate builder joins.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    /// Completion log rows in document order.
    pub completions: Vec<Vec<String>>,
    /// Task identifier to title, from the assignment queue.
    pub assignment_titles: HashMap<String, String>,
    /// Task detail sections by identifier.
    pub sections: HashMap<String, TaskSection>,
}

impl MemoryDocument {
    /// Extracts the completion log, assignment queue and task sections.
    #[must_use]
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Self {
        let completions = table_rows(lines, COMPLETION_LOG_HEADING);
        let assignment_titles = table_rows(lines, ASSIGNMENT_QUEUE_HEADING)
            .into_iter()
            .filter_map(|row| {
                let mut cols = row.into_iter();
                Some((cols.next()?, cols.next()?))
            })
            .collect();
        let sections = parse_task_sections(lines);

        debug!(
            completions = completions.len(),
            sections = sections.len(),
            "Parsed memory document"
        );

        Self {
            completions,
            assignment_titles,
            sections,
        }
    }

    /// Builds candidates for long-running or debugging-heavy tasks.
    ///
    /// Candidates keep document order and are capped at
    /// `config.max_candidates`. Snippet paths resolve against `project_dir`.
    #[must_use]
    pub fn candidates(&self, project_dir: &Path, config: &HarvestConfig) -> Vec<Candidate> {
        let candidates: Vec<Candidate> = self
            .completions
            .iter()
            .filter_map(|cols| CompletionRow::from_columns(cols))
            .filter(|row| qualifies(row, config))
            .take(config.max_candidates)
            .map(|row| self.build(row, project_dir, config))
            .collect();

        info!(count = candidates.len(), "Selected skill candidates");
        candidates
    }

    fn build(&self, row: CompletionRow, project_dir: &Path, config: &HarvestConfig) -> Candidate {
        let section = self.sections.get(&row.task_id);
        let title = self
            .assignment_titles
            .get(&row.task_id)
            .filter(|t| !t.is_empty())
            .or_else(|| section.map(|s| &s.title).filter(|t| !t.is_empty()))
            .unwrap_or(&row.task_id)
            .clone();
        let body = section.map(|s| s.body.clone()).unwrap_or_default();
        let files = referenced_files(&body, &row.notes);
        let snippets = config
            .snippets
            .map(|options| collect_snippets(project_dir, &files, options));

        Candidate {
            duration_minutes: duration_to_minutes(&row.duration),
            task_id: row.task_id,
            agent: row.agent,
            status: row.status,
            notes: row.notes,
            title,
            body,
            files,
            snippets,
        }
    }
}

fn qualifies(row: &CompletionRow, config: &HarvestConfig) -> bool {
    let is_long = duration_to_minutes(&row.duration).is_some_and(|m| m >= config.min_minutes);
    let is_debug =
        contains_marker(&row.notes, &config.markers) || contains_marker(&row.status, &config.markers);
    if is_long || is_debug {
        debug!(task_id = %row.task_id, is_long, is_debug, "Task qualifies");
    }
    is_long || is_debug
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const MEMORY: &str = "\
# Project Memory

## Task Assignment Queue

| Task | Title | Owner |
|------|-------|-------|
| T1 | Fix login flow | claude |
| T3 | | claude |

## Task Completion Log

| Date | Agent | Task | Duration | Status | Notes |
|------|-------|------|----------|--------|-------|
| 2024-05-01 | agentA | T1 | 45 min | done | hit a bug, had to retry |
| 2024-05-02 | agentB | T2 | 10 min | done | smooth |
| 2024-05-03 | agentA | T3 | 1h30m | done | touched src/app.rs |
| 2024-05-04 | agentC | T4 | - | blocked | waiting |
| 2024-05-05 | agentC | T5 | 2 min |

## Details

### [T3] Build the importer
Imported data.
**Files Created**
- src/import.rs

## Footer
";

    fn document() -> MemoryDocument {
        let lines: Vec<&str> = MEMORY.lines().collect();
        MemoryDocument::parse(&lines)
    }

    #[test]
    fn test_selects_long_and_debug_tasks() {
        let candidates = document().candidates(Path::new("."), &HarvestConfig::default());
        let ids: Vec<&str> = candidates.iter().map(|c| c.task_id.as_str()).collect();
        assert_eq!(ids, vec!["T1", "T3", "T4"]);
    }

    #[test]
    fn test_title_resolution() {
        let candidates = document().candidates(Path::new("."), &HarvestConfig::default());
        assert_eq!(candidates[0].title, "Fix login flow");
        // Empty assignment title falls through to the section title.
        assert_eq!(candidates[1].title, "Build the importer");
        assert_eq!(candidates[2].title, "T4");
    }

    #[test]
    fn test_files_and_body_from_section() {
        let candidates = document().candidates(Path::new("."), &HarvestConfig::default());
        let t3 = &candidates[1];
        assert_eq!(t3.files, vec!["src/import.rs"]);
        assert_eq!(t3.body[0], "Imported data.");
        assert_eq!(t3.duration_minutes, Some(90));
        assert!(t3.snippets.is_none());
    }

    #[test]
    fn test_summary_and_unknown_duration() {
        let candidates = document().candidates(Path::new("."), &HarvestConfig::default());
        assert_eq!(candidates[0].summary(), "T1: Fix login flow (45 min)");
        assert_eq!(candidates[2].duration_label(), "unknown");
    }

    #[test]
    fn test_cap_keeps_document_order() {
        let config = HarvestConfig {
            max_candidates: 2,
            ..HarvestConfig::default()
        };
        let candidates = document().candidates(Path::new("."), &config);
        let ids: Vec<&str> = candidates.iter().map(|c| c.task_id.as_str()).collect();
        assert_eq!(ids, vec!["T1", "T3"]);
    }

    #[test]
    fn test_threshold_and_markers_are_configurable() {
        let config = HarvestConfig {
            min_minutes: 5,
            markers: vec!["smooth".to_string()],
            ..HarvestConfig::default()
        };
        let candidates = document().candidates(Path::new("."), &config);
        let ids: Vec<&str> = candidates.iter().map(|c| c.task_id.as_str()).collect();
        assert_eq!(ids, vec!["T1", "T2", "T3"]);
    }

    #[test]
    fn test_collects_snippets_when_requested() {
        let dir = tempdir().expect("create temp dir");
        fs::create_dir(dir.path().join("src")).expect("create src");
        fs::write(dir.path().join("src/import.rs"), "pub fn import() {}\n").expect("write file");

        let config = HarvestConfig {
            snippets: Some(SnippetOptions::default()),
            ..HarvestConfig::default()
        };
        let candidates = document().candidates(dir.path(), &config);

        let snippets = candidates[1].snippets.as_ref().expect("snippets requested");
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].path, "src/import.rs");
        assert_eq!(snippets[0].text, "pub fn import() {}");
        assert_eq!(candidates[0].snippets, Some(Vec::new()));
    }

    #[test]
    fn test_short_rows_are_ignored() {
        assert!(CompletionRow::from_columns(&["a".to_string(), "b".to_string()]).is_none());
        let doc = document();
        assert!(
            doc.candidates(Path::new("."), &HarvestConfig::default())
                .iter()
                .all(|c| c.task_id != "T5")
        );
    }
}
