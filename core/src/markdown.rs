//! Line-oriented extraction of the memory file's headings, tables and task
//! sections.
//!
//! This only understands the conventions the memory file follows: flat
//! `#`-headings, pipe tables, and `### [TASK-ID] Title` detail blocks.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static ANY_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s").expect("valid heading regex"));

static TOP_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##?\s").expect("valid top heading regex"));

static TASK_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^###\s*\[(.+?)\]\s*(.+)$").expect("valid task heading regex")
});

/// Builds a pattern matching a level 1-6 heading whose text starts with `title`.
///
/// # Panics
///
/// Never in practice: the title is escaped before compiling.
#[must_use]
pub fn heading_pattern(title: &str) -> Regex {
    Regex::new(&format!(r"^#{{1,6}}\s+{}\b", regex::escape(title)))
        .expect("escaped heading title is a valid regex")
}

/// Finds the body line ranges of every heading matching `heading`.
///
/// A range starts just after the heading and ends before the next heading of
/// any level.
#[must_use]
pub fn extract_sections<S: AsRef<str>>(lines: &[S], heading: &Regex) -> Vec<Range<usize>> {
    let mut sections = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if heading.is_match(lines[i].as_ref()) {
            let start = i + 1;
            i = start;
            while i < lines.len() && !ANY_HEADING.is_match(lines[i].as_ref()) {
                i += 1;
            }
            sections.push(start..i);
        } else {
            i += 1;
        }
    }
    sections
}

/// Extracts pipe-table rows, skipping header (`Date`) and divider rows.
///
/// Non-table lines are ignored, so a whole section body can be passed in.
#[must_use]
pub fn parse_table<S: AsRef<str>>(lines: &[S]) -> Vec<Vec<String>> {
    lines
        .iter()
        .filter_map(|line| parse_row(line.as_ref()))
        .collect()
}

fn parse_row(line: &str) -> Option<Vec<String>> {
    let text = line.trim();
    let inner = text.strip_prefix('|')?;
    let inner = inner.strip_suffix('|').unwrap_or(inner);

    let cols: Vec<String> = inner.split('|').map(|c| c.trim().to_string()).collect();
    if cols.len() < 2 {
        return None;
    }

    let first = &cols[0];
    if first.eq_ignore_ascii_case("date") || first.chars().all(|c| c == '-') {
        return None;
    }
    Some(cols)
}

/// Rows of every table under headings titled `title`, in document order.
#[must_use]
pub fn table_rows<S: AsRef<str>>(lines: &[S], title: &str) -> Vec<Vec<String>> {
    let pattern = heading_pattern(title);
    extract_sections(lines, &pattern)
        .into_iter()
        .flat_map(|range| parse_table(&lines[range]))
        .collect()
}

/// A `### [TASK-ID] Title` detail block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSection {
    /// Heading text after the bracketed identifier.
    pub title: String,
    /// Lines between the heading and the next level 1 or 2 heading.
    pub body: Vec<String>,
}

/// Collects task detail sections keyed by task identifier.
///
/// Level 3+ headings may appear inside a task body; only level 1 or 2
/// headings end it. A later section with the same identifier replaces an
/// earlier one.
#[must_use]
pub fn parse_task_sections<S: AsRef<str>>(lines: &[S]) -> HashMap<String, TaskSection> {
    let mut sections = HashMap::new();
    let mut i = 0;
    while i < lines.len() {
        let Some(caps) = TASK_HEADING.captures(lines[i].as_ref()) else {
            i += 1;
            continue;
        };
        let task_id = caps[1].trim().to_string();
        let title = caps[2].trim().to_string();

        let start = i + 1;
        i = start;
        while i < lines.len() && !TOP_HEADING.is_match(lines[i].as_ref()) {
            i += 1;
        }
        let body = lines[start..i]
            .iter()
            .map(|l| l.as_ref().to_string())
            .collect();
        sections.insert(task_id, TaskSection { title, body });
    }
    sections
}
