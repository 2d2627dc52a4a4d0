//! Session-memory parsing for `skill-harvester`.
//!
//! A project's memory file is an append-only markdown log. Finished tasks are
//! recorded in a `Task Completion Log` table, titles come from a
//! `Task Assignment Queue` table, and longer notes live in
//! `### [TASK-ID] Title` sections:
//!
//! ```markdown
//! ## Task Completion Log
//!
//! | Date | Agent | Task | Duration | Status | Notes |
//! |------|-------|------|----------|--------|-------|
//! | 2024-05-01 | claude | T1 | 45 min | done | hit a bug, had to retry |
//!
//! ### [T1] Fix login flow
//!
//! **Files Modified**
//! - src/auth/login.rs
//! ```
//!
//! This crate turns such a file into [`Candidate`]s: tasks that ran long or
//! show debugging signals, enriched with their title, section body,
//! referenced files and optional file snippets.
//!
//! # Usage
//!
//! ```rust,ignore
//! use harvester_core::{HarvestConfig, MemoryDocument, locate_memory_file, read_lines};
//!
//! let path = locate_memory_file(project_dir, None)?;
//! let lines = read_lines(&path)?;
//! let candidates = MemoryDocument::parse(&lines).candidates(project_dir, &HarvestConfig::default());
//! for candidate in &candidates {
//!     println!("{}", candidate.summary());
//! }
//! ```

mod candidate;
mod duration;
mod error;
mod files;
mod markdown;
mod markers;
mod memory;
mod slug;

pub use candidate::{
    ASSIGNMENT_QUEUE_HEADING, COMPLETION_LOG_HEADING, Candidate, CompletionRow, HarvestConfig,
    MemoryDocument,
};
pub use duration::duration_to_minutes;
pub use error::HarvestError;
pub use files::{
    Snippet, SnippetOptions, collect_snippets, files_from_notes, files_from_section,
    referenced_files, resolve_file_path,
};
pub use markdown::{
    TaskSection, extract_sections, heading_pattern, parse_table, parse_task_sections, table_rows,
};
pub use markers::{DEFAULT_MARKERS, contains_marker, default_markers, parse_markers};
pub use memory::{MEMORY_FILE_NAMES, default_output_dir, locate_memory_file, read_lines};
pub use slug::{skill_name, slugify, task_id_slug};
