//! Skill bundles for `skill-harvester`.
//!
//! A harvested skill is a folder with a definition and a reference document
//! describing the session task it came from.
//!
//! # Structure
//!
//! ```text
//! generated/
//! └── login-flow/
//!     ├── SKILL.md               # Frontmatter + generic procedure
//!     └── references/
//!         └── source-task.md     # Metadata, excerpt, file snippets
//! ```
//!
//! # SKILL.md Format
//!
//! ```markdown
//! ---
//! name: login-flow
//! description: 'Reusable workflow derived from session task T1. Use when implementing similar tasks to: Fix login flow.'
//! ---
//!
//! # Fix login flow
//!
//! ## Context
//! - Source task: T1
//! ...
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use harvester_skills::{RenderOptions, RenderedSkill, SkillWriter};
//!
//! let writer = SkillWriter::new(output_dir);
//! for candidate in &candidates {
//!     let skill = RenderedSkill::render(candidate, RenderOptions::default())?;
//!     let dir = writer.write(&skill)?;
//!     println!("Generated: {}", dir.display());
//! }
//! ```

mod error;
mod render;
mod skill;
mod writer;

pub use error::SkillError;
pub use render::{RenderOptions, RenderedSkill};
pub use skill::{Skill, SkillFrontmatter};
pub use writer::{REFERENCES_DIR, SKILL_FILE, SOURCE_TASK_FILE, SkillWriter, unique_path};
