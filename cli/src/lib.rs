//! Harvest reusable skills from a project's session memory log.
//!
//! Scans the memory file (`CLAUDE.md` by default) for tasks that ran long or
//! involved debugging and turns each into a skill bundle.
//!
//! # Usage
//!
//! ```bash
//! # Dry run: list candidates only
//! cargo run -p harvester-cli -- --project-dir ../my-project
//!
//! # Generate bundles, with snippets of referenced files
//! cargo run -p harvester-cli -- --write --include-snippets
//!
//! # Stricter selection
//! cargo run -p harvester-cli -- --min-minutes 60 --debug-markers "panic,regression"
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use harvester_core::{
    HarvestConfig, MemoryDocument, SnippetOptions, default_markers, default_output_dir,
    locate_memory_file, parse_markers, read_lines,
};
use harvester_skills::{RenderOptions, RenderedSkill, SkillWriter};
use tracing::{info, warn};

/// Command-line options.
#[derive(Parser, Debug, Clone)]
#[command(name = "skill-harvester")]
#[command(about = "Harvest skills from session memory", long_about = None)]
pub struct Args {
    /// Project directory containing the memory file.
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Memory file path. Relative paths resolve against the project directory.
    /// Defaults to the first of CLAUDE.md, Claude.md, claude.md.
    #[arg(long)]
    pub memory_file: Option<PathBuf>,

    /// Output directory for generated skills.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Tasks at least this many minutes long become candidates.
    #[arg(long, default_value_t = 30)]
    pub min_minutes: u32,

    /// Comma-separated keywords marking a task as involving debugging.
    #[arg(long)]
    pub debug_markers: Option<String>,

    /// Maximum number of skills to generate.
    #[arg(long, default_value_t = 10)]
    pub max_skills: usize,

    /// Include the leading lines of referenced files in the source-task document.
    #[arg(long)]
    pub include_snippets: bool,

    /// Maximum number of file snippets per skill.
    #[arg(long, default_value_t = 3)]
    pub max_snippets: usize,

    /// Lines read from each snippet file.
    #[arg(long, default_value_t = 80)]
    pub snippet_lines: usize,

    /// Task body lines quoted in the source-task document.
    #[arg(long, default_value_t = 120)]
    pub excerpt_lines: usize,

    /// Write skill bundles. Without this flag only candidates are listed.
    #[arg(long)]
    pub write: bool,

    /// Enable debug logging (overridden by `RUST_LOG`).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Candidate selection settings.
    #[must_use]
    pub fn harvest_config(&self) -> HarvestConfig {
        let markers = self
            .debug_markers
            .as_deref()
            .map_or_else(default_markers, parse_markers);
        let snippets = self.include_snippets.then_some(SnippetOptions {
            max_files: self.max_snippets,
            max_lines: self.snippet_lines,
        });
        HarvestConfig {
            min_minutes: self.min_minutes,
            markers,
            max_candidates: self.max_skills,
            snippets,
        }
    }

    /// Rendering settings.
    #[must_use]
    pub const fn render_options(&self) -> RenderOptions {
        RenderOptions {
            excerpt_lines: self.excerpt_lines,
        }
    }

    fn output_dir(&self, project_dir: &Path) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(project_dir))
    }
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No task qualified.
    NoCandidates,
    /// Candidates were listed without writing anything.
    DryRun {
        /// Number of candidates listed.
        candidates: usize,
    },
    /// Bundles were written to these directories.
    Written(Vec<PathBuf>),
}

/// Run a harvest, printing the report to `out`.
///
/// # Errors
///
/// Fails if the memory file cannot be found or read, or if the output
/// directory cannot be written. A candidate whose skill fails to render or
/// validate is logged and skipped.
pub fn run(args: &Args, out: &mut impl Write) -> Result<Outcome> {
    let project_dir = std::path::absolute(&args.project_dir).with_context(|| {
        format!(
            "Unable to resolve project directory {}",
            args.project_dir.display()
        )
    })?;
    let memory_file = locate_memory_file(&project_dir, args.memory_file.as_deref())?;
    info!(path = %memory_file.display(), "Using memory file");

    let lines = read_lines(&memory_file)?;
    let config = args.harvest_config();
    let candidates = MemoryDocument::parse(&lines).candidates(&project_dir, &config);

    if candidates.is_empty() {
        writeln!(out, "No candidates found.")?;
        return Ok(Outcome::NoCandidates);
    }

    writeln!(out, "Candidates:")?;
    for candidate in &candidates {
        writeln!(out, "- {}", candidate.summary())?;
    }

    if !args.write {
        writeln!(out, "\nDry run complete. Use --write to generate skills.")?;
        return Ok(Outcome::DryRun {
            candidates: candidates.len(),
        });
    }

    let writer = SkillWriter::new(args.output_dir(&project_dir));
    let mut written = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        let skill = match RenderedSkill::render(candidate, args.render_options()) {
            Ok(skill) => skill,
            Err(err) => {
                warn!(task_id = %candidate.task_id, error = %err, "Skipping candidate");
                continue;
            }
        };
        let dir = match writer.write(&skill) {
            Ok(dir) => dir,
            Err(err) if !err.is_io() => {
                warn!(task_id = %candidate.task_id, error = %err, "Skipping candidate");
                continue;
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!(
                        "Unable to write skill '{}' under {}",
                        skill.name,
                        writer.root().display()
                    )
                });
            }
        };
        writeln!(out, "Generated: {}", dir.display())?;
        written.push(dir);
    }

    Ok(Outcome::Written(written))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["skill-harvester"]);
        let config = args.harvest_config();
        assert_eq!(config, HarvestConfig::default());
        assert_eq!(args.render_options(), RenderOptions::default());
        assert!(!args.write);
    }

    #[test]
    fn test_custom_markers_and_snippets() {
        let args = Args::parse_from([
            "skill-harvester",
            "--debug-markers",
            "Panic, regression,",
            "--include-snippets",
            "--max-snippets",
            "5",
            "--snippet-lines",
            "10",
        ]);
        let config = args.harvest_config();
        assert_eq!(config.markers, vec!["panic", "regression"]);
        assert_eq!(
            config.snippets,
            Some(SnippetOptions {
                max_files: 5,
                max_lines: 10,
            })
        );
    }

    #[test]
    fn test_default_output_dir_under_project() {
        let args = Args::parse_from(["skill-harvester"]);
        let dir = args.output_dir(Path::new("/project"));
        assert_eq!(
            dir,
            Path::new("/project/agents_library/agent-orchestrator-universal/skills/generated")
        );
    }
}
