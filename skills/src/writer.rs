//! Materializing rendered skills as bundle directories on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{RenderedSkill, Skill, SkillError};

/// File name of the skill definition inside a bundle.
pub const SKILL_FILE: &str = "SKILL.md";
/// Subdirectory holding reference documents.
pub const REFERENCES_DIR: &str = "references";
/// File name of the source-task document inside [`REFERENCES_DIR`].
pub const SOURCE_TASK_FILE: &str = "source-task.md";

/// Writes skill bundles under an output directory.
///
/// Each bundle is laid out as:
/// ```text
/// output/
/// └── skill-name/
///     ├── SKILL.md
///     └── references/
///         └── source-task.md
/// ```
///
/// Existing bundles are never overwritten: a name already taken gets a
/// `-v2`, `-v3`, ... suffix.
#[derive(Debug, Clone)]
pub struct SkillWriter {
    root: PathBuf,
}

impl SkillWriter {
    /// Create a writer targeting `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output directory bundles are written under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a rendered skill and return the bundle directory actually used.
    ///
    /// Documents are written ASCII-only. The definition's frontmatter is
    /// parsed back before anything touches the disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a plain ASCII directory name, if
    /// the frontmatter does not parse, or if a directory or file cannot be
    /// created.
    pub fn write(&self, skill: &RenderedSkill) -> Result<PathBuf, SkillError> {
        if !is_bundle_name(&skill.name) {
            return Err(SkillError::InvalidName {
                name: skill.name.clone(),
            });
        }
        let definition = strip_non_ascii(&skill.definition);
        let source_task = strip_non_ascii(&skill.source_task);
        Skill::parse(&definition)?;

        create_dir(&self.root)?;
        let skill_dir = unique_path(&self.root, &skill.name);
        create_dir(&skill_dir)?;
        write_file(&skill_dir.join(SKILL_FILE), &definition)?;

        let references = skill_dir.join(REFERENCES_DIR);
        create_dir(&references)?;
        write_file(&references.join(SOURCE_TASK_FILE), &source_task)?;

        debug!(name = %skill.name, path = %skill_dir.display(), "Wrote skill bundle");
        Ok(skill_dir)
    }
}

/// First free path among `base/name`, `base/name-v2`, `base/name-v3`, ...
///
/// Not safe against concurrent writers picking the same name.
#[must_use]
pub fn unique_path(base: &Path, name: &str) -> PathBuf {
    let candidate = base.join(name);
    if !candidate.exists() {
        return candidate;
    }
    (2..)
        .map(|idx| base.join(format!("{name}-v{idx}")))
        .find(|alt| !alt.exists())
        .unwrap_or(candidate)
}

fn is_bundle_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn strip_non_ascii(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

fn create_dir(path: &Path) -> Result<(), SkillError> {
    fs::create_dir_all(path).map_err(|source| SkillError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), SkillError> {
    fs::write(path, content).map_err(|source| SkillError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}
