//! Error types for rendering and writing skills.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when rendering or writing a skill bundle.
#[derive(Debug, Error)]
pub enum SkillError {
    /// Failed to write a skill file.
    #[error("failed to write skill file at {path}: {source}")]
    WriteFile {
        /// Path to the file that couldn't be written.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a skill directory.
    #[error("failed to create skill directory at {path}: {source}")]
    CreateDir {
        /// Path to the directory that couldn't be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse skill frontmatter.
    #[error("failed to parse skill frontmatter: {0}")]
    ParseFrontmatter(#[source] serde_yaml::Error),

    /// Failed to serialize skill frontmatter.
    #[error("failed to render skill frontmatter: {0}")]
    RenderFrontmatter(#[source] serde_yaml::Error),

    /// Skill file is missing required frontmatter.
    #[error("skill file missing frontmatter delimiter '---'")]
    MissingFrontmatter,

    /// A skill name that is not a single relative path component.
    #[error("invalid skill name '{name}'")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
}

impl SkillError {
    /// Whether the error came from the filesystem rather than the skill itself.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::WriteFile { .. } | Self::CreateDir { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_io() {
        let io = SkillError::CreateDir {
            path: PathBuf::from("/out"),
            source: std::io::Error::other("denied"),
        };
        assert!(io.is_io());
        assert!(!SkillError::MissingFrontmatter.is_io());
        assert!(
            !SkillError::InvalidName {
                name: "..".to_string()
            }
            .is_io()
        );
    }
}
