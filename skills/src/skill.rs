//! SKILL.md frontmatter emission and parsing.

use serde::{Deserialize, Serialize};

use crate::SkillError;

/// A skill definition read back from SKILL.md content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    /// Unique name of the skill.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// The markdown instructions (everything after frontmatter).
    pub instructions: String,
}

/// YAML frontmatter at the top of SKILL.md files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillFrontmatter {
    /// Unique name of the skill.
    pub name: String,
    /// Human-readable description.
    pub description: String,
}

impl SkillFrontmatter {
    /// Render the frontmatter block, including both `---` delimiters.
    ///
    /// Values are emitted through `serde_yaml`, so descriptions containing
    /// `: ` or quotes stay valid YAML.
    ///
    /// # Errors
    ///
    /// Returns `SkillError::RenderFrontmatter` if serialization fails.
    pub fn render(&self) -> Result<String, SkillError> {
        let yaml = serde_yaml::to_string(self).map_err(SkillError::RenderFrontmatter)?;
        Ok(format!("---\n{yaml}---\n"))
    }
}

impl Skill {
    /// Parse a skill from SKILL.md content.
    ///
    /// The file format is:
    /// ```markdown
    /// ---
    /// name: skill-name
    /// description: What this skill does
    /// ---
    ///
    /// # Instructions
    ///
    /// The rest of the file is markdown instructions...
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `SkillError::MissingFrontmatter` if the content doesn't have
    /// valid YAML frontmatter, or `SkillError::ParseFrontmatter` if the YAML
    /// cannot be parsed.
    pub fn parse(content: &str) -> Result<Self, SkillError> {
        let content = content.trim();

        let after_first = content
            .strip_prefix("---")
            .ok_or(SkillError::MissingFrontmatter)?;
        let end_idx = after_first
            .find("\n---")
            .ok_or(SkillError::MissingFrontmatter)?;

        let yaml_content = &after_first[..end_idx];
        let instructions = after_first[end_idx + 4..].trim().to_string();

        let frontmatter: SkillFrontmatter =
            serde_yaml::from_str(yaml_content).map_err(SkillError::ParseFrontmatter)?;

        Ok(Self {
            name: frontmatter.name,
            description: frontmatter.description,
            instructions,
        })
    }
}
