//! Rendering candidates into SKILL.md and source-task documents.

use std::fmt::Write as _;

use harvester_core::{Candidate, skill_name};

use crate::{SkillError, SkillFrontmatter};

/// Limits applied while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Maximum number of section body lines quoted in the source-task document.
    pub excerpt_lines: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { excerpt_lines: 120 }
    }
}

/// The two documents making up a skill bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSkill {
    /// Skill name, used as the bundle directory name.
    pub name: String,
    /// SKILL.md content.
    pub definition: String,
    /// references/source-task.md content.
    pub source_task: String,
}

impl RenderedSkill {
    /// Render both documents for a candidate.
    ///
    /// # Errors
    ///
    /// Returns `SkillError::RenderFrontmatter` if the frontmatter cannot be
    /// serialized.
    pub fn render(candidate: &Candidate, options: RenderOptions) -> Result<Self, SkillError> {
        let name = skill_name(&candidate.title, &candidate.task_id);
        let definition = render_definition(&name, candidate)?;
        let source_task = render_source_task(candidate, options);
        Ok(Self {
            name,
            definition,
            source_task,
        })
    }
}

fn description(candidate: &Candidate) -> String {
    format!(
        "Reusable workflow derived from session task {}. Use when implementing similar tasks to: {}.",
        candidate.task_id, candidate.title
    )
}

fn files_block(files: &[String]) -> String {
    if files.is_empty() {
        return "- (no files extracted)".to_string();
    }
    files
        .iter()
        .map(|f| format!("- {f}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_definition(name: &str, candidate: &Candidate) -> Result<String, SkillError> {
    let frontmatter = SkillFrontmatter {
        name: name.to_string(),
        description: description(candidate),
    }
    .render()?;

    Ok(format!(
        r"{frontmatter}
# {title}

## Context
- Source task: {task_id}
- Agent: {agent}
- Duration: {duration}
- Status: {status}
- Notes: {notes}

## Objectives
- Execute the core workflow for this task type.
- Avoid regressions by keeping edge cases and tests explicit.

## Steps
1) Review related files and constraints.
2) Apply the workflow from the source task.
3) Run tests and verify expected behavior.
4) Update CLAUDE.md with results.

## Files (from session memory)
{files}

## Examples

```text
Task {task_id}: {title}
When done: update CLAUDE.md with completion and notes.
```

## Resources
- references/source-task.md
",
        title = candidate.title,
        task_id = candidate.task_id,
        agent = candidate.agent,
        duration = candidate.duration_label(),
        status = candidate.status,
        notes = candidate.notes,
        files = files_block(&candidate.files),
    ))
}

fn render_source_task(candidate: &Candidate, options: RenderOptions) -> String {
    let excerpt = if candidate.body.is_empty() {
        "(no section found)".to_string()
    } else {
        candidate
            .body
            .iter()
            .take(options.excerpt_lines)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut snippets = String::new();
    if let Some(collected) = &candidate.snippets {
        snippets.push_str("\n## File Snippets\n\n");
        if collected.is_empty() {
            snippets.push_str("(no readable files)\n");
        }
        for snippet in collected {
            let _ = write!(snippets, "### {}\n\n```\n{}\n```\n\n", snippet.path, snippet.text);
        }
    }

    format!(
        r"# Source Task {task_id}

- Title: {title}
- Agent: {agent}
- Duration: {duration}
- Status: {status}
- Notes: {notes}

## Files
{files}
{snippets}
## Source Excerpt

```
{excerpt}
```
",
        task_id = candidate.task_id,
        title = candidate.title,
        agent = candidate.agent,
        duration = candidate.duration_label(),
        status = candidate.status,
        notes = candidate.notes,
        files = files_block(&candidate.files),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Skill;
    use harvester_core::Snippet;

    fn candidate() -> Candidate {
        Candidate {
            task_id: "T1".to_string(),
            agent: "agentA".to_string(),
            duration_minutes: Some(45),
            status: "done".to_string(),
            notes: "hit a bug, had to retry".to_string(),
            title: "Fix Login Flow".to_string(),
            body: Vec::new(),
            files: Vec::new(),
            snippets: None,
        }
    }

    #[test]
    fn test_definition_frontmatter_round_trips() {
        let rendered = RenderedSkill::render(&candidate(), RenderOptions::default()).unwrap();
        assert_eq!(rendered.name, "login-flow");

        let skill = Skill::parse(&rendered.definition).unwrap();
        assert_eq!(skill.name, "login-flow");
        assert_eq!(
            skill.description,
            "Reusable workflow derived from session task T1. Use when implementing similar tasks to: Fix Login Flow."
        );
        assert!(skill.instructions.starts_with("# Fix Login Flow"));
    }

    #[test]
    fn test_definition_context_and_placeholders() {
        let rendered = RenderedSkill::render(&candidate(), RenderOptions::default()).unwrap();
        let doc = &rendered.definition;
        assert!(doc.contains("- Source task: T1\n- Agent: agentA\n- Duration: 45 min"));
        assert!(doc.contains("## Files (from session memory)\n- (no files extracted)"));
        assert!(doc.contains("4) Update CLAUDE.md with results."));
        assert!(doc.contains("Task T1: Fix Login Flow"));
        assert!(doc.ends_with("## Resources\n- references/source-task.md\n"));
    }

    #[test]
    fn test_name_falls_back_to_task_id() {
        let mut c = candidate();
        c.title = "Fix the 123".to_string();
        c.task_id = "TASK_9".to_string();
        let rendered = RenderedSkill::render(&c, RenderOptions::default()).unwrap();
        assert_eq!(rendered.name, "task-9");
    }

    #[test]
    fn test_source_task_excerpt_is_capped() {
        let mut c = candidate();
        c.body = (1..=10).map(|i| format!("body {i}")).collect();
        c.files = vec!["src/login.rs".to_string()];
        c.duration_minutes = None;

        let rendered = RenderedSkill::render(&c, RenderOptions { excerpt_lines: 3 }).unwrap();
        let doc = &rendered.source_task;
        assert!(doc.starts_with("# Source Task T1\n"));
        assert!(doc.contains("- Duration: unknown"));
        assert!(doc.contains("## Files\n- src/login.rs\n"));
        assert!(doc.contains("```\nbody 1\nbody 2\nbody 3\n```"));
        assert!(!doc.contains("body 4"));
        assert!(!doc.contains("## File Snippets"));
    }

    #[test]
    fn test_source_task_without_section() {
        let rendered = RenderedSkill::render(&candidate(), RenderOptions::default()).unwrap();
        assert!(rendered.source_task.contains("```\n(no section found)\n```"));
    }

    #[test]
    fn test_source_task_snippets() {
        let mut c = candidate();
        c.snippets = Some(vec![Snippet {
            path: "src/login.rs".to_string(),
            text: "fn login() {}".to_string(),
        }]);
        let rendered = RenderedSkill::render(&c, RenderOptions::default()).unwrap();
        assert!(
            rendered
                .source_task
                .contains("## File Snippets\n\n### src/login.rs\n\n```\nfn login() {}\n```")
        );

        c.snippets = Some(Vec::new());
        let rendered = RenderedSkill::render(&c, RenderOptions::default()).unwrap();
        assert!(
            rendered
                .source_task
                .contains("## File Snippets\n\n(no readable files)")
        );
    }
}
