//! Skill name generation from task titles.

const STOPWORDS: &[&str] = &[
    "a",
    "an",
    "and",
    "the",
    "for",
    "to",
    "of",
    "in",
    "on",
    "with",
    "by",
    "create",
    "build",
    "implement",
    "add",
    "update",
    "fix",
    "generate",
];

const MAX_SLUG_LEN: usize = 50;

/// Turns a title into a filesystem-safe, hyphenated identifier.
///
/// Punctuation becomes whitespace, stopwords and tokens shorter than three
/// characters or containing digits are dropped. The result is capped at 50
/// characters and may be empty; see [`task_id_slug`] for the fallback.
#[must_use]
pub fn slugify(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() || c == '-' {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();

    let slug = cleaned
        .split_whitespace()
        .filter(|token| token.len() > 2 && !STOPWORDS.contains(token))
        .filter(|token| !token.chars().any(|c| c.is_ascii_digit()))
        .collect::<Vec<_>>()
        .join("-");

    let truncated: String = slug.chars().take(MAX_SLUG_LEN).collect();
    truncated.trim_matches('-').to_string()
}

/// Fallback skill name derived from a task identifier.
///
/// Lowercases ASCII letters and turns every run of other characters
/// (`_`, `/`, `.`, non-ASCII) into a single `-`, so the name is always a
/// single path component. An identifier with no ASCII letters or digits
/// yields `task`.
#[must_use]
pub fn task_id_slug(task_id: &str) -> String {
    let mut slug = String::with_capacity(task_id.len());
    for c in task_id.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug: String = slug.trim_matches('-').chars().take(MAX_SLUG_LEN).collect();
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "task".to_string()
    } else {
        slug.to_string()
    }
}

/// The slug for `title`, falling back to the task identifier when empty.
#[must_use]
pub fn skill_name(title: &str, task_id: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        task_id_slug(task_id)
    } else {
        slug
    }
}
