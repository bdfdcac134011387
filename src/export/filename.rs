//! File name derivation
//!
//! Exported files are named after the entity's display name, reduced to a
//! portable slug, plus its id so that two charts called "Sales" cannot
//! collide.

use std::fmt::Display;

/// Reduce a display name to a filesystem-safe ASCII slug.
///
/// Whitespace runs and path separators become a single `_`, every character
/// outside `[A-Za-z0-9_.-]` is dropped, and leading/trailing `.` and `_` are
/// stripped. The result may be empty.
pub fn secure_filename(name: &str) -> String {
    let joined = name
        .split(|c: char| c.is_whitespace() || c == '/' || c == '\\')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    cleaned.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// File stem for an entity: `<slug>-<id>`, `<slug>` when `skip_id` is set,
/// or the bare id when the name has no usable characters.
pub fn get_filename(name: &str, id: impl Display, skip_id: bool) -> String {
    let slug = secure_filename(name.trim());
    if slug.is_empty() {
        id.to_string()
    } else if skip_id {
        slug
    } else {
        format!("{}-{}", slug, id)
    }
}
