use std::path::Path;

/// URL-safe slug for a single path segment
///
/// Lowercases, turns whitespace into `-`, and drops everything that is not
/// alphanumeric, `-` or `_`.
pub fn slugify(segment: &str) -> String {
    segment
        .trim()
        .to_lowercase()
        .replace(char::is_whitespace, "-")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// Slug for a file relative to its collection directory.
///
/// The extension is dropped and nested directories are kept as `/`
/// separated segments, so `2024/Week 01.md` becomes `2024/week-01`.
pub fn slug_from_path(relative: &Path) -> String {
    let without_ext = relative.with_extension("");
    without_ext
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(part) => Some(slugify(&part.to_string_lossy())),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Slug from a frontmatter `slug:` value.
///
/// Each `/` separated segment goes through [`slugify`]; empty, `.` and `..`
/// segments are dropped so the result always stays inside its collection.
pub fn slug_from_override(value: &str) -> String {
    value
        .split(['/', '\\'])
        .filter(|segment| !matches!(segment.trim(), "" | "." | ".."))
        .map(slugify)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
