use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

/// Frontmatter fence style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fence {
    /// `---` fenced, `key: value` lines
    Yaml,
    /// `+++` fenced TOML table
    Toml,
}

impl Fence {
    fn marker(self) -> &'static str {
        match self {
            Fence::Yaml => "---",
            Fence::Toml => "+++",
        }
    }
}

/// Post fields as written in the file, before typing
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub draft: bool,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlFrontmatter {
    title: Option<String>,
    date: Option<toml::Value>,
    #[serde(default)]
    draft: bool,
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    slug: Option<String>,
}

/// Split a document into (fence, frontmatter, body).
///
/// Returns `Ok(None)` when the document has no frontmatter and an error
/// when the opening fence is never closed.
pub fn split_frontmatter(content: &str) -> Result<Option<(Fence, &str, &str)>, String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let Some(first_line_end) = content.find('\n') else {
        return Ok(None);
    };
    let fence = match content[..first_line_end].trim_end() {
        "---" => Fence::Yaml,
        "+++" => Fence::Toml,
        _ => return Ok(None),
    };

    let rest = &content[first_line_end + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == fence.marker() {
            let frontmatter = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok(Some((fence, frontmatter, body)));
        }
        offset += line.len();
    }

    Err(format!(
        "frontmatter opened with '{}' is never closed",
        fence.marker()
    ))
}

impl Frontmatter {
    pub fn parse(fence: Fence, raw: &str) -> Result<Self, String> {
        match fence {
            Fence::Yaml => Ok(Self::parse_yaml_like(raw)),
            Fence::Toml => Self::parse_toml(raw),
        }
    }

    fn parse_toml(raw: &str) -> Result<Self, String> {
        let parsed: TomlFrontmatter = toml::from_str(raw).map_err(|e| e.to_string())?;

        let date = match parsed.date {
            Some(toml::Value::String(s)) => Some(s),
            Some(toml::Value::Datetime(dt)) => Some(dt.to_string()),
            Some(other) => return Err(format!("'date' must be a string or datetime, got {}", other)),
            None => None,
        };

        Ok(Self {
            title: parsed.title,
            date,
            draft: parsed.draft,
            description: parsed.description,
            tags: parsed.tags,
            slug: parsed.slug,
        })
    }

    /// `key: value` lines, with inline `[a, b]` or block `- item` lists for tags.
    /// Unknown keys are ignored.
    fn parse_yaml_like(raw: &str) -> Self {
        let mut meta = Self::default();
        let mut in_tags = false;

        for line in raw.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if in_tags {
                if let Some(item) = trimmed.strip_prefix("- ") {
                    meta.tags.push(unquote(item).to_string());
                    continue;
                }
                in_tags = false;
            }

            let Some((key, value)) = trimmed.split_once(':') else {
                continue;
            };
            let value = value.trim();

            match key.trim().to_lowercase().as_str() {
                "title" => meta.title = Some(unquote(value).to_string()),
                "date" | "pubdate" => meta.date = Some(unquote(value).to_string()),
                "draft" => meta.draft = parse_bool(unquote(value)),
                "description" => meta.description = Some(unquote(value).to_string()),
                "slug" => meta.slug = Some(unquote(value).to_string()),
                "tags" => {
                    if value.is_empty() {
                        in_tags = true;
                    } else {
                        meta.tags = parse_inline_list(value);
                    }
                }
                _ => {}
            }
        }

        meta
    }
}

fn unquote(value: &str) -> &str {
    let value = value.trim();
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "yes" | "on")
}

fn parse_inline_list(value: &str) -> Vec<String> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);

    inner
        .split(',')
        .map(unquote)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a frontmatter date into UTC.
///
/// Accepts "YYYY-MM-DD" (midnight UTC), RFC 3339, and
/// "YYYY-MM-DD HH:MM[:SS]" / "YYYY-MM-DDTHH:MM:SS" (read as UTC).
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_split_yaml_frontmatter() {
        let doc = "---\ntitle: Hello\n---\n# Body\n";
        let (fence, fm, body) = split_frontmatter(doc).unwrap().unwrap();
        assert_eq!(fence, Fence::Yaml);
        assert_eq!(fm, "title: Hello\n");
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn test_split_toml_frontmatter_crlf() {
        let doc = "+++\r\ntitle = \"Hello\"\r\n+++\r\nBody";
        let (fence, fm, body) = split_frontmatter(doc).unwrap().unwrap();
        assert_eq!(fence, Fence::Toml);
        assert_eq!(fm, "title = \"Hello\"\r\n");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_without_frontmatter() {
        assert!(split_frontmatter("# Just markdown\n").unwrap().is_none());
        assert!(split_frontmatter("").unwrap().is_none());
    }

    #[test]
    fn test_split_unterminated_frontmatter() {
        let err = split_frontmatter("---\ntitle: Hello\n# Body\n").unwrap_err();
        assert!(err.contains("never closed"));
    }

    #[test]
    fn test_parse_yaml_like_fields() {
        let raw = r#"title: "Notes on: colons"
date: 2024-01-01
draft: true
description: 'A short one'
tags: [rust, "web", astro]
layout: ignored
"#;
        let fm = Frontmatter::parse(Fence::Yaml, raw).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Notes on: colons"));
        assert_eq!(fm.date.as_deref(), Some("2024-01-01"));
        assert!(fm.draft);
        assert_eq!(fm.description.as_deref(), Some("A short one"));
        assert_eq!(fm.tags, vec!["rust", "web", "astro"]);
    }

    #[test]
    fn test_parse_yaml_like_block_tags() {
        let raw = "title: T\ntags:\n  - one\n  - \"two\"\ndraft: false\n";
        let fm = Frontmatter::parse(Fence::Yaml, raw).unwrap();
        assert_eq!(fm.tags, vec!["one", "two"]);
        assert!(!fm.draft);
    }

    #[test]
    fn test_parse_toml_datetime_and_string_dates() {
        let fm = Frontmatter::parse(Fence::Toml, "title = \"T\"\ndate = 2024-02-01\n").unwrap();
        assert_eq!(fm.date.as_deref(), Some("2024-02-01"));

        let fm = Frontmatter::parse(Fence::Toml, "title = \"T\"\ndate = \"2024-02-01\"\n").unwrap();
        assert_eq!(fm.date.as_deref(), Some("2024-02-01"));

        assert!(Frontmatter::parse(Fence::Toml, "title = \"T\"\ndate = 5\n").is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_date("2024-01-01"), Some(midnight));
        assert_eq!(parse_date("2024-01-01T00:00:00Z"), Some(midnight));
        assert_eq!(parse_date("2024-01-01T02:00:00+02:00"), Some(midnight));
        assert_eq!(
            parse_date("2024-01-01 13:30"),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 13, 30, 0).unwrap())
        );
        assert_eq!(
            parse_date("2024-01-01T13:30:15"),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 13, 30, 15).unwrap())
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("01/02/2024"), None);
        assert_eq!(parse_date(""), None);
    }
}
