// Content validation: every file loads, slugs are unique, the feed has something to publish

use chrono::{DateTime, Utc};
use garden_content::load_entries;
use garden_core::{Garden, Result};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate every configured collection under `site_dir`.
///
/// Returns an `Err` only for I/O failures while walking directories;
/// content problems end up in the report.
pub fn validate_site(site_dir: &Path, garden: &Garden) -> Result<ValidationReport> {
    validate_site_at(site_dir, garden, Utc::now())
}

fn validate_site_at(site_dir: &Path, garden: &Garden, now: DateTime<Utc>) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();
    let content_root = site_dir.join(&garden.content.dir);

    for name in garden.collection_names() {
        let is_feed = name == garden.feed.collection;
        let dir = content_root.join(name);

        if !dir.is_dir() {
            let msg = format!("Collection '{}': directory not found ({})", name, dir.display());
            if is_feed {
                report.errors.push(msg);
            } else {
                report.warnings.push(msg);
            }
            continue;
        }

        let entries = load_entries(name, &dir)?;
        if entries.is_empty() {
            report
                .warnings
                .push(format!("Collection '{}' has no Markdown files", name));
            continue;
        }

        let mut seen: HashMap<String, String> = HashMap::new();
        let mut published = 0;
        let mut drafts = 0;

        for (path, result) in entries {
            let post = match result {
                Ok(post) => post,
                Err(e) => {
                    report.errors.push(e.to_string());
                    continue;
                }
            };

            let shown = path
                .strip_prefix(site_dir)
                .unwrap_or(&path)
                .display()
                .to_string();
            if let Some(first) = seen.insert(post.slug.clone(), shown.clone()) {
                report.errors.push(format!(
                    "Duplicate slug '{}' in collection '{}': {} and {}",
                    post.slug, name, first, shown
                ));
            }

            if post.draft {
                drafts += 1;
            } else {
                published += 1;
                if post.date > now {
                    report.warnings.push(format!(
                        "{} is dated in the future ({})",
                        shown,
                        post.date.format("%Y-%m-%d")
                    ));
                }
            }
        }

        if is_feed && published == 0 {
            report.warnings.push(format!(
                "Feed collection '{}' has no published posts; the feed will be empty",
                name
            ));
        }

        report.info.push(format!(
            "Collection '{}': {} published, {} draft(s)",
            name, published, drafts
        ));
    }

    tracing::debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validation finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use garden_core::parse_garden_toml_str;
    use std::fs;
    use tempfile::TempDir;

    fn garden() -> Garden {
        parse_garden_toml_str(
            "[site]\ntitle = \"t\"\ndescription = \"d\"\nurl = \"https://example.com\"\n",
        )
        .unwrap()
    }

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_clean_site() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "content/posts/a.md", "---\ntitle: A\ndate: 2024-01-01\n---\n");
        write(dir.path(), "content/posts/b.md", "---\ntitle: B\ndate: 2024-02-01\ndraft: true\n---\n");
        write(dir.path(), "content/weekly-notes/w1.md", "---\ntitle: W1\ndate: 2024-01-07\n---\n");

        let report = validate_site_at(dir.path(), &garden(), now()).unwrap();
        assert!(report.is_ok(), "{:?}", report.errors);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert!(report.info.contains(&"Collection 'posts': 1 published, 1 draft(s)".to_string()));
    }

    #[test]
    fn test_reports_every_bad_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "content/posts/bad-date.md", "---\ntitle: A\ndate: soon\n---\n");
        write(dir.path(), "content/posts/no-title.md", "---\ndate: 2024-01-01\n---\n");
        write(dir.path(), "content/posts/ok.md", "---\ntitle: Ok\ndate: 2024-01-01\n---\n");

        let report = validate_site_at(dir.path(), &garden(), now()).unwrap();
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].contains("soon"));
        assert!(report.errors[1].contains("'title'"));
    }

    #[test]
    fn test_duplicate_slugs() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "content/posts/hello.md", "---\ntitle: A\ndate: 2024-01-01\n---\n");
        write(
            dir.path(),
            "content/posts/other.md",
            "---\ntitle: B\ndate: 2024-01-02\nslug: hello\n---\n",
        );

        let report = validate_site_at(dir.path(), &garden(), now()).unwrap();
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("Duplicate slug 'hello'"));
    }

    #[test]
    fn test_missing_feed_collection_is_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "content/weekly-notes/w1.md", "---\ntitle: W1\ndate: 2024-01-07\n---\n");

        let report = validate_site_at(dir.path(), &garden(), now()).unwrap();
        assert!(!report.is_ok());
        assert!(report.errors[0].contains("'posts'"));
    }

    #[test]
    fn test_missing_other_collection_is_warning() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "content/posts/a.md", "---\ntitle: A\ndate: 2024-01-01\n---\n");

        let report = validate_site_at(dir.path(), &garden(), now()).unwrap();
        assert!(report.is_ok());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("'weekly-notes'"));
    }

    #[test]
    fn test_future_posts_and_empty_feed_warn() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "content/posts/later.md", "---\ntitle: Later\ndate: 2030-01-01\n---\n");
        write(dir.path(), "content/weekly-notes/d.md", "---\ntitle: D\ndate: 2024-01-01\ndraft: true\n---\n");

        let report = validate_site_at(dir.path(), &garden(), now()).unwrap();
        assert!(report.is_ok());
        assert!(report.warnings.iter().any(|w| w.contains("dated in the future")));

        let mut g = garden();
        g.feed.collection = "weekly-notes".to_string();
        let report = validate_site_at(dir.path(), &g, now()).unwrap();
        assert!(report.warnings.iter().any(|w| w.contains("no published posts")));
    }
}
