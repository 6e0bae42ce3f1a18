use crate::site::Site;
use anyhow::{Context, Result};
use clap::ValueEnum;
use garden_content::ContentSource;
use garden_generator::{build_feed, render_rss};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeedFormat {
    /// RSS 2.0 XML
    Rss,
    /// The feed document as JSON
    Json,
}

/// Print the feed for the configured collection
pub async fn run(path: PathBuf, format: FeedFormat) -> Result<()> {
    let site = Site::load(&path)?;
    let output = render(&site, format).await?;
    println!("{}", output);
    Ok(())
}

async fn render(site: &Site, format: FeedFormat) -> Result<String> {
    let posts = site
        .source
        .get_collection(&site.garden.feed.collection)
        .await
        .with_context(|| format!("Failed to load collection '{}'", site.garden.feed.collection))?;

    let document = build_feed(&posts, &site.garden.site);
    tracing::info!(
        collection = %site.garden.feed.collection,
        entries = document.entries.len(),
        "built feed"
    );

    match format {
        FeedFormat::Rss => render_rss(&document).context("Failed to render RSS"),
        FeedFormat::Json => {
            serde_json::to_string_pretty(&document).context("Failed to serialize feed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site_with_posts(posts: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("garden.toml"),
            "[site]\ntitle = \"Blog\"\ndescription = \"Garden\"\nurl = \"https://example.com\"\n",
        )
        .unwrap();
        let posts_dir = dir.path().join("content/posts");
        fs::create_dir_all(&posts_dir).unwrap();
        for (name, content) in posts {
            fs::write(posts_dir.join(name), content).unwrap();
        }
        dir
    }

    #[tokio::test]
    async fn test_json_output() {
        let dir = site_with_posts(&[
            ("a.md", "---\ntitle: A\ndate: 2024-01-01\n---\n"),
            ("b.md", "---\ntitle: B\ndate: 2024-02-01\ndraft: true\n---\n"),
            ("c.md", "---\ntitle: C\ndate: 2023-12-01\n---\n"),
        ]);
        let site = Site::load(dir.path()).unwrap();

        let json = render(&site, FeedFormat::Json).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["site"]["title"], "Blog");
        let entries = value["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["link"], "/posts/a");
        assert_eq!(entries[1]["link"], "/posts/c");
        assert!(entries[0]["publicationDate"].is_string());
    }

    #[tokio::test]
    async fn test_rss_output() {
        let dir = site_with_posts(&[("a.md", "---\ntitle: A\ndate: 2024-01-01\n---\n")]);
        let site = Site::load(dir.path()).unwrap();

        let xml = render(&site, FeedFormat::Rss).await.unwrap();
        assert!(xml.contains("<rss"));
        assert!(xml.contains("https://example.com/posts/a"));
    }

    #[tokio::test]
    async fn test_bad_date_fails_whole_feed() {
        let dir = site_with_posts(&[
            ("a.md", "---\ntitle: A\ndate: 2024-01-01\n---\n"),
            ("b.md", "---\ntitle: B\ndate: whenever\n---\n"),
        ]);
        let site = Site::load(dir.path()).unwrap();

        let err = render(&site, FeedFormat::Rss).await.unwrap_err();
        assert!(format!("{:#}", err).contains("whenever"));
    }
}
