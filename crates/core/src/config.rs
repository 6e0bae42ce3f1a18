use crate::error::{Error, Result};
use crate::types::*;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONTENT_DIR: &str = "content";
pub const DEFAULT_COLLECTIONS: &[&str] = &["posts", "weekly-notes"];
pub const DEFAULT_FEED_COLLECTION: &str = "posts";
pub const DEFAULT_FEED_PATH: &str = "rss.xml";

/// Raw TOML configuration structure
/// This matches the garden.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    site: RawSite,
    #[serde(default)]
    content: RawContent,
    #[serde(default)]
    feed: RawFeed,
}

#[derive(Debug, Deserialize)]
struct RawSite {
    title: String,
    description: String,
    url: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawContent {
    dir: Option<String>,
    collections: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFeed {
    collection: Option<String>,
    path: Option<String>,
}

/// Parse garden.toml from a file path
pub fn parse_garden_toml<P: AsRef<Path>>(path: P) -> Result<Garden> {
    let content = fs::read_to_string(path)?;
    parse_garden_toml_str(&content)
}

/// Parse garden.toml from a string (useful for testing)
pub fn parse_garden_toml_str(content: &str) -> Result<Garden> {
    let raw: RawConfig = toml::from_str(content)?;

    let site = SiteMetadata {
        title: raw.site.title,
        description: raw.site.description,
        site: validate_site_url(&raw.site.url)?,
    };

    let dir = match raw.content.dir {
        Some(dir) => validate_path(&dir, "content.dir")?,
        None => PathBuf::from(DEFAULT_CONTENT_DIR),
    };

    let collections = match raw.content.collections {
        Some(names) => names,
        None => DEFAULT_COLLECTIONS.iter().map(|s| s.to_string()).collect(),
    };
    for (i, name) in collections.iter().enumerate() {
        validate_collection_name(name, "content.collections")?;
        if collections[..i].contains(name) {
            return Err(Error::ConfigParse(format!(
                "Collection '{}' listed more than once in 'content.collections'",
                name
            )));
        }
    }

    let feed_collection = raw
        .feed
        .collection
        .unwrap_or_else(|| DEFAULT_FEED_COLLECTION.to_string());
    validate_collection_name(&feed_collection, "feed.collection")?;

    let feed_path = raw
        .feed
        .path
        .unwrap_or_else(|| DEFAULT_FEED_PATH.to_string());
    validate_path(feed_path.trim_start_matches('/'), "feed.path")?;

    Ok(Garden {
        site,
        content: ContentConfig { dir, collections },
        feed: FeedConfig {
            collection: feed_collection,
            path: feed_path.trim_start_matches('/').to_string(),
        },
    })
}

/// The site URL must be absolute http(s); item links are resolved against it.
fn validate_site_url(raw: &str) -> Result<String> {
    let url = url::Url::parse(raw.trim())
        .map_err(|e| Error::ConfigParse(format!("Invalid site.url '{}': {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::ConfigParse(format!(
            "site.url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    Ok(url.to_string())
}

/// Collection names become URL segments and directory names.
fn validate_collection_name(name: &str, field_name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty collection name in '{}'",
            field_name
        )));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::ConfigParse(format!(
            "Collection name '{}' in '{}' may only contain letters, digits, '-' and '_'",
            name, field_name
        )));
    }

    Ok(())
}

/// Validate and convert a path string to PathBuf.
///
/// Rejects absolute paths and parent directory references (`..`) so a
/// garden.toml can't point the build outside the site directory.
///
/// ```text
/// validate_path("content", "content.dir")       → Ok(PathBuf)
/// validate_path("/etc", "content.dir")          → Err("Absolute paths not allowed...")
/// validate_path("../outside", "content.dir")    → Err("Parent directory references...")
/// ```
fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    let path = Path::new(path_str);

    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(Error::ConfigParse(format!(
                "Parent directory references (..) not allowed in '{}': '{}'",
                field_name, path_str
            )));
        }
    }

    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    Ok(path.to_path_buf())
}
