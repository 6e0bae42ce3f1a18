use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete site configuration, loaded from garden.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Garden {
    pub site: SiteMetadata,
    pub content: ContentConfig,
    pub feed: FeedConfig,
}

impl Garden {
    /// Collections the site knows about, feed collection included
    pub fn collection_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.content.collections.iter().map(String::as_str).collect();
        if !names.contains(&self.feed.collection.as_str()) {
            names.push(&self.feed.collection);
        }
        names
    }
}

/// Site metadata shared by the feed channel and rendered pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteMetadata {
    pub title: String,
    pub description: String,
    /// Absolute base URL, e.g. "https://example.com"
    pub site: String,
}

/// Where content collections live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    pub dir: PathBuf,
    pub collections: Vec<String>,
}

/// RSS feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub collection: String,
    /// Output path relative to the site root, e.g. "rss.xml"
    pub path: String,
}

impl FeedConfig {
    /// Route the feed is served on
    pub fn route(&self) -> String {
        format!("/{}", self.path.trim_start_matches('/'))
    }
}

/// A single content item from a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub collection: String,
    pub slug: String,
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub draft: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl Post {
    /// Site-relative link, "/{collection}/{slug}"
    pub fn link(&self) -> String {
        format!("/{}/{}", self.collection, self.slug)
    }
}

/// Reduced representation of a post for syndication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    pub title: String,
    pub publication_date: DateTime<Utc>,
    pub link: String,
}

/// Site metadata plus ordered entries, ready for serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDocument {
    pub site: SiteMetadata,
    pub entries: Vec<FeedEntry>,
}
