use crate::loader::load_collection;
use async_trait::async_trait;
use garden_core::{Error, Garden, Post, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Anything that can hand out a named collection of posts.
///
/// Callers fetch once per request; implementations must not cache stale
/// data across calls.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn get_collection(&self, name: &str) -> Result<Vec<Post>>;
}

/// Reads collections from `<root>/<name>/` on every call
#[derive(Debug, Clone)]
pub struct FsContentSource {
    root: PathBuf,
    collections: Vec<String>,
}

impl FsContentSource {
    pub fn new(root: impl Into<PathBuf>, collections: Vec<String>) -> Self {
        Self {
            root: root.into(),
            collections,
        }
    }

    /// Source for a site directory, using its garden.toml content settings
    pub fn for_site(site_dir: &Path, garden: &Garden) -> Self {
        Self::new(
            site_dir.join(&garden.content.dir),
            garden
                .collection_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collections(&self) -> &[String] {
        &self.collections
    }

    pub fn collection_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[async_trait]
impl ContentSource for FsContentSource {
    async fn get_collection(&self, name: &str) -> Result<Vec<Post>> {
        if !self.collections.iter().any(|c| c == name) {
            return Err(Error::UnknownCollection(name.to_string()));
        }

        let collection = name.to_string();
        let dir = self.collection_dir(name);
        tokio::task::spawn_blocking(move || load_collection(&collection, &dir))
            .await
            .map_err(|e| Error::IoError(std::io::Error::other(e)))?
    }
}

/// Collections held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    collections: BTreeMap<String, Vec<Post>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(mut self, name: impl Into<String>, posts: Vec<Post>) -> Self {
        self.collections.insert(name.into(), posts);
        self
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn get_collection(&self, name: &str) -> Result<Vec<Post>> {
        self.collections
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownCollection(name.to_string()))
    }
}
