use anyhow::{Context, Result};
use garden_content::{ContentSource, FsContentSource};
use garden_core::{Garden, Post, parse_garden_toml};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "garden.toml";

/// A site directory with its parsed configuration
pub struct Site {
    pub root: PathBuf,
    pub garden: Garden,
    pub source: FsContentSource,
}

impl Site {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Site directory does not exist: {}\nRun 'garden init {}' first",
                path.display(),
                path.display()
            );
        }

        let config_path = path.join(CONFIG_FILE);
        if !config_path.exists() {
            anyhow::bail!(
                "{} not found in {}\nRun 'garden init {}' first",
                CONFIG_FILE,
                path.display(),
                path.display()
            );
        }

        let garden = parse_garden_toml(&config_path)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        let source = FsContentSource::for_site(path, &garden);

        tracing::debug!(root = %path.display(), content = %source.root().display(), "loaded site");

        Ok(Self {
            root: path.to_path_buf(),
            garden,
            source,
        })
    }
}

/// Fetch every configured collection, in configuration order
pub async fn load_collections<S: ContentSource + ?Sized>(
    source: &S,
    garden: &Garden,
) -> garden_core::Result<Vec<(String, Vec<Post>)>> {
    let mut collections = Vec::new();
    for name in garden.collection_names() {
        let posts = source.get_collection(name).await?;
        collections.push((name.to_string(), posts));
    }
    Ok(collections)
}
