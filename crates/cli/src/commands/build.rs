use crate::site::{Site, load_collections};
use anyhow::{Context, Result};
use garden_generator::{build_feed, published, render_index, render_post, render_rss};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Static files copied verbatim into the output root
const PUBLIC_DIR: &str = "public";

/// Build static site
pub async fn run(path: PathBuf, output: PathBuf) -> Result<()> {
    println!("🔨 Building static site...");
    println!("   Source: {}", path.display());
    println!("   Output: {}", output.display());
    println!();

    let site = Site::load(&path)?;
    println!("✓ Loaded: {}", site.garden.site.title);

    let stats = build_site(&site, &output).await?;

    println!("   ✓ Generated {} page(s)", stats.pages);
    println!("   ✓ Feed: {} ({} entries)", site.garden.feed.path, stats.feed_entries);
    println!("   ✓ Copied {} public file(s)", stats.public_files);
    println!();
    println!("✅ Build complete!");
    println!("   Output: {}", output.display());
    println!();

    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct BuildStats {
    pages: usize,
    feed_entries: usize,
    public_files: usize,
}

async fn build_site(site: &Site, output: &Path) -> Result<BuildStats> {
    let garden = &site.garden;
    let feed_route = garden.feed.route();
    let mut stats = BuildStats::default();

    let collections = load_collections(&site.source, garden)
        .await
        .context("Failed to load content collections")?;
    for (name, posts) in &collections {
        tracing::info!(collection = %name, posts = posts.len(), "loaded collection");
    }

    fs::create_dir_all(output).context("Failed to create output directory")?;

    // Feed
    let feed_posts = collections
        .iter()
        .find(|(name, _)| *name == garden.feed.collection)
        .map(|(_, posts)| posts.as_slice())
        .unwrap_or_default();
    let document = build_feed(feed_posts, &garden.site);
    let xml = render_rss(&document).context("Failed to render RSS feed")?;
    write_file(&output.join(&garden.feed.path), xml.as_bytes())?;
    stats.feed_entries = document.entries.len();

    // Index
    let index = render_index(&garden.site, &feed_route, &collections, false);
    write_file(&output.join("index.html"), index.as_bytes())?;
    stats.pages += 1;

    // One page per published post
    for (_, posts) in &collections {
        for post in published(posts) {
            let html = render_post(&garden.site, &feed_route, post, false);
            let page_path = output
                .join(&post.collection)
                .join(&post.slug)
                .join("index.html");
            write_file(&page_path, html.as_bytes())?;
            stats.pages += 1;
        }
    }

    stats.public_files = copy_public(&site.root.join(PUBLIC_DIR), output)?;

    Ok(stats)
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote file");
    Ok(())
}

fn copy_public(public: &Path, output: &Path) -> Result<usize> {
    if !public.is_dir() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(public) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(public)?;
        let dst = output.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &dst)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
            copied += 1;
        }
    }

    Ok(copied)
}
