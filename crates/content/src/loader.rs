use crate::frontmatter::{Frontmatter, parse_date, split_frontmatter};
use crate::slug::{slug_from_override, slug_from_path};
use garden_core::{Error, Post, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Parse a single Markdown document into a post.
///
/// `relative` is the file path relative to the collection directory and
/// drives the slug unless the frontmatter sets one. `source` is only used
/// for error messages and is stored on the post.
pub fn parse_post(collection: &str, relative: &Path, source: &Path, content: &str) -> Result<Post> {
    let frontmatter_err = |message: String| Error::Frontmatter {
        path: source.to_path_buf(),
        message,
    };

    let (fence, raw, body) = split_frontmatter(content)
        .map_err(frontmatter_err)?
        .ok_or_else(|| frontmatter_err("missing frontmatter".to_string()))?;

    let meta = Frontmatter::parse(fence, raw).map_err(frontmatter_err)?;

    let title = meta
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| frontmatter_err("missing required field 'title'".to_string()))?;

    let raw_date = meta
        .date
        .ok_or_else(|| frontmatter_err("missing required field 'date'".to_string()))?;
    let date = parse_date(&raw_date).ok_or_else(|| Error::InvalidDate {
        path: source.to_path_buf(),
        value: raw_date.clone(),
    })?;

    let slug = match meta.slug.as_deref().map(slug_from_override) {
        Some(slug) if !slug.is_empty() => slug,
        _ => slug_from_path(relative),
    };
    if slug.is_empty() {
        return Err(frontmatter_err(
            "cannot derive a slug from the file name".to_string(),
        ));
    }

    Ok(Post {
        collection: collection.to_string(),
        slug,
        title,
        date,
        draft: meta.draft,
        description: meta.description,
        tags: meta.tags,
        body: body.to_string(),
        source: Some(source.to_path_buf()),
    })
}

fn is_ignored(name: &std::ffi::OsStr) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || name.starts_with('_')
}

/// Markdown files under `dir`, sorted by path
fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    // Hidden and `_` prefixed directories (.obsidian, .trash, _drafts) are skipped whole
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored(entry.file_name()));

    for entry in walker {
        let entry = entry.map_err(|e| {
            Error::IoError(
                e.into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
            )
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(ext) = entry.path().extension()
            && MARKDOWN_EXTENSIONS.contains(&ext.to_string_lossy().to_lowercase().as_str())
        {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Load every file in a collection directory, keeping per-file results.
///
/// Used by validation, which wants to report all bad files at once. A
/// missing directory yields no entries.
pub fn load_entries(collection: &str, dir: &Path) -> Result<Vec<(PathBuf, Result<Post>)>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = markdown_files(dir)?
        .into_iter()
        .map(|path| {
            let result = fs::read_to_string(&path)
                .map_err(Error::from)
                .and_then(|content| {
                    let relative = path.strip_prefix(dir).unwrap_or(&path);
                    parse_post(collection, relative, &path, &content)
                });
            (path, result)
        })
        .collect();

    Ok(entries)
}

/// Load a whole collection. The first bad file fails the load.
pub fn load_collection(collection: &str, dir: &Path) -> Result<Vec<Post>> {
    if !dir.exists() {
        tracing::warn!(collection, dir = %dir.display(), "collection directory not found");
        return Ok(Vec::new());
    }

    let posts = load_entries(collection, dir)?
        .into_iter()
        .map(|(_, result)| result)
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(collection, count = posts.len(), "loaded collection");
    Ok(posts)
}
