use crate::site::CONFIG_FILE;
use anyhow::{Context, Result};
use chrono::Utc;
use garden_core::config::{DEFAULT_COLLECTIONS, DEFAULT_CONTENT_DIR, DEFAULT_FEED_PATH};
use garden_core::parse_garden_toml_str;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_TITLE: &str = "My Digital Garden";
const DEFAULT_URL: &str = "https://example.com";

/// Escape a string for safe inclusion in a TOML basic string
///
/// Handles the required escape sequences per TOML v1.0.0:
/// backslash, quote, backspace, form feed, newline, carriage return, tab.
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Initialize a new site directory.
///
/// Creates garden.toml, one directory per default collection, a sample
/// post and an empty `public/` directory. Refuses to touch a directory that
/// already has a garden.toml.
pub async fn run(path: PathBuf, title: Option<String>, url: Option<String>) -> Result<()> {
    println!("Initializing site directory: {}", path.display());

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!(
            "{} already exists at {}\nHint: Delete it first or use a different directory",
            CONFIG_FILE,
            config_path.display()
        );
    }

    fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let title = title.as_deref().unwrap_or(DEFAULT_TITLE);
    let url = url.as_deref().unwrap_or(DEFAULT_URL);

    generate_garden_toml(&path, title, url)?;
    create_directory_structure(&path)?;
    generate_sample_post(&path)?;

    println!("\n✓ Initialization complete!");
    println!("\nGenerated structure:");
    println!("  {}/", path.display());
    println!("  ├── {}          ← Site title, URL and feed settings", CONFIG_FILE);
    println!("  ├── {}/", DEFAULT_CONTENT_DIR);
    println!("  │   ├── posts/");
    println!("  │   │   └── hello-world.md");
    println!("  │   └── weekly-notes/");
    println!("  └── public/              ← Copied as-is into the build");

    println!("\nNext steps:");
    println!("  1. Edit {} (set title, description and url)", CONFIG_FILE);
    println!("  2. Write posts in {}/posts/", DEFAULT_CONTENT_DIR);
    println!("  3. Preview: garden preview {}", path.display());

    Ok(())
}

fn generate_garden_toml(base: &Path, title: &str, url: &str) -> Result<()> {
    let collections: Vec<String> = DEFAULT_COLLECTIONS
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect();

    let toml = format!(
        r##"# Site configuration

[site]
title = "{}"
description = "Notes, posts and half-finished thoughts"
# Absolute base URL; feed links are resolved against it
url = "{}"

[content]
# Each collection is a directory of Markdown files under `dir`
dir = "{}"
collections = [{}]
# Add more as you need them, e.g. "newsletter" or "obsidian"

[feed]
collection = "posts"
path = "{}"
"##,
        toml_escape_string(title),
        toml_escape_string(url),
        DEFAULT_CONTENT_DIR,
        collections.join(", "),
        DEFAULT_FEED_PATH,
    );

    parse_garden_toml_str(&toml).context("Generated garden.toml is invalid (check --title and --url)")?;

    fs::write(base.join(CONFIG_FILE), toml)?;
    println!("✓ Created {}", CONFIG_FILE);

    Ok(())
}

fn create_directory_structure(base: &Path) -> Result<()> {
    for collection in DEFAULT_COLLECTIONS {
        fs::create_dir_all(base.join(DEFAULT_CONTENT_DIR).join(collection))?;
    }
    fs::create_dir_all(base.join("public"))?;
    println!("✓ Created content directories");
    Ok(())
}

fn generate_sample_post(base: &Path) -> Result<()> {
    let post_path = base
        .join(DEFAULT_CONTENT_DIR)
        .join("posts")
        .join("hello-world.md");
    if post_path.exists() {
        return Ok(());
    }

    let post = format!(
        r##"---
title: Hello, world
date: {}
draft: false
description: The first post in this garden
tags: [meta]
---

Welcome! This post lives in `content/posts/hello-world.md`.

- Set `draft: true` to keep a post out of the feed
- Dates can be `YYYY-MM-DD` or a full RFC 3339 timestamp
"##,
        Utc::now().format("%Y-%m-%d")
    );

    fs::write(post_path, post)?;
    println!("✓ Created sample post");
    Ok(())
}
