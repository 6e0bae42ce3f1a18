use crate::feed::published;
use garden_core::{Post, SiteMetadata};
use pulldown_cmark::{Options, Parser, html};

/// HTML-escape a string to prevent XSS attacks
///
/// Escapes: & < > " '
fn html_escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#x27;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Render a Markdown body to HTML
fn render_markdown(body: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(body, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

const STYLE: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            padding: 2rem;
        }
        main { max-width: 720px; margin: 0 auto; }
        header { margin-bottom: 2rem; }
        h1 { font-size: 2rem; color: #222; }
        h2 { font-size: 1.3rem; margin: 1.5rem 0 0.5rem; }
        .tagline { color: #666; }
        ul.posts { list-style: none; }
        ul.posts li { padding: 0.4rem 0; border-bottom: 1px solid #eee; }
        time { color: #999; font-size: 0.9rem; margin-right: 0.75rem; }
        article p, article ul, article pre { margin: 1rem 0; }
        article pre { background: #f6f6f6; padding: 1rem; overflow-x: auto; }
        .tags { color: #999; font-size: 0.9rem; margin-top: 2rem; }
"#;

const RELOAD_SCRIPT: &str = r#"
    <script>
        // Hot reload via Server-Sent Events
        const eventSource = new EventSource('/_reload');
        eventSource.onmessage = () => location.reload();
        eventSource.onerror = () => eventSource.close();
    </script>"#;

fn layout(site: &SiteMetadata, title: &str, feed_route: &str, content: &str, is_preview: bool) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <meta name="description" content="{}">
    <link rel="alternate" type="application/rss+xml" title="{}" href="{}">
    <style>{}</style>
</head>
<body>
    <main>
{}
    </main>{}
</body>
</html>
"#,
        html_escape(title),
        html_escape(&site.description),
        html_escape(&site.title),
        html_escape(feed_route),
        STYLE,
        content,
        if is_preview { RELOAD_SCRIPT } else { "" }
    )
}

/// Index page listing every collection's published posts, newest first
///
/// `collections` is (name, posts) in display order.
pub fn render_index(
    site: &SiteMetadata,
    feed_route: &str,
    collections: &[(String, Vec<Post>)],
    is_preview: bool,
) -> String {
    let sections: String = collections
        .iter()
        .map(|(name, posts)| {
            let items: String = published(posts)
                .into_iter()
                .map(|post| {
                    format!(
                        r#"            <li><time datetime="{}">{}</time><a href="{}">{}</a></li>
"#,
                        post.date.to_rfc3339(),
                        post.date.format("%Y-%m-%d"),
                        html_escape(&post.link()),
                        html_escape(&post.title)
                    )
                })
                .collect();

            if items.is_empty() {
                String::new()
            } else {
                format!(
                    r#"        <section>
            <h2>{}</h2>
            <ul class="posts">
{}            </ul>
        </section>
"#,
                    html_escape(name),
                    items
                )
            }
        })
        .collect();

    let content = format!(
        r#"        <header>
            <h1>{}</h1>
            <p class="tagline">{}</p>
        </header>
{}"#,
        html_escape(&site.title),
        html_escape(&site.description),
        sections
    );

    layout(site, &site.title, feed_route, &content, is_preview)
}

/// Page for a single post
pub fn render_post(site: &SiteMetadata, feed_route: &str, post: &Post, is_preview: bool) -> String {
    let tags_html = if post.tags.is_empty() {
        String::new()
    } else {
        let tags: Vec<String> = post.tags.iter().map(|t| html_escape(t)).collect();
        format!(r#"        <p class="tags">Tags: {}</p>"#, tags.join(", "))
    };

    let content = format!(
        r#"        <header>
            <p><a href="/">{}</a></p>
            <h1>{}</h1>
            <time datetime="{}">{}</time>
        </header>
        <article>
{}
        </article>
{}"#,
        html_escape(&site.title),
        html_escape(&post.title),
        post.date.to_rfc3339(),
        post.date.format("%B %-d, %Y"),
        render_markdown(&post.body),
        tags_html
    );

    let title = format!("{} | {}", post.title, site.title);
    layout(site, &title, feed_route, &content, is_preview)
}
