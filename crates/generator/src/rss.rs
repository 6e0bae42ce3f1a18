//! RSS 2.0 serialization of a feed document.

use garden_core::{Error, FeedDocument, FeedEntry, Result};
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use url::Url;

pub const RSS_CONTENT_TYPE: &str = "application/xml";

const GENERATOR: &str = "garden";

/// Render the document as an RSS 2.0 channel.
///
/// Item links are site-relative in the document and are resolved against
/// the site URL here, so readers get absolute links.
pub fn render_rss(document: &FeedDocument) -> Result<String> {
    let base = Url::parse(&document.site.site)
        .map_err(|e| Error::Feed(format!("invalid site URL '{}': {}", document.site.site, e)))?;

    let items = document
        .entries
        .iter()
        .map(|entry| entry_to_item(entry, &base))
        .collect::<Result<Vec<_>>>()?;

    let channel = ChannelBuilder::default()
        .title(document.site.title.clone())
        .link(base.to_string())
        .description(document.site.description.clone())
        .generator(GENERATOR.to_string())
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| Error::Feed(format!("RSS validation failed: {e}")))?;

    tracing::debug!(items = document.entries.len(), "rendered rss channel");
    Ok(channel.to_string())
}

fn entry_to_item(entry: &FeedEntry, base: &Url) -> Result<rss::Item> {
    let link = base
        .join(&entry.link)
        .map_err(|e| Error::Feed(format!("cannot resolve link '{}': {}", entry.link, e)))?
        .to_string();

    Ok(ItemBuilder::default()
        .title(entry.title.clone())
        .link(link.clone())
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .pub_date(entry.publication_date.to_rfc2822())
        .build())
}
