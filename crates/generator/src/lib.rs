// Feed building, RSS serialization and HTML page rendering

pub mod feed;
pub mod page;
pub mod rss;

pub use feed::{build_feed, published};
pub use page::{render_index, render_post};
pub use self::rss::{RSS_CONTENT_TYPE, render_rss};
