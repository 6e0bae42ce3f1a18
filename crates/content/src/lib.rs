// Content collections: Markdown files with frontmatter, grouped by directory

mod frontmatter;
pub mod loader;
mod slug;
mod source;

pub use frontmatter::{Fence, Frontmatter, parse_date, split_frontmatter};
pub use loader::{load_collection, load_entries, parse_post};
pub use slug::{slug_from_override, slug_from_path, slugify};
pub use source::{ContentSource, FsContentSource, MemorySource};
