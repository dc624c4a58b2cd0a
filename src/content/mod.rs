//! Content module - posts, front-matter, indexing and relationships

mod frontmatter;
pub mod index;
pub mod loader;
mod post;
pub mod reading_time;
pub mod relations;
pub mod series;
mod tags;

pub use frontmatter::{parse_date_string, FrontMatter};
pub use index::PostIndex;
pub use post::{Post, PostMeta, TagCount, UNCATEGORIZED};
pub use relations::{prioritize_tag, related_posts, series_navigation, SeriesNavigation};
pub use tags::TagRegistry;
