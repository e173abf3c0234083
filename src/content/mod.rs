//! Content module - post files, front-matter, queries and rendering

mod frontmatter;
mod markdown;
mod post;
pub mod query;
pub mod slug;
mod store;

pub use frontmatter::{parse_date_string, FrontMatter};
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostMeta};
pub use store::{ContentStore, IMAGES_DIR, POST_EXTENSION};
