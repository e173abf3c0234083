//! Feeds derived from the content store

mod rss;
mod sitemap;

pub use rss::render_rss;
pub use sitemap::render_sitemap;
