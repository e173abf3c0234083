//! XML sitemap

use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{escape_xml, full_url};

struct Entry {
    loc: String,
    last_modified: DateTime<Utc>,
    change_frequency: &'static str,
    priority: &'static str,
}

/// Render the home page, the blog index and every post as a sitemap
pub fn render_sitemap(config: &SiteConfig, posts: &[Post], now: DateTime<Utc>) -> String {
    let site = config.base_url();

    let mut entries = vec![
        Entry {
            loc: full_url(site, "/"),
            last_modified: now,
            change_frequency: "weekly",
            priority: "1.0",
        },
        Entry {
            loc: full_url(site, "/blog"),
            last_modified: now,
            change_frequency: "weekly",
            priority: "0.8",
        },
    ];
    entries.extend(posts.iter().map(|post| Entry {
        loc: full_url(site, &post.path()),
        last_modified: post.date().unwrap_or(now),
        change_frequency: "monthly",
        priority: "0.6",
    }));

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry.last_modified.format("%Y-%m-%dT%H:%M:%SZ")
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.change_frequency
        ));
        xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}
