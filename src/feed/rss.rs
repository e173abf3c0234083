//! RSS 2.0 feed

use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{cdata, escape_xml, full_url};

/// Render the newest `config.feed_limit` posts as an RSS 2.0 document
///
/// Posts without a readable date are stamped with `now`.
pub fn render_rss(config: &SiteConfig, posts: &[Post], now: DateTime<Utc>) -> String {
    let site = config.base_url();

    let mut feed = String::new();
    feed.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    feed.push_str("<rss version=\"2.0\">\n");
    feed.push_str("<channel>\n");
    feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
    feed.push_str(&format!("  <link>{}</link>\n", escape_xml(site)));
    feed.push_str(&format!(
        "  <description>{}</description>\n",
        escape_xml(&config.description)
    ));
    feed.push_str(&format!(
        "  <language>{}</language>\n",
        escape_xml(&config.language)
    ));

    for post in posts.iter().take(config.feed_limit) {
        let url = escape_xml(&full_url(site, &post.path()));
        let pub_date = post.date().unwrap_or(now).to_rfc2822();
        let description = post.meta.description.as_deref().unwrap_or_default();

        feed.push_str("  <item>\n");
        feed.push_str(&format!(
            "    <title>{}</title>\n",
            escape_xml(&post.meta.title)
        ));
        feed.push_str(&format!("    <link>{}</link>\n", url));
        feed.push_str(&format!("    <guid>{}</guid>\n", url));
        feed.push_str(&format!("    <pubDate>{}</pubDate>\n", pub_date));
        feed.push_str(&format!(
            "    <description>{}</description>\n",
            cdata(description)
        ));
        feed.push_str("  </item>\n");
    }

    feed.push_str("</channel>\n");
    feed.push_str("</rss>\n");
    feed
}
