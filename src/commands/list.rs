//! List site content

use anyhow::{bail, Result};

use crate::content::query::tag_counts;
use crate::Blog;

/// Lines describing the published posts or their tags
pub fn lines(blog: &Blog, content_type: &str) -> Result<Vec<String>> {
    let posts = blog.store().list_posts()?;

    let lines = match content_type {
        "post" | "posts" => {
            let mut lines = vec![format!("Posts ({}):", posts.len())];
            lines.extend(posts.iter().map(|post| {
                format!(
                    "  {} - {} [{}]",
                    post.meta.date.as_deref().unwrap_or("----------"),
                    post.meta.title,
                    post.slug
                )
            }));
            lines
        }
        "tag" | "tags" => {
            let tags = tag_counts(&posts);
            let mut lines = vec![format!("Tags ({}):", tags.len())];
            lines.extend(
                tags.into_iter()
                    .map(|(tag, count)| format!("  {} ({})", tag, count)),
            );
            lines
        }
        _ => bail!("Unknown type: {}. Available: post, tag", content_type),
    };

    Ok(lines)
}

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    for line in lines(blog, content_type)? {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_list_posts_and_tags() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());
        let store = blog.store();
        store
            .save_post("a", "---\ntitle: A\ndate: 2026-01-02\ntags: [rust, web]\n---\n")
            .unwrap();
        store
            .save_post("b", "---\ntitle: B\ndate: 2026-01-01\ntags: rust\n---\n")
            .unwrap();
        store
            .save_post("c", "---\ntitle: C\npublished: false\n---\n")
            .unwrap();

        assert_eq!(
            lines(&blog, "posts").unwrap(),
            vec!["Posts (2):", "  2026-01-02 - A [a]", "  2026-01-01 - B [b]"]
        );
        assert_eq!(
            lines(&blog, "tags").unwrap(),
            vec!["Tags (2):", "  rust (2)", "  web (1)"]
        );
        assert!(lines(&blog, "pages").is_err());
    }
}
