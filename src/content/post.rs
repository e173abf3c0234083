//! Post model

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::FrontMatter;

/// A blog post loaded from the content store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// File name without extension, the post's primary key
    pub slug: String,

    /// Raw body (everything after the front-matter block)
    pub content: String,

    pub meta: PostMeta,
}

/// Metadata resolved from a post's front-matter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMeta {
    /// Title, falling back to the slug when front-matter has none
    pub title: String,

    /// Date as written in the front-matter
    pub date: Option<String>,

    pub tags: Vec<String>,

    pub description: Option<String>,

    /// Free-form post kind (`book`, `note`, ...)
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub published: bool,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Post {
    /// Build a post from its slug and full file source
    pub fn from_source(slug: &str, source: &str) -> Self {
        let (fm, body) = FrontMatter::parse(source);
        Self::from_parts(slug, fm, body)
    }

    fn from_parts(slug: &str, fm: FrontMatter, body: &str) -> Self {
        let title = fm
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| slug.to_string());

        Self {
            slug: slug.to_string(),
            content: body.to_string(),
            meta: PostMeta {
                title,
                date: fm.date,
                tags: fm.tags,
                description: fm.description,
                kind: fm.kind,
                published: fm.published,
                extra: fm.extra,
            },
        }
    }

    /// Parsed publication date, if the front-matter carries a readable one
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.meta
            .date
            .as_deref()
            .and_then(super::frontmatter::parse_date_string)
    }

    /// Site-relative URL of the post
    pub fn path(&self) -> String {
        format!("/blog/{}", self.slug)
    }
}
