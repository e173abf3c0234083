//! Index queries: free-text filtering, tag counts, book picks

use indexmap::IndexMap;

use super::Post;

/// Keep posts whose title, description, tags or slug contain `query`
///
/// Matching is a case-insensitive substring test against all fields joined
/// by spaces. A blank query keeps everything.
pub fn filter_posts<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return posts.iter().collect();
    }

    posts
        .iter()
        .filter(|post| haystack(post).contains(&needle))
        .collect()
}

fn haystack(post: &Post) -> String {
    let mut fields: Vec<&str> = vec![post.meta.title.as_str()];
    if let Some(desc) = post.meta.description.as_deref() {
        fields.push(desc);
    }
    fields.extend(post.meta.tags.iter().map(String::as_str));
    fields.push(post.slug.as_str());

    fields
        .into_iter()
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A post counts as a book review when typed `book` or tagged `book`
pub fn is_book(post: &Post) -> bool {
    post.meta.kind.as_deref() == Some("book") || post.meta.tags.iter().any(|t| t == "book")
}

/// Tag usage counts, most used first (ties keep first-seen order)
pub fn tag_counts<'a, I>(posts: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for post in posts {
        for tag in &post.meta.tags {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
