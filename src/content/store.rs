//! Content store - reads and writes post files and per-post assets

use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::slug::{sanitize_file_name, validate_slug};
use super::Post;
use crate::error::{Error, Result};

/// Extension of post files in the content directory
pub const POST_EXTENSION: &str = "mdx";

/// URL prefix (and directory under the public dir) for uploaded assets
pub const IMAGES_DIR: &str = "images";

/// File-backed content store
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
    content_dir: PathBuf,
    public_dir: PathBuf,
}

impl ContentStore {
    /// Create a store rooted at `root` (the repository checkout)
    pub fn new<P: AsRef<Path>>(root: P, content_dir: &str, public_dir: &str) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            content_dir: root.join(content_dir),
            public_dir: root.join(public_dir),
            root,
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Directory served under `/images`
    pub fn images_dir(&self) -> PathBuf {
        self.public_dir.join(IMAGES_DIR)
    }

    /// Path of the file backing `slug`
    pub fn post_path(&self, slug: &str) -> PathBuf {
        self.content_dir.join(format!("{}.{}", slug, POST_EXTENSION))
    }

    /// Directory holding uploaded assets for `slug`
    pub fn asset_dir(&self, slug: &str) -> PathBuf {
        self.images_dir().join(slug)
    }

    /// Express `path` relative to the store root, for version control
    pub fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root).unwrap_or(path).to_path_buf()
    }

    /// List published posts, newest first
    ///
    /// Posts without a readable date sort after dated ones; ties fall back to slug order.
    pub fn list_posts(&self) -> Result<Vec<Post>> {
        if !self.content_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_post_file(path) {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match fs::read_to_string(path) {
                Ok(source) => {
                    let post = Post::from_source(slug, &source);
                    if post.meta.published {
                        posts.push(post);
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to read post {:?}: {}", path, e);
                }
            }
        }

        posts.sort_by_cached_key(|p| (Reverse(p.date()), p.slug.clone()));

        Ok(posts)
    }

    /// Load a single post, published or not
    ///
    /// Any failure (bad slug, missing file, unreadable file) yields `None`.
    pub fn get_post(&self, slug: &str) -> Option<Post> {
        if validate_slug(slug).is_err() {
            tracing::warn!("Refusing to read post with invalid slug {:?}", slug);
            return None;
        }

        let path = self.post_path(slug);
        match fs::read_to_string(&path) {
            Ok(source) => Some(Post::from_source(slug, &source)),
            Err(e) => {
                tracing::warn!("Error reading post {}: {}", slug, e);
                None
            }
        }
    }

    /// Write (or overwrite) the file backing `slug`
    pub fn save_post(&self, slug: &str, content: &str) -> Result<PathBuf> {
        validate_slug(slug)?;

        fs::create_dir_all(&self.content_dir)?;
        let path = self.post_path(slug);
        fs::write(&path, content)?;

        tracing::info!("Saved post {} to {:?}", slug, path);
        Ok(path)
    }

    /// Store an uploaded asset for `slug`, returning its public URL
    ///
    /// The stored name is `<millis>-<random>-<sanitized original name>`.
    pub fn store_asset(
        &self,
        slug: &str,
        file_name: &str,
        bytes: &[u8],
        now: DateTime<Utc>,
    ) -> Result<String> {
        validate_slug(slug)?;
        if bytes.is_empty() {
            return Err(Error::MissingFile);
        }

        let dir = self.asset_dir(slug);
        fs::create_dir_all(&dir)?;

        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let name = format!(
            "{}-{}-{}",
            now.timestamp_millis(),
            &nonce[..8],
            sanitize_file_name(file_name)
        );
        fs::write(dir.join(&name), bytes)?;

        tracing::info!("Stored asset {} for {}", name, slug);
        Ok(format!("/{}/{}/{}", IMAGES_DIR, slug, name))
    }
}

/// Check if a file is a post file
fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == POST_EXTENSION)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, ContentStore) {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::new(dir.path(), "content", "public");
        (dir, store)
    }

    fn write(store: &ContentStore, slug: &str, source: &str) {
        fs::create_dir_all(store.content_dir()).unwrap();
        fs::write(store.post_path(slug), source).unwrap();
    }

    #[test]
    fn test_missing_content_dir_is_empty() {
        let (_dir, store) = store();
        assert!(store.list_posts().unwrap().is_empty());
    }

    #[test]
    fn test_list_posts_filters_and_sorts() {
        let (_dir, store) = store();
        write(&store, "old", "---\ntitle: Old\ndate: 2023-01-01\n---\nold");
        write(&store, "new", "---\ntitle: New\ndate: 2024-06-01\n---\nnew");
        write(&store, "hidden", "---\ntitle: Hidden\ndate: 2025-01-01\npublished: false\n---\n");
        write(&store, "undated", "---\ntitle: Undated\n---\n");
        fs::write(store.content_dir().join("notes.txt"), "ignored").unwrap();

        let posts = store.list_posts().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "old", "undated"]);
        assert!(posts.iter().all(|p| p.meta.published));
    }

    #[test]
    fn test_get_post() {
        let (_dir, store) = store();
        write(&store, "hidden", "---\ntitle: Hidden\npublished: false\n---\nbody");

        let post = store.get_post("hidden").unwrap();
        assert_eq!(post.meta.title, "Hidden");
        assert!(!post.meta.published);

        assert!(store.get_post("missing").is_none());
        assert!(store.get_post("../secret").is_none());
    }

    #[test]
    fn test_save_then_get() {
        let (_dir, store) = store();
        let path = store.save_post("a-b", "hi").unwrap();
        assert!(path.ends_with("content/a-b.mdx"));

        let post = store.get_post("a-b").unwrap();
        assert_eq!(post.slug, "a-b");
        assert_eq!(post.content, "hi");
    }

    #[test]
    fn test_save_rejects_bad_slug() {
        let (_dir, store) = store();
        assert!(matches!(
            store.save_post("Bad Slug", "hi"),
            Err(Error::InvalidSlug(_))
        ));
        assert!(!store.content_dir().exists());
    }

    #[test]
    fn test_store_asset() {
        let (_dir, store) = store();
        let now = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();

        let url = store.store_asset("a-b", "Cat Photo.JPG", b"jpeg", now).unwrap();
        assert!(url.starts_with("/images/a-b/1700000000000-"));
        assert!(url.ends_with("-cat-photo-jpg"));

        let name = url.rsplit('/').next().unwrap();
        let stored = fs::read(store.asset_dir("a-b").join(name)).unwrap();
        assert_eq!(stored, b"jpeg");

        let again = store.store_asset("a-b", "Cat Photo.JPG", b"jpeg", now).unwrap();
        assert_ne!(url, again);
    }

    #[test]
    fn test_store_asset_rejects_empty_file() {
        let (_dir, store) = store();
        assert!(matches!(
            store.store_asset("a-b", "x.png", b"", Utc::now()),
            Err(Error::MissingFile)
        ));
    }

    #[test]
    fn test_relative() {
        let (_dir, store) = store();
        let rel = store.relative(&store.post_path("a-b"));
        assert_eq!(rel, PathBuf::from("content/a-b.mdx"));
    }

    #[test]
    fn test_malformed_drafts_are_not_listed() {
        let (_dir, store) = store();
        write(
            &store,
            "draft",
            "---\ntitle: Secret\ntags: {a: 1}\npublished: false\n---\nbody",
        );
        write(
            &store,
            "draft2",
            "---\ntitle: [Secret, Two]\npublished: false\n---\nbody",
        );
        write(&store, "visible", "---\ntitle: Visible\n---\nbody");

        let slugs: Vec<_> = store
            .list_posts()
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, vec!["visible"]);
    }
}
