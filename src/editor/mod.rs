//! Owner write actions: save, upload and publish
//!
//! Every action first checks the environment write gate, then validates its
//! input, and only then touches the content store or version control. A
//! rejected request leaves no partial side effects behind.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::SiteConfig;
use crate::content::slug::validate_slug;
use crate::content::ContentStore;
use crate::error::{Error, Result};
use crate::vcs::VersionControl;

/// A file received from the editor's upload form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct Editor {
    store: ContentStore,
    vcs: Arc<dyn VersionControl>,
    editing_enabled: bool,
}

impl Editor {
    pub fn new(config: &SiteConfig, store: ContentStore, vcs: Arc<dyn VersionControl>) -> Self {
        Self {
            store,
            vcs,
            editing_enabled: config.editing_enabled(),
        }
    }

    /// Reject writes when the environment write gate is closed
    pub fn ensure_enabled(&self) -> Result<()> {
        if self.editing_enabled {
            Ok(())
        } else {
            Err(Error::EditingDisabled)
        }
    }

    /// Write `content` as the full source of post `slug`
    pub async fn save(&self, slug: &str, content: Option<&str>) -> Result<PathBuf> {
        self.ensure_enabled()?;
        let slug = validate_slug(slug)?.to_string();
        let content = match content {
            Some(c) if !c.trim().is_empty() => c.to_string(),
            _ => return Err(Error::MissingContent),
        };

        let store = self.store.clone();
        blocking(move || store.save_post(&slug, &content)).await
    }

    /// Store an uploaded asset under the post's image folder, returning its URL
    pub async fn upload(
        &self,
        slug: &str,
        file: Option<UploadedFile>,
        now: DateTime<Utc>,
    ) -> Result<String> {
        self.ensure_enabled()?;
        let slug = validate_slug(slug)?.to_string();
        let file = match file {
            Some(f) if !f.bytes.is_empty() => f,
            _ => return Err(Error::MissingFile),
        };

        let store = self.store.clone();
        blocking(move || store.store_asset(&slug, &file.file_name, &file.bytes, now)).await
    }

    /// Stage, commit and push a post together with its assets
    ///
    /// A failed commit (typically "nothing to commit") is logged and ignored;
    /// staging and push failures are returned.
    pub async fn publish(&self, slug: &str) -> Result<()> {
        self.ensure_enabled()?;
        let slug = validate_slug(slug)?;

        let post_path = self.store.post_path(slug);
        if !tokio::fs::try_exists(&post_path).await? {
            return Err(Error::UnknownPost(slug.to_string()));
        }

        let mut paths = vec![self.store.relative(&post_path)];
        let asset_dir = self.store.asset_dir(slug);
        if tokio::fs::try_exists(&asset_dir).await? {
            paths.push(self.store.relative(&asset_dir));
        }

        self.vcs.stage(&paths).await?;

        if let Err(e) = self.vcs.commit(&format!("post: {}", slug)).await {
            tracing::warn!("Commit for {} skipped: {}", slug, e);
        }

        self.vcs.push().await?;
        tracing::info!("Published {}", slug);
        Ok(())
    }
}

/// Run blocking filesystem work off the async executor
async fn blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))?
}
