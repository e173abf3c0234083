//! quill-rs: a single-owner blog served from a git checkout
//!
//! Posts are `.mdx` files with YAML front matter. The owner signs in with a
//! shared secret, edits posts in the browser and publishes them by pushing
//! to the configured git remote.

pub mod auth;
pub mod commands;
pub mod config;
pub mod content;
pub mod editor;
pub mod error;
pub mod feed;
pub mod helpers;
pub mod server;
pub mod templates;
pub mod vcs;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

/// The blog application rooted at a repository checkout
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory (repository root)
    pub base_dir: PathBuf,
}

impl Blog {
    /// Create a blog from a directory, reading `_config.yml` when present
    /// and then the environment overlay
    pub fn new<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a blog with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        Self {
            config,
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Content store over this blog's directories
    pub fn store(&self) -> content::ContentStore {
        content::ContentStore::new(
            &self.base_dir,
            &self.config.content_dir,
            &self.config.public_dir,
        )
    }
}
