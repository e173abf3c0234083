//! Site configuration (_config.yml + environment overlay)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Deployment environment the server runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,
    pub url: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Editing
    pub environment: Environment,
    pub allow_edit_on_prod: bool,
    pub owner_secret: Option<String>,
    pub session_secret: Option<String>,
    pub cookie_secure: bool,
    pub max_upload_bytes: usize,

    // Feed
    pub feed_limit: usize,

    // Publishing
    #[serde(default)]
    pub git: GitConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: "Updates".to_string(),
            language: "ja".to_string(),
            url: "http://localhost:3000".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),

            environment: Environment::Development,
            allow_edit_on_prod: false,
            owner_secret: None,
            session_secret: None,
            cookie_secure: true,
            max_upload_bytes: 10 * 1024 * 1024,

            feed_limit: 20,

            git: GitConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Overlay values from process environment variables
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    /// Overlay values from an arbitrary variable lookup
    pub fn apply_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("OWNER_SECRET") {
            self.owner_secret = Some(v);
        }
        if let Some(v) = lookup("SESSION_SECRET") {
            self.session_secret = Some(v);
        }
        if let Some(v) = lookup("SITE_URL") {
            self.url = v;
        }
        if let Some(v) = lookup("RSS_TITLE") {
            self.title = v;
        }
        if let Some(v) = lookup("RSS_DESCRIPTION") {
            self.description = v;
        }
        if let Some(v) = lookup("BLOG_ENV") {
            match Environment::from_env_value(&v) {
                Some(env) => self.environment = env,
                None => tracing::warn!("Ignoring unknown BLOG_ENV value: {}", v),
            }
        }
        if let Some(v) = lookup("ALLOW_EDIT_ON_PROD") {
            self.allow_edit_on_prod = v == "true";
        }
        if let Some(v) = lookup("GIT_AUTHOR_NAME") {
            self.git.author_name = v;
        }
        if let Some(v) = lookup("GIT_AUTHOR_EMAIL") {
            self.git.author_email = v;
        }
    }

    /// Check the settings the server cannot run without
    pub fn validate(&self) -> Result<()> {
        if self.owner_secret.as_deref().map_or(true, str::is_empty) {
            bail!("owner_secret is not configured (set OWNER_SECRET)");
        }
        if self.session_secret.as_deref().map_or(true, str::is_empty) {
            bail!("session_secret is not configured (set SESSION_SECRET)");
        }
        Ok(())
    }

    /// Whether write endpoints are open in the current environment
    pub fn editing_enabled(&self) -> bool {
        self.environment != Environment::Production || self.allow_edit_on_prod
    }

    /// Site URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Git publishing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    pub remote: String,
    pub branch: String,
    pub author_name: String,
    pub author_email: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch: "main".to_string(),
            author_name: "owner".to_string(),
            author_email: "owner@example.com".to_string(),
        }
    }
}
