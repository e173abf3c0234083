//! HTTP server: shared state, routing and startup

mod auth;
mod content;
mod error;
mod pages;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::{Clock, SystemClock, TokenSigner};
use crate::config::SiteConfig;
use crate::content::{ContentStore, MarkdownRenderer, Post};
use crate::editor::Editor;
use crate::error::Error;
use crate::templates::TemplateRenderer;
use crate::vcs::{GitCli, VersionControl};
use crate::Blog;

/// Immutable state shared by every request
pub struct AppState {
    pub config: SiteConfig,
    pub store: ContentStore,
    pub editor: Editor,
    pub signer: TokenSigner,
    pub clock: Arc<dyn Clock>,
    pub templates: TemplateRenderer,
    pub markdown: MarkdownRenderer,
}

impl AppState {
    /// Build the state for a repository checkout at `root`
    ///
    /// Fails when the configuration lacks either secret.
    pub fn new<P: AsRef<Path>>(
        config: SiteConfig,
        root: P,
        vcs: Arc<dyn VersionControl>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;

        let store = ContentStore::new(root, &config.content_dir, &config.public_dir);
        let editor = Editor::new(&config, store.clone(), vcs);
        let signer = TokenSigner::new(config.session_secret.as_deref().unwrap_or_default());

        Ok(Self {
            config,
            store,
            editor,
            signer,
            clock,
            templates: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::new(),
        })
    }

    /// Published posts, newest first
    pub async fn posts(&self) -> Result<Vec<Post>, Error> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.list_posts())
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))?
    }

    /// A single post by slug, published or not
    pub async fn post(&self, slug: String) -> Result<Option<Post>, Error> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.get_post(&slug))
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let owner_only = Router::new()
        .route("/write", get(pages::write))
        .route("/api/content/save", post(content::save))
        .route("/api/content/upload", post(content::upload))
        .route("/api/content/publish", post(content::publish))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_owner,
        ));

    Router::new()
        .route("/", get(pages::home))
        .route("/blog", get(pages::blog_index))
        .route("/blog/:slug", get(pages::post_detail))
        .route("/login", get(pages::login))
        .route("/rss", get(pages::rss))
        .route("/sitemap.xml", get(pages::sitemap))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .merge(owner_only)
        .nest_service("/images", ServeDir::new(state.store.images_dir()))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the blog server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let vcs = Arc::new(GitCli::new(&blog.base_dir, blog.config.git.clone()));
    let state = AppState::new(
        blog.config.clone(),
        &blog.base_dir,
        vcs,
        Arc::new(SystemClock),
    )?;

    if !state.config.editing_enabled() {
        tracing::info!("Editing is disabled in production");
    }

    let app = router(Arc::new(state));

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
