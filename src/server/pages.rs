//! Public pages, editor page and feeds

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tera::Context;

use super::AppState;
use crate::content::query::{filter_posts, is_book, tag_counts};
use crate::error::Error;
use crate::feed::{render_rss, render_sitemap};

const SIDEBAR_LATEST: usize = 5;
const SIDEBAR_BOOKS: usize = 5;
const SIDEBAR_TAGS: usize = 50;

const XML_CONTENT_TYPE: &str = "application/xml; charset=UTF-8";

#[derive(Debug, Default, Deserialize)]
pub struct BlogQuery {
    q: Option<String>,
}

#[derive(Debug, Serialize)]
struct TagCount {
    name: String,
    count: usize,
}

/// Context values the layout needs on every page
fn page_context(state: &AppState, title: &str, query: &str) -> Context {
    let mut context = Context::new();
    context.insert("lang", &state.config.language);
    context.insert("site_title", &state.config.title);
    context.insert("page_title", title);
    context.insert("query", query);
    context
}

fn render(
    state: &AppState,
    template_name: &str,
    context: &Context,
) -> Result<Html<String>, Error> {
    state
        .templates
        .render(template_name, context)
        .map(Html)
        .map_err(|e| Error::Render(format!("{:#}", e)))
}

/// GET /
pub async fn home() -> Redirect {
    Redirect::temporary("/blog")
}

/// GET /blog?q=
pub async fn blog_index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BlogQuery>,
) -> Result<Html<String>, Error> {
    let query = params.q.unwrap_or_default();
    let query = query.trim();
    let posts = state.posts().await?;
    let filtered = filter_posts(&posts, query);

    let mut context = page_context(&state, "Blog", query);
    match filtered.split_first() {
        Some((featured, rest)) => {
            context.insert("featured", featured);
            context.insert("featured_html", &state.markdown.render(&featured.content));
            context.insert("rest", rest);
        }
        None => context.insert("featured", &None::<()>),
    }

    let latest: Vec<_> = filtered.iter().take(SIDEBAR_LATEST).collect();
    let books: Vec<_> = filtered
        .iter()
        .filter(|p| is_book(p))
        .take(SIDEBAR_BOOKS)
        .collect();
    let tags: Vec<_> = tag_counts(filtered.iter().copied())
        .into_iter()
        .take(SIDEBAR_TAGS)
        .map(|(name, count)| TagCount { name, count })
        .collect();
    context.insert("latest", &latest);
    context.insert("books", &books);
    context.insert("tags", &tags);

    render(&state, "blog.html", &context)
}

/// GET /blog/{slug}
pub async fn post_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Response, Error> {
    let post = match state.post(slug).await? {
        Some(post) if post.meta.published => post,
        _ => {
            let context = page_context(&state, "Not found", "");
            let page = render(&state, "not_found.html", &context)?;
            return Ok((StatusCode::NOT_FOUND, page).into_response());
        }
    };

    let mut context = page_context(&state, &post.meta.title, "");
    context.insert("content_html", &state.markdown.render(&post.content));
    context.insert("post", &post);
    Ok(render(&state, "post.html", &context)?.into_response())
}

/// GET /login
pub async fn login(State(state): State<Arc<AppState>>) -> Result<Html<String>, Error> {
    render(&state, "login.html", &page_context(&state, "Login", ""))
}

/// GET /write
pub async fn write(State(state): State<Arc<AppState>>) -> Result<Html<String>, Error> {
    let mut context = page_context(&state, "Write", "");
    context.insert("today", &state.clock.now().format("%Y-%m-%d").to_string());
    render(&state, "write.html", &context)
}

/// GET /rss
pub async fn rss(State(state): State<Arc<AppState>>) -> Result<Response, Error> {
    let posts = state.posts().await?;
    let xml = render_rss(&state.config, &posts, state.clock.now());
    Ok(([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], xml).into_response())
}

/// GET /sitemap.xml
pub async fn sitemap(State(state): State<Arc<AppState>>) -> Result<Response, Error> {
    let posts = state.posts().await?;
    let xml = render_sitemap(&state.config, &posts, state.clock.now());
    Ok(([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], xml).into_response())
}
