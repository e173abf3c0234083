//! Owner content endpoints: save, upload, publish

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::AppState;
use crate::editor::UploadedFile;
use crate::error::Error;

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    slug: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    #[serde(default)]
    slug: String,
}

fn bad_json(e: JsonRejection) -> Error {
    Error::InvalidRequest(e.body_text())
}

fn bad_multipart(e: MultipartError) -> Error {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge
    } else {
        Error::InvalidRequest(e.body_text())
    }
}

/// POST /api/content/save
pub async fn save(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<Value>, Error> {
    state.editor.ensure_enabled()?;
    let Json(request) = payload.map_err(bad_json)?;

    state
        .editor
        .save(&request.slug, request.content.as_deref())
        .await?;
    Ok(Json(json!({ "saved": true })))
}

/// POST /api/content/upload (multipart: `slug`, `file`)
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, Error> {
    state.editor.ensure_enabled()?;
    let mut multipart = multipart.map_err(|e| Error::InvalidRequest(e.body_text()))?;

    let mut slug = String::new();
    let mut file = None;
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "slug" => slug = field.text().await.map_err(bad_multipart)?,
            "file" => {
                let file_name = field.file_name().unwrap_or("file").to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                file = Some(UploadedFile {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let url = state
        .editor
        .upload(&slug, file, state.clock.now())
        .await?;
    Ok(Json(json!({ "url": url })))
}

/// POST /api/content/publish
pub async fn publish(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PublishRequest>, JsonRejection>,
) -> Result<Json<Value>, Error> {
    state.editor.ensure_enabled()?;
    let Json(request) = payload.map_err(bad_json)?;

    state.editor.publish(&request.slug).await?;
    Ok(Json(json!({ "pushed": true })))
}
