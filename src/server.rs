//! HTTP surface: three read-only endpoints over the caption, metadata, and
//! summarization providers. Each request runs its outbound calls strictly
//! sequentially; state is shared via `Arc` and never mutated.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

use crate::{Caption, CaptionFetcher, Error, MetadataFetcher, Summarizer, extract_video_id};

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub captions: Arc<dyn CaptionFetcher>,
    pub metadata: Arc<dyn MetadataFetcher>,
    pub summarizer: Arc<dyn Summarizer>,
    pub default_lang: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    #[cfg(test)]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[cfg(test)]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = if err.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "detail": self.detail,
        });
        (self.status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub struct CaptionsQuery {
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub video_id: String,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CaptionsResponse {
    pub video_id: String,
    pub captions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FullResponse {
    pub video_id: String,
    pub language: String,
    pub title: String,
    pub thumbnail_url: String,
    pub summary: String,
    pub bullet_points: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SimpleResponse {
    pub video_id: String,
    pub language: String,
    pub summary: String,
    pub bullet_points: Vec<String>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/captions/", get(get_captions))
        .route("/get-captions/", get(get_captions_full))
        .route("/get-captions-simple/", get(get_captions_simple))
        .layer(cors)
        .with_state(state)
}

pub async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        log::error!("Failed to install Ctrl+C handler: {err}");
    }
}

/// Captions only: the raw fragment texts, no summarization.
async fn get_captions(
    State(state): State<AppState>,
    Query(query): Query<CaptionsQuery>,
) -> ApiResult<Json<CaptionsResponse>> {
    let video_id = normalize_video_id(&query.video_id)?;
    let captions = state.captions.fetch(&video_id, &state.default_lang).await?;

    Ok(Json(CaptionsResponse {
        video_id,
        captions: captions.into_iter().map(|c| c.text).collect(),
    }))
}

/// Captions → metadata → summary, combined into one payload.
async fn get_captions_full(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<Json<FullResponse>> {
    let video_id = normalize_video_id(&query.video_id)?;
    let language = query.language.unwrap_or_else(|| state.default_lang.clone());

    let captions = state.captions.fetch(&video_id, &language).await?;
    let metadata = state.metadata.fetch(&video_id).await?;
    let result = state.summarizer.summarize(&join_caption_text(&captions)).await?;

    Ok(Json(FullResponse {
        video_id,
        language,
        title: metadata.title,
        thumbnail_url: metadata.thumbnail_url,
        summary: result.summary,
        bullet_points: result.bullet_points,
    }))
}

/// Same as the full variant minus the metadata call (it is never made).
async fn get_captions_simple(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<Json<SimpleResponse>> {
    let video_id = normalize_video_id(&query.video_id)?;
    let language = query.language.unwrap_or_else(|| state.default_lang.clone());

    let captions = state.captions.fetch(&video_id, &language).await?;
    let result = state.summarizer.summarize(&join_caption_text(&captions)).await?;

    Ok(Json(SimpleResponse {
        video_id,
        language,
        summary: result.summary,
        bullet_points: result.bullet_points,
    }))
}

fn normalize_video_id(input: &str) -> Result<String, ApiError> {
    extract_video_id(input).ok_or_else(|| ApiError::from(Error::VideoUnavailable))
}

fn join_caption_text(captions: &[Caption]) -> String {
    captions
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
