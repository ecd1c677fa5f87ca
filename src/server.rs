/*!
 * HTTP API.
 *
 * JSON endpoints over the application controller:
 *
 * - `GET /health` returns `OK`
 * - `POST /fetch_transcript` `{video_url}` returns the transcript, detected
 *   language and suggested preserve terms
 * - `POST /translate_transcript` translates caller-supplied text
 * - `POST /translate` fetches a video's transcript and translates it
 *
 * Failures are `{"error": ...}` bodies: 400 for unusable input, 404 when the
 * transcript cannot be obtained, 500 otherwise.
 */

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::app_controller::Controller;
use crate::errors::AppError;

/// Body of `/fetch_transcript`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchTranscriptRequest {
    /// YouTube URL or bare video id
    pub video_url: String,
}

/// Response of `/fetch_transcript`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchTranscriptResponse {
    pub video_id: String,
    pub transcript: String,
    pub source_lang: String,
    pub suggested_terms: Vec<String>,
}

/// Body of `/translate_transcript`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateTranscriptRequest {
    /// Text to translate
    #[serde(default)]
    pub transcript: String,

    /// Source language, "auto" when omitted
    #[serde(default = "default_source_lang")]
    pub source_lang: String,

    /// Target language, English when omitted
    #[serde(default = "default_transcript_target_lang")]
    pub target_lang: String,

    /// Terms to keep untranslated
    #[serde(default)]
    pub preserve_terms: Vec<String>,
}

/// Response of `/translate_transcript`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslateTranscriptResponse {
    pub translated: String,
    pub processing_time: f64,
    pub chunks: usize,
}

/// Body of `/translate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateVideoRequest {
    /// YouTube URL or bare video id
    pub video_url: String,

    /// Target language, Spanish when omitted
    #[serde(default = "default_video_target_lang")]
    pub target_lang: String,

    /// Terms to keep untranslated
    #[serde(default)]
    pub preserve_terms: Vec<String>,
}

/// Response of `/translate`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslateVideoResponse {
    pub original: String,
    pub translated: String,
    pub status: String,
    pub processing_time: f64,
    pub chunks: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

fn default_source_lang() -> String {
    "auto".to_string()
}

fn default_transcript_target_lang() -> String {
    "en".to_string()
}

fn default_video_target_lang() -> String {
    "es".to_string()
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map an application error onto a status code and error body
fn api_error(error: AppError) -> ApiError {
    let (status, message) = match &error {
        AppError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message.clone()),
        AppError::Transcript(_) => (StatusCode::NOT_FOUND, "Transcript not available".to_string()),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()),
    };
    warn!("Request failed ({}): {}", status, error);
    (status, Json(ErrorResponse { error: message }))
}

/// Build the API router around a shared controller
pub fn router(controller: Arc<Controller>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/fetch_transcript", post(fetch_transcript))
        .route("/translate_transcript", post(translate_transcript))
        .route("/translate", post(translate_video))
        .layer(cors)
        .with_state(controller)
}

/// Bind the configured address and serve until the process stops
pub async fn serve(controller: Arc<Controller>) -> anyhow::Result<()> {
    let addr = format!(
        "{}:{}",
        controller.config().server.host,
        controller.config().server.port
    );

    controller.check_translation_endpoint().await;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind to {}", addr))?;
    info!("Transcript API listening on http://{}", addr);

    axum::serve(listener, router(controller))
        .await
        .context("Server error")?;

    Ok(())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn fetch_transcript(
    State(controller): State<Arc<Controller>>,
    Json(request): Json<FetchTranscriptRequest>,
) -> Result<Json<FetchTranscriptResponse>, ApiError> {
    let fetched = controller
        .fetch_transcript(&request.video_url)
        .await
        .map_err(api_error)?;

    Ok(Json(FetchTranscriptResponse {
        video_id: fetched.video_id,
        transcript: fetched.transcript,
        source_lang: fetched.source_lang,
        suggested_terms: fetched.suggested_terms,
    }))
}

async fn translate_transcript(
    State(controller): State<Arc<Controller>>,
    Json(request): Json<TranslateTranscriptRequest>,
) -> Result<Json<TranslateTranscriptResponse>, ApiError> {
    let outcome = controller
        .translate_transcript(
            &request.transcript,
            &request.source_lang,
            &request.target_lang,
            &request.preserve_terms,
        )
        .await
        .map_err(api_error)?;

    Ok(Json(TranslateTranscriptResponse {
        translated: outcome.translated,
        processing_time: outcome.processing_time,
        chunks: outcome.chunks,
    }))
}

async fn translate_video(
    State(controller): State<Arc<Controller>>,
    Json(request): Json<TranslateVideoRequest>,
) -> Result<Json<TranslateVideoResponse>, ApiError> {
    let result = controller
        .translate_video(&request.video_url, &request.target_lang, &request.preserve_terms)
        .await
        .map_err(api_error)?;

    Ok(Json(TranslateVideoResponse {
        original: result.original,
        translated: result.outcome.translated,
        status: "success".to_string(),
        processing_time: result.outcome.processing_time,
        chunks: result.outcome.chunks,
    }))
}
