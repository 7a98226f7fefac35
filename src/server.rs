//! HTTP surface for the story service.

use crate::error::StoryError;
use crate::scene::{PipelineResult, Scene, SceneBreakdown, StoryRequest};
use crate::story::{FileArtifactStore, StoryService, NOT_INITIALIZED};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    service: StoryService,
    artifacts: FileArtifactStore,
}

impl AppState {
    pub fn new(service: StoryService, artifacts: FileArtifactStore) -> Self {
        Self { service, artifacts }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub scenes: Vec<Scene>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageResponse {
    pub message: String,
    pub scenes_count: usize,
    pub images_saved: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub story_generator: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/generate-story", post(generate_story))
        .route("/generate-scenes", post(generate_scenes))
        .route("/generate-images", post(generate_images))
        .route("/images/:filename", get(get_image))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "message": "Story Generator API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "generate_story": "/generate-story",
            "generate_scenes": "/generate-scenes",
            "generate_images": "/generate-images",
            "images": "/images/{filename}",
            "health": "/health"
        }
    }))
}

async fn generate_story(
    State(state): State<AppState>,
    payload: Result<Json<StoryRequest>, JsonRejection>,
) -> Result<Json<PipelineResult>, ApiError> {
    let Json(request) = payload.map_err(map_rejection)?;
    info!("Generating story: {}", request.story_prompt);
    state
        .service
        .generate_story(&request)
        .await
        .map(Json)
        .map_err(|e| map_error("Error generating story", e))
}

async fn generate_scenes(
    State(state): State<AppState>,
    payload: Result<Json<StoryRequest>, JsonRejection>,
) -> Result<Json<SceneBreakdown>, ApiError> {
    let Json(request) = payload.map_err(map_rejection)?;
    state
        .service
        .generate_scenes(&request)
        .await
        .map(Json)
        .map_err(|e| map_error("Error generating scenes", e))
}

async fn generate_images(
    State(state): State<AppState>,
    payload: Result<Json<ImageGenerationRequest>, JsonRejection>,
) -> Result<Json<ImageResponse>, ApiError> {
    let Json(request) = payload.map_err(map_rejection)?;
    info!("Generating images for {} scenes", request.scenes.len());
    let scenes_count = state
        .service
        .describe_scenes(&request.scenes)
        .await
        .map_err(|e| map_error("Error generating images", e))?;

    Ok(Json(ImageResponse {
        message: "Images generated successfully".to_string(),
        scenes_count,
        images_saved: true,
    }))
}

async fn get_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = state.artifacts.read(&filename).await.map_err(|e| match e {
        StoryError::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Image not found"),
        other => map_error("Error reading image", other),
    })?;

    Ok(([(header::CONTENT_TYPE, content_type_for(&filename))], bytes))
}

async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    let story_generator = if state.service.is_initialized() {
        "initialized"
    } else {
        "not_initialized"
    };

    Json(HealthStatus {
        status: "healthy".to_string(),
        story_generator: story_generator.to_string(),
    })
}

fn map_error(context: &str, err: StoryError) -> ApiError {
    error!("{}: {}", context, err);
    let detail = match &err {
        StoryError::Configuration(_) => NOT_INITIALIZED.to_string(),
        _ => format!("{}: {}", context, err),
    };
    error_response(err.status_code(), detail)
}

fn map_rejection(rejection: JsonRejection) -> ApiError {
    error_response(rejection.status(), rejection.body_text())
}

fn error_response(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            detail: detail.into(),
        }),
    )
}

fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit_once('.').map(|(_, ext)| ext) {
        Some("txt") => "text/plain; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
