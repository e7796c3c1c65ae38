use crate::error::{ErrorResponse, HttpAppError, ValidatedJson, ValidatedQuery};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use validator::Validate;
use vani_core::models::{validate_no_nul, CreatedResponse, Video, VideoRecord};
use vani_core::AppError;
use vani_db::{normalize, VideoFilter, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};

use super::parse_document_id;

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListVideosQuery {
    /// Search by title, tag, or scripture name
    #[validate(custom(function = "validate_no_nul"))]
    pub q: Option<String>,
    /// Filter by platform
    #[validate(custom(function = "validate_no_nul"))]
    pub platform: Option<String>,
    /// Filter by scripture name
    #[validate(custom(function = "validate_no_nul"))]
    pub scripture: Option<String>,
    #[serde(default = "default_limit")]
    #[validate(range(min = MIN_LIMIT, max = MAX_LIMIT))]
    #[param(minimum = 1, maximum = 200, default = 50)]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[utoipa::path(
    post,
    path = "/api/videos",
    tag = "videos",
    request_body = Video,
    responses(
        (status = 201, description = "Video created", body = CreatedResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, video), fields(platform = %video.platform, operation = "create_video"))]
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    ValidatedJson(video): ValidatedJson<Video>,
) -> Result<impl IntoResponse, HttpAppError> {
    let id = state.db.video_repository.create_video(&video).await?;

    tracing::info!(video_id = %id, "Video created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse { id: id.to_string() }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/videos",
    tag = "videos",
    params(ListVideosQuery),
    responses(
        (status = 200, description = "Matching videos in natural order", body = Vec<VideoRecord>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, params),
    fields(
        q = ?params.q,
        platform = ?params.platform,
        scripture = ?params.scripture,
        limit = params.limit,
        operation = "list_videos"
    )
)]
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(params): ValidatedQuery<ListVideosQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let filter = VideoFilter::new(params.q, params.platform, params.scripture);

    let videos = state
        .db
        .video_repository
        .list_videos(&filter, params.limit)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to list videos");
            HttpAppError::from(e)
        })?;

    let records: Vec<_> = videos.into_iter().map(normalize).collect();
    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/api/videos/{id}",
    tag = "videos",
    params(
        ("id" = String, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Video found", body = VideoRecord),
        (status = 400, description = "Malformed video ID", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(video_id = %id, operation = "get_video"))]
pub async fn get_video(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let id = parse_document_id(&id)?;

    let video = state
        .db
        .video_repository
        .get_video(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

    Ok(Json(normalize(video)))
}
