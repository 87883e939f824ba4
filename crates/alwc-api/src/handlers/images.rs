//! Event galleries and board member portraits.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;

use alwc_core::types::{EventId, EventImageId, MessageResponse};

use crate::dto::request::ImageReorderRequest;
use crate::dto::response::{ImageUrlResponse, ImagesResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, AuthUser, collect_files};
use crate::state::AppState;

/// POST /api/events/{id}/images (multipart field `images`)
pub async fn upload_event_images(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<ImagesResponse>)> {
    let files = collect_files(multipart, "images").await?;
    let images = state.gallery.upload(&auth, EventId(id), files).await?;
    Ok((StatusCode::CREATED, Json(ImagesResponse { images })))
}

/// GET /api/events/{id}/images
pub async fn list_event_images(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<ImagesResponse>> {
    let images = state.gallery.list(EventId(id)).await?;
    Ok(Json(ImagesResponse { images }))
}

/// DELETE /api/events/{id}/images/{image_id}
pub async fn delete_event_image(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath((event_id, image_id)): ApiPath<(i64, i64)>,
) -> ApiResult<StatusCode> {
    state
        .gallery
        .delete(&auth, EventId(event_id), EventImageId(image_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/events/{id}/images/reorder
pub async fn reorder_event_images(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<ImageReorderRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .gallery
        .reorder(&auth, EventId(id), req.into_ids()?)
        .await?;
    Ok(Json(MessageResponse::new("Images reordered successfully")))
}

/// POST /api/board-member-image (multipart field `image`)
pub async fn upload_board_member_image(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<ImageUrlResponse>)> {
    let file = collect_files(multipart, "image").await?.into_iter().next();
    let image_url = state.board.upload_portrait(&auth, file).await?;
    Ok((StatusCode::CREATED, Json(ImageUrlResponse { image_url })))
}
