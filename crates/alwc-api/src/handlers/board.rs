//! Board member listing and CRUD.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use alwc_core::types::{BoardMemberId, MessageResponse};
use alwc_entity::board::BoardMember;
use alwc_service::board::{BoardMemberInput, BoardMemberUpdate};

use crate::dto::request::ReorderRequest;
use crate::dto::response::BoardMembersResponse;
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, AuthUser};
use crate::state::AppState;

/// GET /api/board-members
pub async fn list_members(State(state): State<AppState>) -> ApiResult<Json<BoardMembersResponse>> {
    let board_members = state.board.list().await?;
    Ok(Json(BoardMembersResponse { board_members }))
}

/// POST /api/board-members
pub async fn create_member(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(input): ApiJson<BoardMemberInput>,
) -> ApiResult<(StatusCode, Json<BoardMember>)> {
    let member = state.board.create(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// PUT /api/board-members/reorder
pub async fn reorder_members(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<ReorderRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state.board.reorder(&auth, req.into_updates()?).await?;
    Ok(Json(MessageResponse::new(
        "Board members reordered successfully",
    )))
}

/// PUT /api/board-members/{id}
pub async fn update_member(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<BoardMemberUpdate>,
) -> ApiResult<Json<BoardMember>> {
    let member = state.board.update(&auth, BoardMemberId(id), update).await?;
    Ok(Json(member))
}

/// DELETE /api/board-members/{id}
pub async fn delete_member(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    state.board.delete(&auth, BoardMemberId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
