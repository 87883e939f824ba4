//! Admin user management handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use alwc_core::types::{MessageResponse, UserId};
use alwc_entity::user::User;
use alwc_service::user::{CreateUserInput, ProfileUpdate};

use crate::dto::request::ChangeRoleRequest;
use crate::dto::response::UsersResponse;
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, AuthUser, CurrentUser, PrimaryAdmin};
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: PrimaryAdmin,
) -> ApiResult<Json<UsersResponse>> {
    let users = state.admin_users.list().await?;
    Ok(Json(UsersResponse { users }))
}

/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    admin: PrimaryAdmin,
    ApiJson(input): ApiJson<CreateUserInput>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.admin_users.create(&admin, input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    admin: PrimaryAdmin,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<ProfileUpdate>,
) -> ApiResult<Json<User>> {
    let user = state.admin_users.update(&admin, UserId(id), input).await?;
    Ok(Json(user))
}

/// PUT /api/admin/users/{id}/role
///
/// Elevation is checked by the service against the stored role.
pub async fn change_role(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<ChangeRoleRequest>,
) -> ApiResult<Json<User>> {
    let user = state
        .admin_users
        .set_role(&caller, UserId(id), req.role.as_deref())
        .await?;
    Ok(Json(user))
}

/// DELETE /api/admin/users/{id}
///
/// The role is checked by the service after the self-delete check, so a
/// plain user deleting themselves hears about that first.
pub async fn delete_user(
    State(state): State<AppState>,
    caller: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    state.admin_users.delete(&caller, UserId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/request-superuser
pub async fn request_superuser(
    State(state): State<AppState>,
    caller: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    state.admin_users.request_superuser(&caller).await?;
    Ok(Json(MessageResponse::new(
        "Superuser access request sent to admin",
    )))
}
