//! Site content documents addressed by slug.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use alwc_entity::content::SiteContent;

use crate::dto::request::ContentRequest;
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, AuthUser};
use crate::state::AppState;

/// GET /api/content/{slug}
///
/// A slug with no document yet answers `{slug, data: null}`.
pub async fn get_content(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> ApiResult<Response> {
    let response = match state.content.get(&slug).await? {
        Some(content) => Json(content).into_response(),
        None => Json(json!({ "slug": slug, "data": null })).into_response(),
    };
    Ok(response)
}

/// PUT /api/content/{slug}
pub async fn put_content(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(slug): ApiPath<String>,
    ApiJson(req): ApiJson<ContentRequest>,
) -> ApiResult<Json<SiteContent>> {
    let content = state.content.put(&auth, &slug, req.data).await?;
    Ok(Json(content))
}
