//! Event listing and CRUD.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use alwc_core::types::{EventId, MessageResponse};
use alwc_entity::event::Event;
use alwc_service::event::{CreateEventInput, EventUpdate};

use crate::dto::request::ReorderRequest;
use crate::dto::response::EventsResponse;
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, AuthUser};
use crate::state::AppState;

/// GET /api/events (published only)
pub async fn list_published(State(state): State<AppState>) -> ApiResult<Json<EventsResponse>> {
    let events = state.events.list(true).await?;
    Ok(Json(EventsResponse { events }))
}

/// GET /api/admin/events
pub async fn list_all(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<EventsResponse>> {
    let events = state.events.list(false).await?;
    Ok(Json(EventsResponse { events }))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(input): ApiJson<CreateEventInput>,
) -> ApiResult<(StatusCode, Json<Event>)> {
    let event = state.events.create(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/events/reorder
pub async fn reorder_events(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<ReorderRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state.events.reorder(&auth, req.into_updates()?).await?;
    Ok(Json(MessageResponse::new("Events reordered successfully")))
}

/// PUT /api/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<EventUpdate>,
) -> ApiResult<Json<Event>> {
    let event = state.events.update(&auth, EventId(id), update).await?;
    Ok(Json(event))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    state.events.delete(&auth, EventId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
