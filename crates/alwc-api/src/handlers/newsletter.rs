//! Newsletter subscribers and sends. Elevated users only.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use alwc_core::types::SubscriberId;
use alwc_entity::newsletter::Subscriber;
use alwc_service::newsletter::{SendNewsletterInput, Subscribed, SubscriberInput, SubscriberUpdate};

use crate::dto::response::NewsletterSentResponse;
use crate::error::ApiResult;
use crate::extractors::{ApiJson, ApiPath, ElevatedUser};
use crate::state::AppState;

/// GET /api/newsletter/subscribers
pub async fn list_subscribers(
    State(state): State<AppState>,
    _admin: ElevatedUser,
) -> ApiResult<Json<Vec<Subscriber>>> {
    Ok(Json(state.newsletter.list().await?))
}

/// POST /api/newsletter/subscribers
///
/// 201 for a new address, 200 when an unsubscribed one is reactivated.
pub async fn add_subscriber(
    State(state): State<AppState>,
    admin: ElevatedUser,
    ApiJson(input): ApiJson<SubscriberInput>,
) -> ApiResult<(StatusCode, Json<Subscriber>)> {
    let response = match state.newsletter.subscribe(&admin, input).await? {
        Subscribed::Created(subscriber) => (StatusCode::CREATED, Json(subscriber)),
        Subscribed::Reactivated(subscriber) => (StatusCode::OK, Json(subscriber)),
    };
    Ok(response)
}

/// PUT /api/newsletter/subscribers/{id}
pub async fn update_subscriber(
    State(state): State<AppState>,
    admin: ElevatedUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<SubscriberUpdate>,
) -> ApiResult<Json<Subscriber>> {
    let subscriber = state
        .newsletter
        .update(&admin, SubscriberId(id), update)
        .await?;
    Ok(Json(subscriber))
}

/// DELETE /api/newsletter/subscribers/{id}
pub async fn delete_subscriber(
    State(state): State<AppState>,
    admin: ElevatedUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    state.newsletter.delete(&admin, SubscriberId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/newsletter/send
pub async fn send_newsletter(
    State(state): State<AppState>,
    admin: ElevatedUser,
    ApiJson(input): ApiJson<SendNewsletterInput>,
) -> ApiResult<Json<NewsletterSentResponse>> {
    let recipient_count = state.newsletter.send(&admin, input).await?;
    Ok(Json(NewsletterSentResponse {
        message: "Newsletter sent successfully".to_string(),
        recipient_count,
    }))
}

/// GET /api/newsletter/subscribers/export
pub async fn export_subscribers(
    State(state): State<AppState>,
    _admin: ElevatedUser,
) -> ApiResult<impl IntoResponse> {
    let csv = state.newsletter.export_csv().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=newsletter-subscribers.csv",
            ),
        ],
        csv,
    ))
}
