//! Public contact form.

use axum::Json;
use axum::extract::State;

use alwc_core::types::MessageResponse;
use alwc_service::contact::ContactInput;

use crate::error::ApiResult;
use crate::extractors::ApiJson;
use crate::state::AppState;

/// POST /api/contact
pub async fn submit(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ContactInput>,
) -> ApiResult<Json<MessageResponse>> {
    state.contact.submit(input).await?;
    Ok(Json(MessageResponse::new("Message sent successfully")))
}
