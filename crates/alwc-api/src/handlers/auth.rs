//! Auth handlers: login, logout, me, and the password reset pair.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use alwc_auth::IssuedSession;
use alwc_core::types::MessageResponse;
use alwc_service::auth::reset::FORGOT_PASSWORD_MESSAGE;

use crate::dto::request::{ForgotPasswordRequest, LoginRequest, ResetPasswordRequest};
use crate::dto::response::{IdentityResponse, SessionResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// HTTP-only session cookie living exactly as long as the token.
pub(crate) fn session_cookie(state: &AppState, session: &IssuedSession) -> Cookie<'static> {
    let max_age = time::Duration::seconds(state.sessions.ttl().num_seconds());
    Cookie::build((state.config.auth.cookie_name.clone(), session.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.server.is_production())
        .max_age(max_age)
        .build()
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<SessionResponse>)> {
    let session = state
        .sessions
        .authenticate(
            req.email.as_deref().unwrap_or_default(),
            req.password.as_deref().unwrap_or_default(),
        )
        .await?;

    let user = IdentityResponse::from_user(&session.user, &state.guard);
    let jar = jar.add(session_cookie(&state, &session));
    Ok((jar, Json(SessionResponse { user })))
}

/// POST /api/auth/logout
///
/// Tokens are not revoked server-side; this only clears the cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    // `CookieJar::remove` only emits a removal for cookies sent with the
    // request; bearer-only callers still get one.
    let mut expired = Cookie::build((state.config.auth.cookie_name.clone(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.server.is_production())
        .build();
    expired.make_removal();
    (jar.add(expired), StatusCode::NO_CONTENT)
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        user: IdentityResponse::from_context(&auth, &state.guard),
    })
}

/// POST /api/auth/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ForgotPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .resets
        .request_reset(req.email.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(MessageResponse::new(FORGOT_PASSWORD_MESSAGE)))
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ResetPasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .resets
        .redeem(
            req.token.as_deref().unwrap_or_default(),
            req.new_password.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(MessageResponse::new(
        "Password has been reset successfully",
    )))
}
