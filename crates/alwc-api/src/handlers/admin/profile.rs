//! The caller's own account.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;

use alwc_entity::user::User;
use alwc_service::user::ProfileUpdate;

use crate::error::ApiResult;
use crate::extractors::{ApiJson, AuthUser};
use crate::handlers::auth::session_cookie;
use crate::state::AppState;

/// PUT /api/admin/me
///
/// A fresh session cookie is issued so the token's name and email match
/// the saved profile.
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    jar: CookieJar,
    ApiJson(input): ApiJson<ProfileUpdate>,
) -> ApiResult<(CookieJar, Json<User>)> {
    let user = state.profiles.update_own(&auth, input).await?;
    let session = state.sessions.issue(user)?;
    let jar = jar.add(session_cookie(&state, &session));
    Ok((jar, Json(session.user)))
}
