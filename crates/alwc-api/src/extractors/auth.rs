//! Guard extractors: pull the session token from the cookie or the
//! `Authorization` header, validate it, and inject the caller's context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use alwc_auth::Claims;
use alwc_core::error::AppError;
use alwc_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Session token from the named cookie, falling back to a Bearer header.
pub fn session_token(parts: &Parts, cookie_name: &str) -> Option<String> {
    let from_cookie = CookieJar::from_headers(&parts.headers)
        .get(cookie_name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty());
    if from_cookie.is_some() {
        return from_cookie;
    }

    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn verified_claims(parts: &Parts, state: &AppState) -> Result<Claims, AppError> {
    let token = session_token(parts, &state.config.auth.cookie_name)
        .ok_or_else(|| AppError::unauthenticated("Authentication required"))?;
    state.sessions.resolve(&token)
}

/// Any signed-in caller. Role and identity come from the token alone.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = verified_claims(parts, state)?;
        Ok(Self(RequestContext::from_claims(&claims)))
    }
}

/// Any signed-in caller, re-read from the store. A deleted account is
/// treated as signed out.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub RequestContext);

impl std::ops::Deref for CurrentUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = verified_claims(parts, state)?;
        let user = state.sessions.current_user(&claims).await?;
        Ok(Self(RequestContext::from_user(&user)))
    }
}

/// An `admin` or `superuser`, with the role re-read from the store so a
/// demotion takes effect before the token expires.
#[derive(Debug, Clone)]
pub struct ElevatedUser(pub RequestContext);

impl std::ops::Deref for ElevatedUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for ElevatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = verified_claims(parts, state)?;
        let user = state.sessions.current_user(&claims).await?;
        state.guard.require_elevated(user.role)?;
        Ok(Self(RequestContext::from_user(&user)))
    }
}

/// The account named by `admin.email`, checked against its current row,
/// which must also hold an elevated role.
#[derive(Debug, Clone)]
pub struct PrimaryAdmin(pub RequestContext);

impl std::ops::Deref for PrimaryAdmin {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for PrimaryAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = verified_claims(parts, state)?;
        let user = state.sessions.current_user(&claims).await?;
        state.guard.require_primary_admin(&user)?;
        Ok(Self(RequestContext::from_user(&user)))
    }
}
