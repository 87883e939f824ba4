//! Audit log listing.

use axum::Json;
use axum::extract::{Query, State};

use crate::dto::request::AuditLogQuery;
use crate::dto::response::AuditLogsResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/audit-logs?limit&offset
pub async fn list_audit_logs(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<AuditLogQuery>,
) -> ApiResult<Json<AuditLogsResponse>> {
    let logs = state.audit.list(query.window()).await?;
    Ok(Json(AuditLogsResponse { logs }))
}
