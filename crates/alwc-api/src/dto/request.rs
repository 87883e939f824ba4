//! Request DTOs for endpoints whose bodies are not service inputs.

use serde::Deserialize;
use serde_json::Value;

use alwc_core::error::AppError;
use alwc_core::types::ListWindow;
use alwc_service::event::OrderUpdate;

/// Login request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeRoleRequest {
    #[serde(default)]
    pub role: Option<String>,
}

/// `PUT /api/content/:slug` body. Validated by the content service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentRequest {
    #[serde(default)]
    pub data: Option<Value>,
}

/// `{updates: [{id, displayOrder}]}`. Kept loose so a malformed list gets
/// the endpoint's own message instead of a deserializer error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReorderRequest {
    #[serde(default)]
    pub updates: Option<Value>,
}

impl ReorderRequest {
    /// Entries lacking a numeric `id` or `displayOrder` are skipped.
    pub fn into_updates(self) -> Result<Vec<OrderUpdate>, AppError> {
        let Some(Value::Array(items)) = self.updates else {
            return Err(AppError::validation("Updates array is required"));
        };
        Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<OrderUpdate>(item).ok())
            .collect())
    }
}

/// `{imageIds: [..]}` in the desired gallery order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReorderRequest {
    #[serde(default)]
    pub image_ids: Option<Value>,
}

impl ImageReorderRequest {
    /// Numeric ids and numeric strings are accepted; anything else is
    /// dropped.
    pub fn into_ids(self) -> Result<Vec<i64>, AppError> {
        let Some(Value::Array(items)) = self.image_ids else {
            return Err(AppError::validation("imageIds must be an array"));
        };
        Ok(items
            .iter()
            .filter_map(|item| match item {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
            .collect())
    }
}

/// `?limit&offset` for the audit log. Unparseable values fall back to
/// the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditLogQuery {
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub offset: Option<String>,
}

impl AuditLogQuery {
    pub fn window(&self) -> ListWindow {
        let parse = |v: &Option<String>| v.as_deref().and_then(|s| s.trim().parse::<i64>().ok());
        ListWindow::new(parse(&self.limit), parse(&self.offset))
    }
}
