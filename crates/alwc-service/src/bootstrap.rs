//! Startup provisioning of the primary admin account.

use std::sync::Arc;

use tracing::info;

use alwc_auth::password::PasswordHasher;
use alwc_core::config::admin::AdminConfig;
use alwc_core::result::AppResult;
use alwc_database::prelude::*;
use alwc_entity::user::User;

/// Create or refresh the primary admin from configuration. Needs both
/// `admin.email` and `admin.password`; otherwise nothing happens. An
/// existing account is forced back to the `admin` role and its password
/// replaced.
pub async fn ensure_primary_admin(
    store: &Arc<dyn Store>,
    config: &AdminConfig,
) -> AppResult<Option<User>> {
    let email = config.email.as_deref().map(str::trim).filter(|e| !e.is_empty());
    let password = config.password.as_deref().filter(|p| !p.is_empty());
    let (Some(email), Some(password)) = (email, password) else {
        info!("Admin bootstrap skipped: admin.email or admin.password not set");
        return Ok(None);
    };

    let hash = PasswordHasher::new().hash_password(password)?;
    let mut tx = store.begin().await?;
    let user = tx.upsert_admin(email, &config.name, &hash).await?;
    tx.commit().await?;

    info!(user_id = %user.id, email = %user.email, "Primary admin ready");
    Ok(Some(user))
}
