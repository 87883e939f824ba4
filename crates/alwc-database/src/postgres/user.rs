use async_trait::async_trait;

use alwc_core::result::AppResult;
use alwc_core::types::UserId;
use alwc_entity::user::{NewUser, User, UserChanges, UserRole};

use super::{PgTx, db_error, unique_or_db_error};
use crate::repositories::{EMAIL_IN_USE, UserRepository};

const USER_COLUMNS: &str = "id, email, name, password_hash, role, created_at";

#[async_trait]
impl UserRepository for PgTx {
    async fn find_user(&mut self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(db_error("Failed to find user by id"))
    }

    async fn find_user_by_email(&mut self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email.trim())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("Failed to find user by email"))
    }

    async fn list_users(&mut self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&mut *self.tx)
        .await
        .map_err(db_error("Failed to list users"))
    }

    async fn insert_user(&mut self, user: NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, name, password_hash, role) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.role)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(unique_or_db_error("Failed to create user", EMAIL_IN_USE))
    }

    async fn update_user(&mut self, id: UserId, changes: UserChanges) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
                 name = COALESCE($2, name), \
                 email = COALESCE($3, email), \
                 password_hash = COALESCE($4, password_hash) \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.password_hash)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(unique_or_db_error("Failed to update user", EMAIL_IN_USE))
    }

    async fn set_user_role(&mut self, id: UserId, role: UserRole) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET role = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(role)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("Failed to update user role"))
    }

    async fn delete_user(&mut self, id: UserId) -> AppResult<bool> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(db_error("Failed to delete user"))
    }

    async fn upsert_admin(
        &mut self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, name, password_hash, role) VALUES ($1, $2, $3, 'admin') \
             ON CONFLICT ((LOWER(email))) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 password_hash = EXCLUDED.password_hash, \
                 role = 'admin' \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email.trim())
        .bind(name)
        .bind(password_hash)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_error("Failed to upsert admin user"))
    }
}
