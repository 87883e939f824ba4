//! User persistence.

use async_trait::async_trait;

use alwc_core::result::AppResult;
use alwc_core::types::UserId;
use alwc_entity::user::{NewUser, User, UserChanges, UserRole};

#[async_trait]
pub trait UserRepository: Send {
    async fn find_user(&mut self, id: UserId) -> AppResult<Option<User>>;

    /// Case-insensitive lookup on the trimmed address.
    async fn find_user_by_email(&mut self, email: &str) -> AppResult<Option<User>>;

    /// All users, oldest first.
    async fn list_users(&mut self) -> AppResult<Vec<User>>;

    /// Fails with `Conflict` when the email is taken.
    async fn insert_user(&mut self, user: NewUser) -> AppResult<User>;

    /// Returns `None` when the user does not exist; `Conflict` on a taken
    /// email.
    async fn update_user(&mut self, id: UserId, changes: UserChanges) -> AppResult<Option<User>>;

    async fn set_user_role(&mut self, id: UserId, role: UserRole) -> AppResult<Option<User>>;

    /// Returns whether a row was removed.
    async fn delete_user(&mut self, id: UserId) -> AppResult<bool>;

    /// Create or refresh the bootstrap admin: role forced to `admin`, name
    /// and password replaced.
    async fn upsert_admin(&mut self, email: &str, name: &str, password_hash: &str)
    -> AppResult<User>;
}
