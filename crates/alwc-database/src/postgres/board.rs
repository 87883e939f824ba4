use async_trait::async_trait;

use alwc_core::result::AppResult;
use alwc_core::types::BoardMemberId;
use alwc_entity::board::{BoardMember, BoardMemberChanges, NewBoardMember};

use super::{PgTx, db_error};
use crate::repositories::BoardMemberRepository;

const MEMBER_COLUMNS: &str = "id, name, title, image_url, display_order, created_at, updated_at";

#[async_trait]
impl BoardMemberRepository for PgTx {
    async fn list_board_members(&mut self) -> AppResult<Vec<BoardMember>> {
        sqlx::query_as::<_, BoardMember>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM board_members \
             ORDER BY display_order ASC, created_at ASC, id ASC"
        ))
        .fetch_all(&mut *self.tx)
        .await
        .map_err(db_error("Failed to list board members"))
    }

    async fn find_board_member(&mut self, id: BoardMemberId) -> AppResult<Option<BoardMember>> {
        sqlx::query_as::<_, BoardMember>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM board_members WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("Failed to find board member"))
    }

    async fn insert_board_member(&mut self, member: NewBoardMember) -> AppResult<BoardMember> {
        sqlx::query_as::<_, BoardMember>(&format!(
            "INSERT INTO board_members (name, title, image_url, display_order) \
             VALUES ($1, $2, $3, $4) RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(&member.name)
        .bind(&member.title)
        .bind(&member.image_url)
        .bind(member.display_order)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_error("Failed to create board member"))
    }

    async fn update_board_member(
        &mut self,
        id: BoardMemberId,
        changes: BoardMemberChanges,
    ) -> AppResult<Option<BoardMember>> {
        let current = sqlx::query_as::<_, BoardMember>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM board_members WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("Failed to load board member for update"))?;

        let Some(current) = current else {
            return Ok(None);
        };
        let next = changes.apply_to(&current);

        sqlx::query_as::<_, BoardMember>(&format!(
            "UPDATE board_members SET \
                 name = $2, title = $3, image_url = $4, display_order = $5, updated_at = NOW() \
             WHERE id = $1 RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(id)
        .bind(&next.name)
        .bind(&next.title)
        .bind(&next.image_url)
        .bind(next.display_order)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("Failed to update board member"))
    }

    async fn set_board_member_order(
        &mut self,
        id: BoardMemberId,
        display_order: i32,
    ) -> AppResult<bool> {
        sqlx::query("UPDATE board_members SET display_order = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(display_order)
            .execute(&mut *self.tx)
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(db_error("Failed to reorder board member"))
    }

    async fn delete_board_member(&mut self, id: BoardMemberId) -> AppResult<bool> {
        sqlx::query("DELETE FROM board_members WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(db_error("Failed to delete board member"))
    }
}
