//! Board member persistence.

use async_trait::async_trait;

use alwc_core::result::AppResult;
use alwc_core::types::BoardMemberId;
use alwc_entity::board::{BoardMember, BoardMemberChanges, NewBoardMember};

#[async_trait]
pub trait BoardMemberRepository: Send {
    /// Ordered by `display_order`, then creation time.
    async fn list_board_members(&mut self) -> AppResult<Vec<BoardMember>>;

    async fn find_board_member(&mut self, id: BoardMemberId) -> AppResult<Option<BoardMember>>;

    async fn insert_board_member(&mut self, member: NewBoardMember) -> AppResult<BoardMember>;

    async fn update_board_member(
        &mut self,
        id: BoardMemberId,
        changes: BoardMemberChanges,
    ) -> AppResult<Option<BoardMember>>;

    async fn set_board_member_order(&mut self, id: BoardMemberId, display_order: i32)
    -> AppResult<bool>;

    async fn delete_board_member(&mut self, id: BoardMemberId) -> AppResult<bool>;
}
