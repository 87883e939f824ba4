//! Board member model.

use alwc_core::types::BoardMemberId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BoardMember {
    pub id: BoardMemberId,
    pub name: String,
    /// Position on the board, e.g. "Treasurer".
    pub title: String,
    pub image_url: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBoardMember {
    pub name: String,
    pub title: String,
    pub image_url: Option<String>,
    pub display_order: i32,
}

/// Partial update; `image_url: Some(None)` clears the portrait.
#[derive(Debug, Clone, Default)]
pub struct BoardMemberChanges {
    pub name: Option<String>,
    pub title: Option<String>,
    pub image_url: Option<Option<String>>,
    pub display_order: Option<i32>,
}

impl BoardMemberChanges {
    pub fn apply_to(&self, member: &BoardMember) -> BoardMember {
        let mut next = member.clone();
        if let Some(name) = &self.name {
            next.name = name.clone();
        }
        if let Some(title) = &self.title {
            next.title = title.clone();
        }
        if let Some(image_url) = &self.image_url {
            next.image_url = image_url.clone();
        }
        if let Some(order) = self.display_order {
            next.display_order = order;
        }
        next
    }
}
