//! Board member CRUD, ordering, and portrait uploads.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use alwc_core::error::AppError;
use alwc_core::result::AppResult;
use alwc_core::traits::ObjectStore;
use alwc_core::types::BoardMemberId;
use alwc_database::prelude::*;
use alwc_entity::audit::{AuditAction, EntityType, NewAuditEntry};
use alwc_entity::board::{BoardMember, BoardMemberChanges, NewBoardMember};
use alwc_storage::keys::ObjectKey;

use crate::context::RequestContext;
use crate::event::OrderUpdate;
use crate::patch::double_option;
use crate::upload::{UploadLimits, UploadedFile};
use crate::validation::present;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMemberInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMemberUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
    #[serde(default)]
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct BoardService {
    store: Arc<dyn Store>,
    objects: Arc<dyn ObjectStore>,
    limits: UploadLimits,
}

impl BoardService {
    pub fn new(store: Arc<dyn Store>, objects: Arc<dyn ObjectStore>, limits: UploadLimits) -> Self {
        Self {
            store,
            objects,
            limits,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<BoardMember>> {
        let mut tx = self.store.begin().await?;
        tx.list_board_members().await
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: BoardMemberInput,
    ) -> AppResult<BoardMember> {
        let (Some(name), Some(title)) = (
            present(input.name.as_deref()),
            present(input.title.as_deref()),
        ) else {
            return Err(AppError::validation("Name and title are required"));
        };

        let mut tx = self.store.begin().await?;
        let member = tx
            .insert_board_member(NewBoardMember {
                name: name.to_string(),
                title: title.to_string(),
                image_url: present(input.image_url.as_deref()).map(str::to_string),
                display_order: input.display_order.unwrap_or(0),
            })
            .await?;
        tx.insert_audit(
            NewAuditEntry::new(ctx.user_id, AuditAction::Create, EntityType::BoardMember)
                .entity(member.id)
                .new_data(serde_json::to_value(&member)?),
        )
        .await?;
        tx.commit().await?;

        info!(user_id = %ctx.user_id, member_id = %member.id, "Board member created");
        Ok(member)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: BoardMemberId,
        update: BoardMemberUpdate,
    ) -> AppResult<BoardMember> {
        let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());
        if blank(&update.name) || blank(&update.title) {
            return Err(AppError::validation("Name and title are required"));
        }
        let changes = BoardMemberChanges {
            name: update.name.map(|s| s.trim().to_string()),
            title: update.title.map(|s| s.trim().to_string()),
            image_url: update.image_url,
            display_order: update.display_order,
        };

        let mut tx = self.store.begin().await?;
        let before = tx
            .find_board_member(id)
            .await?
            .ok_or_else(|| AppError::not_found("Board member not found"))?;
        let after = tx
            .update_board_member(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("Board member not found"))?;
        tx.insert_audit(
            NewAuditEntry::new(ctx.user_id, AuditAction::Update, EntityType::BoardMember)
                .entity(id)
                .previous(serde_json::to_value(&before)?)
                .new_data(serde_json::to_value(&after)?),
        )
        .await?;
        tx.commit().await?;

        info!(user_id = %ctx.user_id, member_id = %id, "Board member updated");
        Ok(after)
    }

    /// Delete a member. A portrait held in our object store goes too.
    pub async fn delete(&self, ctx: &RequestContext, id: BoardMemberId) -> AppResult<()> {
        let mut tx = self.store.begin().await?;
        let member = tx
            .find_board_member(id)
            .await?
            .ok_or_else(|| AppError::not_found("Board member not found"))?;
        tx.delete_board_member(id).await?;
        tx.insert_audit(
            NewAuditEntry::new(ctx.user_id, AuditAction::Delete, EntityType::BoardMember)
                .entity(id)
                .previous(serde_json::to_value(&member)?),
        )
        .await?;
        tx.commit().await?;

        if let Some(key) = member
            .image_url
            .as_deref()
            .and_then(|url| self.objects.key_for_url(url))
        {
            if let Err(e) = self.objects.delete(&key).await {
                warn!(member_id = %id, key = %key, error = %e, "Failed to delete portrait");
            }
        }

        info!(user_id = %ctx.user_id, member_id = %id, "Board member deleted");
        Ok(())
    }

    pub async fn reorder(&self, ctx: &RequestContext, updates: Vec<OrderUpdate>) -> AppResult<()> {
        if updates.is_empty() {
            return Err(AppError::validation("Updates array is required"));
        }

        let mut tx = self.store.begin().await?;
        for update in &updates {
            tx.set_board_member_order(BoardMemberId(update.id), update.display_order)
                .await?;
        }
        tx.insert_audit(
            NewAuditEntry::new(ctx.user_id, AuditAction::Reorder, EntityType::BoardMember)
                .new_data(serde_json::json!({ "updates": updates })),
        )
        .await?;
        tx.commit().await?;

        info!(user_id = %ctx.user_id, update_count = updates.len(), "Board members reordered");
        Ok(())
    }

    /// Store a portrait and return its public URL. The member row is
    /// updated separately by the client.
    pub async fn upload_portrait(
        &self,
        ctx: &RequestContext,
        file: Option<UploadedFile>,
    ) -> AppResult<String> {
        let file = file.ok_or_else(|| AppError::validation("No file uploaded"))?;
        self.limits.check(std::slice::from_ref(&file))?;

        let key = ObjectKey::board_member_image(file.file_name.as_deref(), &file.content_type)
            .into_string();
        let url = self.objects.put(&key, file.data, &file.content_type).await?;

        let audit = async {
            let mut tx = self.store.begin().await?;
            tx.insert_audit(
                NewAuditEntry::new(ctx.user_id, AuditAction::Upload, EntityType::BoardMemberImage)
                    .new_data(serde_json::json!({ "imageUrl": url, "key": key })),
            )
            .await?;
            tx.commit().await
        };
        if let Err(e) = audit.await {
            if let Err(cleanup) = self.objects.delete(&key).await {
                warn!(key = %key, error = %cleanup, "Failed to remove orphaned portrait");
            }
            return Err(e);
        }

        info!(user_id = %ctx.user_id, key = %key, "Board member portrait uploaded");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alwc_core::types::UserId;
    use alwc_database::MemoryStore;
    use alwc_entity::user::UserRole;
    use alwc_storage::providers::local::LocalObjectStore;
    use chrono::Utc;

    fn ctx() -> RequestContext {
        RequestContext {
            user_id: UserId(1),
            email: "editor@example.org".to_string(),
            name: "Editor".to_string(),
            role: UserRole::User,
            request_time: Utc::now(),
        }
    }

    async fn service(dir: &tempfile::TempDir) -> BoardService {
        let objects: Arc<dyn ObjectStore> = Arc::new(
            LocalObjectStore::new(dir.path().to_str().unwrap(), "/uploads")
                .await
                .unwrap(),
        );
        BoardService::new(Arc::new(MemoryStore::new()), objects, UploadLimits::default())
    }

    #[tokio::test]
    async fn test_crud_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let board = service(&dir).await;

        let err = board
            .create(&ctx(), BoardMemberInput::default())
            .await
            .unwrap_err();
        assert_eq!(err.message, "Name and title are required");

        let a = board
            .create(
                &ctx(),
                BoardMemberInput {
                    name: Some("Ana".into()),
                    title: Some("Chair".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let b = board
            .create(
                &ctx(),
                BoardMemberInput {
                    name: Some("Ben".into()),
                    title: Some("Treasurer".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        board
            .reorder(
                &ctx(),
                vec![
                    OrderUpdate { id: a.id.get(), display_order: 1 },
                    OrderUpdate { id: b.id.get(), display_order: 0 },
                ],
            )
            .await
            .unwrap();
        let names: Vec<String> = board.list().await.unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Ben", "Ana"]);

        let updated = board
            .update(
                &ctx(),
                a.id,
                BoardMemberUpdate {
                    title: Some("Vice Chair".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Vice Chair");
        assert_eq!(updated.name, "Ana");

        board.delete(&ctx(), a.id).await.unwrap();
        let err = board.delete(&ctx(), a.id).await.unwrap_err();
        assert_eq!(err.message, "Board member not found");
    }

    #[tokio::test]
    async fn test_portrait_upload() {
        let dir = tempfile::tempdir().unwrap();
        let board = service(&dir).await;
        let url = board
            .upload_portrait(
                &ctx(),
                Some(UploadedFile {
                    file_name: Some("me.jpg".into()),
                    content_type: "image/jpeg".into(),
                    data: bytes::Bytes::from_static(b"jpeg"),
                }),
            )
            .await
            .unwrap();
        assert!(url.starts_with("/uploads/board-member/"));
        assert!(url.ends_with(".jpg"));

        let err = board.upload_portrait(&ctx(), None).await.unwrap_err();
        assert_eq!(err.message, "No file uploaded");
    }
}
