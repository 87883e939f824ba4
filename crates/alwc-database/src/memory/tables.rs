//! Repository implementations over [`MemoryState`].

use async_trait::async_trait;
use chrono::Utc;

use alwc_core::error::AppError;
use alwc_core::result::AppResult;
use alwc_core::types::{
    AuditLogId, BoardMemberId, ContentId, EventId, EventImageId, ResetTokenId, SubscriberId,
    UserId,
};
use alwc_entity::audit::{AuditLogEntry, NewAuditEntry};
use alwc_entity::board::{BoardMember, BoardMemberChanges, NewBoardMember};
use alwc_entity::content::SiteContent;
use alwc_entity::event::{Event, EventChanges, EventImage, NewEvent, NewEventImage};
use alwc_entity::newsletter::{Subscriber, SubscriberChanges, SubscriberStatus};
use alwc_entity::reset::{NewResetToken, PasswordResetToken};
use alwc_entity::user::{NewUser, User, UserChanges, UserRole};

use super::MemoryTx;
use crate::repositories::{
    AuditRepository, BoardMemberRepository, ContentRepository, EMAIL_IN_USE,
    EventImageRepository, EventRepository, ResetTokenRepository, SubscriberRepository,
    UserRepository,
};

fn same_email(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

impl MemoryTx {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.work
            .users
            .values()
            .any(|u| Some(u.id) != except && same_email(&u.email, email))
    }
}

#[async_trait]
impl UserRepository for MemoryTx {
    async fn find_user(&mut self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.work.users.get(&id.get()).cloned())
    }

    async fn find_user_by_email(&mut self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .work
            .users
            .values()
            .find(|u| same_email(&u.email, email))
            .cloned())
    }

    async fn list_users(&mut self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.work.users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn insert_user(&mut self, user: NewUser) -> AppResult<User> {
        if self.email_taken(&user.email, None) {
            return Err(AppError::conflict(EMAIL_IN_USE));
        }
        let id = self.work.next_id("users");
        let row = User {
            id: UserId(id),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        self.work.users.insert(id, row.clone());
        Ok(row)
    }

    async fn update_user(&mut self, id: UserId, changes: UserChanges) -> AppResult<Option<User>> {
        if let Some(email) = &changes.email {
            if self.email_taken(email, Some(id)) {
                return Err(AppError::conflict(EMAIL_IN_USE));
            }
        }
        let Some(user) = self.work.users.get_mut(&id.get()) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        Ok(Some(user.clone()))
    }

    async fn set_user_role(&mut self, id: UserId, role: UserRole) -> AppResult<Option<User>> {
        Ok(self.work.users.get_mut(&id.get()).map(|user| {
            user.role = role;
            user.clone()
        }))
    }

    async fn delete_user(&mut self, id: UserId) -> AppResult<bool> {
        if self.work.users.remove(&id.get()).is_none() {
            return Ok(false);
        }
        self.work.reset_tokens.retain(|_, t| t.user_id != id);
        for entry in self.work.audit.values_mut() {
            if entry.user_id == Some(id) {
                entry.user_id = None;
            }
        }
        Ok(true)
    }

    async fn upsert_admin(
        &mut self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> AppResult<User> {
        if let Some(user) = self
            .work
            .users
            .values_mut()
            .find(|u| same_email(&u.email, email))
        {
            user.name = name.to_string();
            user.password_hash = password_hash.to_string();
            user.role = UserRole::Admin;
            return Ok(user.clone());
        }
        self.insert_user(NewUser {
            email: email.trim().to_string(),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
            role: UserRole::Admin,
        })
        .await
    }
}

#[async_trait]
impl ResetTokenRepository for MemoryTx {
    async fn insert_reset_token(&mut self, token: NewResetToken) -> AppResult<PasswordResetToken> {
        let id = self.work.next_id("password_reset_tokens");
        let row = PasswordResetToken {
            id: ResetTokenId(id),
            user_id: token.user_id,
            token_hash: token.token_hash,
            expires_at: token.expires_at,
            used: false,
            created_at: Utc::now(),
        };
        self.work.reset_tokens.insert(id, row.clone());
        Ok(row)
    }

    async fn lock_reset_token(&mut self, token_hash: &str) -> AppResult<Option<PasswordResetToken>> {
        // the whole store is already locked by this transaction
        Ok(self
            .work
            .reset_tokens
            .values()
            .find(|t| t.token_hash == token_hash)
            .cloned())
    }

    async fn mark_reset_token_used(&mut self, id: ResetTokenId) -> AppResult<()> {
        if let Some(token) = self.work.reset_tokens.get_mut(&id.get()) {
            token.used = true;
        }
        Ok(())
    }
}

#[async_trait]
impl AuditRepository for MemoryTx {
    async fn insert_audit(&mut self, entry: NewAuditEntry) -> AppResult<AuditLogId> {
        let id = self.work.next_id("audit_logs");
        let row = AuditLogEntry {
            id: AuditLogId(id),
            user_id: entry.user_id,
            action: entry.action,
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            entity_slug: entry.entity_slug,
            previous_data: entry.previous_data,
            new_data: entry.new_data,
            created_at: Utc::now(),
            user_email: None,
            user_name: None,
        };
        self.work.audit.insert(id, row);
        Ok(AuditLogId(id))
    }

    async fn list_audit(&mut self, limit: i64, offset: i64) -> AppResult<Vec<AuditLogEntry>> {
        let mut entries: Vec<AuditLogEntry> = self.work.audit.values().cloned().collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(0);
        let users = &self.work.users;
        Ok(entries
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|mut entry| {
                if let Some(actor) = entry.user_id.and_then(|id| users.get(&id.get())) {
                    entry.user_email = Some(actor.email.clone());
                    entry.user_name = Some(actor.name.clone());
                }
                entry
            })
            .collect())
    }
}

#[async_trait]
impl ContentRepository for MemoryTx {
    async fn find_content(&mut self, slug: &str) -> AppResult<Option<SiteContent>> {
        Ok(self.work.content.get(slug).cloned())
    }

    async fn upsert_content(
        &mut self,
        slug: &str,
        data: serde_json::Value,
    ) -> AppResult<SiteContent> {
        let now = Utc::now();
        if let Some(existing) = self.work.content.get_mut(slug) {
            existing.data = data;
            existing.updated_at = now;
            return Ok(existing.clone());
        }
        let id = self.work.next_id("site_content");
        let row = SiteContent {
            id: ContentId(id),
            slug: slug.to_string(),
            data,
            updated_at: now,
        };
        self.work.content.insert(slug.to_string(), row.clone());
        Ok(row)
    }
}

#[async_trait]
impl EventRepository for MemoryTx {
    async fn list_events(&mut self, published_only: bool) -> AppResult<Vec<Event>> {
        let mut events: Vec<Event> = self
            .work
            .events
            .values()
            .filter(|e| !published_only || e.is_published)
            .cloned()
            .collect();
        events.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then(b.updated_at.cmp(&a.updated_at))
                .then(b.id.cmp(&a.id))
        });
        Ok(events)
    }

    async fn find_event(&mut self, id: EventId) -> AppResult<Option<Event>> {
        Ok(self.work.events.get(&id.get()).cloned())
    }

    async fn insert_event(&mut self, event: NewEvent) -> AppResult<Event> {
        let id = self.work.next_id("events");
        let now = Utc::now();
        let row = Event {
            id: EventId(id),
            title: event.title,
            date: event.date,
            time: event.time,
            location: event.location,
            description: event.description,
            link: event.link,
            image_url: event.image_url,
            is_published: event.is_published,
            display_order: event.display_order,
            created_at: now,
            updated_at: now,
        };
        self.work.events.insert(id, row.clone());
        Ok(row)
    }

    async fn update_event(
        &mut self,
        id: EventId,
        changes: EventChanges,
    ) -> AppResult<Option<Event>> {
        let Some(current) = self.work.events.get_mut(&id.get()) else {
            return Ok(None);
        };
        let mut next = changes.apply_to(current);
        next.updated_at = Utc::now();
        *current = next.clone();
        Ok(Some(next))
    }

    async fn set_event_order(&mut self, id: EventId, display_order: i32) -> AppResult<bool> {
        Ok(match self.work.events.get_mut(&id.get()) {
            Some(event) => {
                event.display_order = display_order;
                event.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn delete_event(&mut self, id: EventId) -> AppResult<bool> {
        if self.work.events.remove(&id.get()).is_none() {
            return Ok(false);
        }
        self.work.images.retain(|_, img| img.event_id != id);
        Ok(true)
    }
}

fn gallery_order(a: &EventImage, b: &EventImage) -> std::cmp::Ordering {
    a.event_id
        .cmp(&b.event_id)
        .then(a.display_order.cmp(&b.display_order))
        .then(a.id.cmp(&b.id))
}

#[async_trait]
impl EventImageRepository for MemoryTx {
    async fn list_event_images(&mut self, event_id: EventId) -> AppResult<Vec<EventImage>> {
        let mut images: Vec<EventImage> = self
            .work
            .images
            .values()
            .filter(|img| img.event_id == event_id)
            .cloned()
            .collect();
        images.sort_by(gallery_order);
        Ok(images)
    }

    async fn list_images_for_events(&mut self, event_ids: &[EventId]) -> AppResult<Vec<EventImage>> {
        let mut images: Vec<EventImage> = self
            .work
            .images
            .values()
            .filter(|img| event_ids.contains(&img.event_id))
            .cloned()
            .collect();
        images.sort_by(gallery_order);
        Ok(images)
    }

    async fn find_event_image(
        &mut self,
        event_id: EventId,
        image_id: EventImageId,
    ) -> AppResult<Option<EventImage>> {
        Ok(self
            .work
            .images
            .get(&image_id.get())
            .filter(|img| img.event_id == event_id)
            .cloned())
    }

    async fn max_image_order(&mut self, event_id: EventId) -> AppResult<Option<i32>> {
        Ok(self
            .work
            .images
            .values()
            .filter(|img| img.event_id == event_id)
            .map(|img| img.display_order)
            .max())
    }

    async fn insert_event_image(&mut self, image: NewEventImage) -> AppResult<EventImage> {
        let id = self.work.next_id("event_images");
        let row = EventImage {
            id: EventImageId(id),
            event_id: image.event_id,
            image_url: image.image_url,
            storage_key: image.storage_key,
            display_order: image.display_order,
            created_at: Utc::now(),
        };
        self.work.images.insert(id, row.clone());
        Ok(row)
    }

    async fn set_image_order(
        &mut self,
        event_id: EventId,
        image_id: EventImageId,
        display_order: i32,
    ) -> AppResult<bool> {
        Ok(match self.work.images.get_mut(&image_id.get()) {
            Some(img) if img.event_id == event_id => {
                img.display_order = display_order;
                true
            }
            _ => false,
        })
    }

    async fn delete_event_image(&mut self, id: EventImageId) -> AppResult<bool> {
        Ok(self.work.images.remove(&id.get()).is_some())
    }
}

#[async_trait]
impl BoardMemberRepository for MemoryTx {
    async fn list_board_members(&mut self) -> AppResult<Vec<BoardMember>> {
        let mut members: Vec<BoardMember> = self.work.board.values().cloned().collect();
        members.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        Ok(members)
    }

    async fn find_board_member(&mut self, id: BoardMemberId) -> AppResult<Option<BoardMember>> {
        Ok(self.work.board.get(&id.get()).cloned())
    }

    async fn insert_board_member(&mut self, member: NewBoardMember) -> AppResult<BoardMember> {
        let id = self.work.next_id("board_members");
        let now = Utc::now();
        let row = BoardMember {
            id: BoardMemberId(id),
            name: member.name,
            title: member.title,
            image_url: member.image_url,
            display_order: member.display_order,
            created_at: now,
            updated_at: now,
        };
        self.work.board.insert(id, row.clone());
        Ok(row)
    }

    async fn update_board_member(
        &mut self,
        id: BoardMemberId,
        changes: BoardMemberChanges,
    ) -> AppResult<Option<BoardMember>> {
        let Some(current) = self.work.board.get_mut(&id.get()) else {
            return Ok(None);
        };
        let mut next = changes.apply_to(current);
        next.updated_at = Utc::now();
        *current = next.clone();
        Ok(Some(next))
    }

    async fn set_board_member_order(
        &mut self,
        id: BoardMemberId,
        display_order: i32,
    ) -> AppResult<bool> {
        Ok(match self.work.board.get_mut(&id.get()) {
            Some(member) => {
                member.display_order = display_order;
                member.updated_at = Utc::now();
                true
            }
            None => false,
        })
    }

    async fn delete_board_member(&mut self, id: BoardMemberId) -> AppResult<bool> {
        Ok(self.work.board.remove(&id.get()).is_some())
    }
}

#[async_trait]
impl SubscriberRepository for MemoryTx {
    async fn list_subscribers(
        &mut self,
        status: Option<SubscriberStatus>,
    ) -> AppResult<Vec<Subscriber>> {
        let mut subscribers: Vec<Subscriber> = self
            .work
            .subscribers
            .values()
            .filter(|s| status.is_none_or(|wanted| s.status == wanted))
            .cloned()
            .collect();
        subscribers.sort_by(|a, b| b.subscribed_at.cmp(&a.subscribed_at).then(b.id.cmp(&a.id)));
        Ok(subscribers)
    }

    async fn find_subscriber(&mut self, id: SubscriberId) -> AppResult<Option<Subscriber>> {
        Ok(self.work.subscribers.get(&id.get()).cloned())
    }

    async fn find_subscriber_by_email(&mut self, email: &str) -> AppResult<Option<Subscriber>> {
        Ok(self
            .work
            .subscribers
            .values()
            .find(|s| same_email(&s.email, email))
            .cloned())
    }

    async fn insert_subscriber(&mut self, email: &str, name: Option<&str>) -> AppResult<Subscriber> {
        if self
            .work
            .subscribers
            .values()
            .any(|s| same_email(&s.email, email))
        {
            return Err(AppError::conflict("Email already subscribed"));
        }
        let id = self.work.next_id("newsletter_subscribers");
        let now = Utc::now();
        let row = Subscriber {
            id: SubscriberId(id),
            email: email.trim().to_string(),
            name: name.map(str::to_string),
            status: SubscriberStatus::Active,
            subscribed_at: now,
            unsubscribed_at: None,
            created_at: now,
        };
        self.work.subscribers.insert(id, row.clone());
        Ok(row)
    }

    async fn reactivate_subscriber(
        &mut self,
        id: SubscriberId,
        name: Option<&str>,
    ) -> AppResult<Option<Subscriber>> {
        Ok(self.work.subscribers.get_mut(&id.get()).map(|s| {
            s.status = SubscriberStatus::Active;
            s.subscribed_at = Utc::now();
            s.unsubscribed_at = None;
            if let Some(name) = name {
                s.name = Some(name.to_string());
            }
            s.clone()
        }))
    }

    async fn update_subscriber(
        &mut self,
        id: SubscriberId,
        changes: SubscriberChanges,
    ) -> AppResult<Option<Subscriber>> {
        if let Some(email) = &changes.email {
            let taken = self
                .work
                .subscribers
                .values()
                .any(|s| s.id != id && same_email(&s.email, email));
            if taken {
                return Err(AppError::conflict("Email already subscribed"));
            }
        }
        let Some(subscriber) = self.work.subscribers.get_mut(&id.get()) else {
            return Ok(None);
        };
        if let Some(email) = changes.email {
            subscriber.email = email;
        }
        if let Some(name) = changes.name {
            subscriber.name = name;
        }
        if let Some(status) = changes.status {
            match status {
                SubscriberStatus::Unsubscribed if subscriber.status != status => {
                    subscriber.unsubscribed_at = Some(Utc::now());
                }
                SubscriberStatus::Active => subscriber.unsubscribed_at = None,
                SubscriberStatus::Unsubscribed => {}
            }
            subscriber.status = status;
        }
        Ok(Some(subscriber.clone()))
    }

    async fn delete_subscriber(&mut self, id: SubscriberId) -> AppResult<bool> {
        Ok(self.work.subscribers.remove(&id.get()).is_some())
    }
}
