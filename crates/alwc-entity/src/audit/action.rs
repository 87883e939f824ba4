//! Audit verbs and entity type names.
//!
//! Stored as free text so historic rows with verbs this build no longer
//! emits still load.

use std::fmt;

/// Verbs recorded by the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Reorder,
    Upload,
    Publish,
    Unpublish,
    UpdateRole,
    UpdateEmail,
    UpdatePassword,
    UpdateProfile,
    UpdateOwnEmail,
    UpdateOwnPassword,
    RequestSuperuser,
    Resubscribe,
    SendNewsletter,
    ResetPassword,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Reorder => "reorder",
            Self::Upload => "upload",
            Self::Publish => "publish",
            Self::Unpublish => "unpublish",
            Self::UpdateRole => "update_role",
            Self::UpdateEmail => "update_email",
            Self::UpdatePassword => "update_password",
            Self::UpdateProfile => "update_profile",
            Self::UpdateOwnEmail => "update_own_email",
            Self::UpdateOwnPassword => "update_own_password",
            Self::RequestSuperuser => "request_superuser",
            Self::Resubscribe => "resubscribe",
            Self::SendNewsletter => "send_newsletter",
            Self::ResetPassword => "reset_password",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity type names written to `audit_logs.entity_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    User,
    SiteContent,
    Event,
    EventImage,
    EventImages,
    BoardMember,
    BoardMemberImage,
    NewsletterSubscriber,
    Newsletter,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::SiteContent => "site_content",
            Self::Event => "event",
            Self::EventImage => "event_image",
            Self::EventImages => "event_images",
            Self::BoardMember => "board_member",
            Self::BoardMemberImage => "board_member_image",
            Self::NewsletterSubscriber => "newsletter_subscriber",
            Self::Newsletter => "newsletter",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
