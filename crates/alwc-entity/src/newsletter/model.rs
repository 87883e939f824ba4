//! Newsletter subscriber model.

use alwc_core::types::SubscriberId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::SubscriberStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub email: String,
    pub name: Option<String>,
    pub status: SubscriberStatus,
    pub subscribed_at: DateTime<Utc>,
    pub unsubscribed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Subscriber {
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "email": self.email,
            "name": self.name,
            "status": self.status,
        })
    }
}

/// Partial update. Changing `status` also moves `unsubscribed_at`.
#[derive(Debug, Clone, Default)]
pub struct SubscriberChanges {
    pub email: Option<String>,
    pub name: Option<Option<String>>,
    pub status: Option<SubscriberStatus>,
}
