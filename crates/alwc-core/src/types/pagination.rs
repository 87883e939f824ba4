//! Limit/offset windows for list endpoints.

use serde::{Deserialize, Serialize};

/// Default number of rows returned when no limit is given.
pub const DEFAULT_LIMIT: i64 = 50;
/// Maximum number of rows a caller may request.
pub const MAX_LIMIT: i64 = 200;

/// Raw query parameters for a limit/offset list.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ListWindow {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

impl ListWindow {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self { limit, offset }
    }

    /// Effective SQL `LIMIT`: missing or zero falls back to the default,
    /// anything else is clamped into `1..=200`.
    pub fn limit(&self) -> i64 {
        match self.limit {
            None | Some(0) => DEFAULT_LIMIT,
            Some(n) => n.clamp(1, MAX_LIMIT),
        }
    }

    /// Effective SQL `OFFSET`; never negative, never clamped from above.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}
