use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::viewers::errors::RecordError;
use crate::viewers::roles::Role;

pub type ViewerId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BotStatus {
    Yes,
    No,
    #[default]
    Unknown,
}

/// One viewer as reported by the moderation core for a single polling tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ViewerRecord {
    pub id: ViewerId,
    pub login: String,
    pub display_name: String,
    pub role: Role,
    pub bot_status: BotStatus,
    pub is_banned: bool,
    /// Zero means no active timeout.
    pub timeout_remaining_seconds: u64,
    pub is_whitelisted: bool,
    pub is_joined: bool,
    pub is_watched: bool,
    pub is_new_account: bool,
    pub is_recent_chatter: bool,
    pub message_count_total: u64,
    pub message_count_this_session: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub first_message_at: Option<DateTime<Utc>>,
    pub first_message_this_session_at: Option<DateTime<Utc>>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub joined_at: Option<DateTime<Utc>>,
    pub left_at: Option<DateTime<Utc>>,
    pub total_view_seconds: u64,
    pub note: String,
}

impl ViewerRecord {
    pub fn new(id: ViewerId, login: impl Into<String>) -> Self {
        let login = login.into();
        Self {
            id,
            display_name: login.clone(),
            login,
            ..Default::default()
        }
    }

    /// Banned takes precedence over a running timeout.
    pub fn is_timed_out(&self) -> bool {
        !self.is_banned && self.timeout_remaining_seconds != 0
    }

    pub fn is_lurking(&self) -> bool {
        self.message_count_this_session == 0
    }

    /// Ids are positive and never reused; anything else is a fault in the
    /// moderation core's data.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.id <= 0 {
            return Err(RecordError::InvalidId(self.id));
        }
        Ok(())
    }
}

/// Channel-wide counters reported alongside the roster; not part of reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AggregateStats {
    pub current_viewer_count: u64,
    pub max_viewer_count_this_session: u64,
    pub max_viewer_count_all_time: u64,
    pub total_view_seconds_this_session: u64,
    pub total_view_seconds_all_time: u64,
    pub num_viewers_known: u64,
}
