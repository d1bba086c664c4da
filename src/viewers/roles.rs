use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::viewers::errors::RecordError;

/// Channel role of a viewer as reported by the moderation core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    #[default]
    Unknown,
    Pleb,
    VIP,
    Moderator,
    Broadcaster,
    Admin,
    Staff,
}

impl Role {
    fn rank(&self) -> u8 {
        match self {
            Role::Unknown => 0,
            Role::Pleb => 1,
            Role::VIP => 2,
            Role::Moderator => 3,
            Role::Broadcaster => 4,
            Role::Admin => 5,
            Role::Staff => 6,
        }
    }

    /// Moderators and everything above them share one filter toggle.
    pub fn is_moderator_class(&self) -> bool {
        matches!(self, Role::Moderator | Role::Broadcaster | Role::Admin | Role::Staff)
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Role::Unknown => write!(f, "Unknown"),
            Role::Pleb => write!(f, "Pleb"),
            Role::VIP => write!(f, "VIP"),
            Role::Moderator => write!(f, "Moderator"),
            Role::Broadcaster => write!(f, "Broadcaster"),
            Role::Admin => write!(f, "Admin"),
            Role::Staff => write!(f, "Staff"),
        }
    }
}

impl FromStr for Role {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unknown" => Ok(Role::Unknown),
            "pleb" => Ok(Role::Pleb),
            "vip" => Ok(Role::VIP),
            "moderator" | "mod" => Ok(Role::Moderator),
            "broadcaster" => Ok(Role::Broadcaster),
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            _ => Err(RecordError::UnknownRole(s.to_string())),
        }
    }
}
