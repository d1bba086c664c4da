use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::filter::errors::FilterError;
use crate::filter::state::{FilterState, Toggle};
use crate::viewers::{BotStatus, Role, ViewerRecord};

/// One categorical gate of the visibility pipeline. Within a stage the
/// toggles relevant to the viewer's category are OR-ed; across stages every
/// gate must pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Bot,
    BanStatus,
    Role,
    Presence,
    Whitelist,
    Watch,
    AccountAge,
}

impl Stage {
    pub const DEFAULT_ORDER: [Stage; 7] = [
        Stage::Bot,
        Stage::BanStatus,
        Stage::Role,
        Stage::Presence,
        Stage::Whitelist,
        Stage::Watch,
        Stage::AccountAge,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Bot => "bot",
            Stage::BanStatus => "ban_status",
            Stage::Role => "role",
            Stage::Presence => "presence",
            Stage::Whitelist => "whitelist",
            Stage::Watch => "watch",
            Stage::AccountAge => "account_age",
        }
    }

    pub fn passes(&self, record: &ViewerRecord, filter: &FilterState) -> bool {
        match self {
            Stage::Bot => match record.bot_status {
                BotStatus::Yes => filter.get(Toggle::KnownBot),
                BotStatus::No => filter.get(Toggle::NonBot),
                BotStatus::Unknown => filter.get(Toggle::PossibleBot),
            },
            Stage::BanStatus => {
                if record.is_banned {
                    filter.get(Toggle::Banned)
                } else if record.is_timed_out() {
                    filter.get(Toggle::TimedOut)
                } else {
                    filter.get(Toggle::NotTimedOut)
                }
            }
            Stage::Role => match record.role {
                role if role.is_moderator_class() => filter.get(Toggle::Mod),
                Role::VIP => filter.get(Toggle::Vip),
                Role::Pleb => filter.get(Toggle::Pleb),
                _ => filter.get(Toggle::UnknownRole),
            },
            Stage::Presence => {
                if !record.is_joined {
                    return filter.get(Toggle::Missing);
                }
                if filter.get(Toggle::Current) {
                    return true;
                }
                if record.is_lurking() {
                    filter.get(Toggle::Lurking)
                } else {
                    filter.get(Toggle::Chatting)
                        || (record.is_recent_chatter && filter.get(Toggle::RecentlyChatting))
                }
            }
            Stage::Whitelist => {
                if record.is_whitelisted {
                    filter.get(Toggle::Whitelisted)
                } else {
                    filter.get(Toggle::NotWhitelisted)
                }
            }
            Stage::Watch => {
                if record.is_watched {
                    filter.get(Toggle::Watched)
                } else {
                    filter.get(Toggle::NotWatched)
                }
            }
            Stage::AccountAge => {
                if record.is_new_account {
                    filter.get(Toggle::NewAccount)
                } else {
                    filter.get(Toggle::OldAccount)
                }
            }
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Stage::DEFAULT_ORDER
            .into_iter()
            .find(|stage| stage.name() == wanted)
            .ok_or_else(|| FilterError::UnknownStage(s.to_string()))
    }
}

/// Decides viewer visibility against a [`FilterState`].
///
/// `ShowAll` short-circuits to visible. Otherwise stages run in the configured
/// order and the first failing stage rejects the viewer without evaluating the
/// rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    order: Vec<Stage>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            order: Stage::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl Classifier {
    /// `order` must name every stage exactly once.
    pub fn new(order: Vec<Stage>) -> Result<Self, FilterError> {
        let mut seen = HashSet::new();
        for stage in &order {
            if !seen.insert(*stage) {
                return Err(FilterError::DuplicateStage(*stage));
            }
        }
        if let Some(missing) = Stage::DEFAULT_ORDER.into_iter().find(|s| !seen.contains(s)) {
            return Err(FilterError::MissingStage(missing));
        }
        Ok(Self { order })
    }

    pub fn order(&self) -> &[Stage] {
        &self.order
    }

    pub fn classify(&self, record: &ViewerRecord, filter: &FilterState) -> bool {
        self.rejecting_stage(record, filter).is_none()
    }

    /// The first stage that hides `record`, or `None` when it is visible.
    pub fn rejecting_stage(&self, record: &ViewerRecord, filter: &FilterState) -> Option<Stage> {
        if filter.show_all() {
            return None;
        }
        self.order.iter().copied().find(|stage| !stage.passes(record, filter))
    }
}
