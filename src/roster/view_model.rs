use std::sync::Arc;
use log::trace;
use parking_lot::RwLock;
use serde::Serialize;
use crate::format::{format_absolute_time, format_delta_time};
use crate::roster::fields::Field;
use crate::viewers::{BotStatus, ViewerId, ViewerRecord};

/// Shared handle to a roster entry. The same allocation lives for as long as
/// the viewer stays visible, so `Arc::ptr_eq` is the identity test.
pub type SharedViewer = Arc<RwLock<ViewerViewModel>>;

/// Display colour class for a roster row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Highlight {
    Normal,
    Banned,
    TimedOut,
    Watched,
    NewAccount,
    Whitelisted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerViewModel {
    record: ViewerRecord,
}

macro_rules! diff_field {
    ($changed:ident, $target:expr, $source:ident . $name:ident, $field:expr) => {
        if $target.$name != $source.$name {
            $target.$name = $source.$name.clone();
            $changed.push($field);
        }
    };
}

impl ViewerViewModel {
    pub fn new(record: ViewerRecord) -> Self {
        Self { record }
    }

    pub fn shared(record: ViewerRecord) -> SharedViewer {
        Arc::new(RwLock::new(Self::new(record)))
    }

    pub fn id(&self) -> ViewerId {
        self.record.id
    }

    pub fn record(&self) -> &ViewerRecord {
        &self.record
    }

    /// Copies `record` in, field by field, and returns the change
    /// notifications: each changed raw field followed by its dependents, with
    /// every field announced at most once.
    pub fn update(&mut self, record: &ViewerRecord) -> Vec<Field> {
        let mut changed = Vec::new();
        diff_field!(changed, self.record, record.login, Field::Login);
        diff_field!(changed, self.record, record.display_name, Field::DisplayName);
        diff_field!(changed, self.record, record.role, Field::Role);
        diff_field!(changed, self.record, record.bot_status, Field::BotStatus);
        diff_field!(changed, self.record, record.is_banned, Field::IsBanned);
        diff_field!(changed, self.record, record.timeout_remaining_seconds, Field::TimeoutRemaining);
        diff_field!(changed, self.record, record.is_whitelisted, Field::IsWhitelisted);
        diff_field!(changed, self.record, record.is_joined, Field::IsJoined);
        diff_field!(changed, self.record, record.is_watched, Field::IsWatched);
        diff_field!(changed, self.record, record.is_new_account, Field::IsNewAccount);
        diff_field!(changed, self.record, record.is_recent_chatter, Field::IsRecentChatter);
        diff_field!(changed, self.record, record.message_count_total, Field::MessageCountTotal);
        diff_field!(changed, self.record, record.message_count_this_session, Field::MessageCountThisSession);
        diff_field!(changed, self.record, record.created_at, Field::CreatedAt);
        diff_field!(changed, self.record, record.first_message_at, Field::FirstMessageAt);
        diff_field!(changed, self.record, record.first_message_this_session_at, Field::FirstMessageThisSessionAt);
        diff_field!(changed, self.record, record.last_message_at, Field::LastMessageAt);
        diff_field!(changed, self.record, record.joined_at, Field::JoinedAt);
        diff_field!(changed, self.record, record.left_at, Field::LeftAt);
        diff_field!(changed, self.record, record.total_view_seconds, Field::TotalViewSeconds);
        diff_field!(changed, self.record, record.note, Field::Note);

        let mut notifications = Vec::with_capacity(changed.len() * 2);
        for raw in changed {
            notifications.push(raw);
            for derived in raw.dependents() {
                if !notifications.contains(derived) {
                    notifications.push(*derived);
                }
            }
        }
        if !notifications.is_empty() {
            trace!("Viewer {} changed: {:?}", self.record.id, notifications);
        }
        notifications
    }

    pub fn role_label(&self) -> String {
        self.record.role.to_string()
    }

    pub fn created_at_formatted(&self) -> String {
        format_absolute_time(self.record.created_at)
    }

    pub fn first_message_at_formatted(&self) -> String {
        format_absolute_time(self.record.first_message_at)
    }

    pub fn first_message_this_session_at_formatted(&self) -> String {
        format_absolute_time(self.record.first_message_this_session_at)
    }

    /// "this session / all time"
    pub fn first_message_report(&self) -> String {
        format!(
            "{} / {}",
            self.first_message_this_session_at_formatted(),
            self.first_message_at_formatted()
        )
    }

    pub fn last_message_at_formatted(&self) -> String {
        format_absolute_time(self.record.last_message_at)
    }

    pub fn joined_at_formatted(&self) -> String {
        format_absolute_time(self.record.joined_at)
    }

    pub fn left_at_formatted(&self) -> String {
        format_absolute_time(self.record.left_at)
    }

    pub fn total_view_time_formatted(&self) -> String {
        format_delta_time(self.record.total_view_seconds)
    }

    /// "this session / total"
    pub fn num_messages_report(&self) -> String {
        format!(
            "{} / {}",
            self.record.message_count_this_session, self.record.message_count_total
        )
    }

    pub fn timeout_formatted(&self) -> String {
        if self.record.timeout_remaining_seconds == 0 {
            String::new()
        } else {
            format_delta_time(self.record.timeout_remaining_seconds)
        }
    }

    pub fn highlight(&self) -> Highlight {
        let record = &self.record;
        if record.is_banned {
            Highlight::Banned
        } else if record.is_timed_out() {
            Highlight::TimedOut
        } else if record.is_watched {
            Highlight::Watched
        } else if record.is_new_account {
            Highlight::NewAccount
        } else if record.is_whitelisted {
            Highlight::Whitelisted
        } else {
            Highlight::Normal
        }
    }

    pub fn can_ban(&self) -> bool {
        !self.record.is_banned
    }

    pub fn can_unban(&self) -> bool {
        self.record.is_banned
    }

    pub fn can_whitelist(&self) -> bool {
        !self.record.is_whitelisted
    }

    pub fn can_unwhitelist(&self) -> bool {
        self.record.is_whitelisted
    }

    pub fn can_mark_bot(&self) -> bool {
        self.record.bot_status != BotStatus::Yes
    }

    pub fn can_mark_not_bot(&self) -> bool {
        self.record.bot_status != BotStatus::No
    }

    pub fn can_watch(&self) -> bool {
        !self.record.is_watched
    }

    pub fn can_unwatch(&self) -> bool {
        self.record.is_watched
    }

    pub fn has_note(&self) -> bool {
        !self.record.note.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewers::Role;

    fn viewer() -> ViewerViewModel {
        let mut record = ViewerRecord::new(1, "alice");
        record.is_joined = true;
        ViewerViewModel::new(record)
    }

    #[test]
    fn identical_record_produces_no_notifications() {
        let mut vm = viewer();
        let same = vm.record().clone();
        assert!(vm.update(&same).is_empty());
    }

    #[test]
    fn raw_change_cascades_to_dependents() {
        let mut vm = viewer();
        let mut next = vm.record().clone();
        next.timeout_remaining_seconds = 90;
        assert_eq!(
            vm.update(&next),
            vec![Field::TimeoutRemaining, Field::TimeoutFormatted, Field::Highlight]
        );
        assert_eq!(vm.timeout_formatted(), "00:01:30");
        assert_eq!(vm.highlight(), Highlight::TimedOut);
    }

    #[test]
    fn composite_fires_once_when_both_inputs_change() {
        let mut vm = viewer();
        let mut next = vm.record().clone();
        next.message_count_total = 4;
        next.message_count_this_session = 1;
        let fired = vm.update(&next);
        assert_eq!(
            fired,
            vec![Field::MessageCountTotal, Field::NumMessagesReport, Field::MessageCountThisSession]
        );
        assert_eq!(vm.num_messages_report(), "1 / 4");
    }

    #[test]
    fn shared_highlight_fires_once_across_inputs() {
        let mut vm = viewer();
        let mut next = vm.record().clone();
        next.is_banned = true;
        next.is_whitelisted = true;
        let fired = vm.update(&next);
        assert_eq!(fired.iter().filter(|f| **f == Field::Highlight).count(), 1);
        assert!(vm.can_unban());
        assert!(vm.can_unwhitelist());
        assert_eq!(vm.highlight(), Highlight::Banned);
    }

    #[test]
    fn note_toggles_has_note() {
        let mut vm = viewer();
        let mut next = vm.record().clone();
        next.note = "raided us last week".to_string();
        assert_eq!(vm.update(&next), vec![Field::Note, Field::HasNote]);
        assert!(vm.has_note());
    }

    #[test]
    fn derived_strings() {
        let mut record = ViewerRecord::new(2, "bob");
        record.total_view_seconds = 90_061;
        record.role = Role::VIP;
        let vm = ViewerViewModel::new(record);
        assert_eq!(vm.total_view_time_formatted(), "1d 01:01:01");
        assert_eq!(vm.first_message_report(), " / ");
        assert_eq!(vm.role_label(), "VIP");
        assert!(vm.can_mark_bot());
        assert!(vm.can_mark_not_bot());
    }
}
