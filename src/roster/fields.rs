use std::fmt;
use serde::Serialize;

/// Every observable property of a [`super::ViewerViewModel`], raw and derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    // Raw, copied from the record.
    Login,
    DisplayName,
    Role,
    BotStatus,
    IsBanned,
    TimeoutRemaining,
    IsWhitelisted,
    IsJoined,
    IsWatched,
    IsNewAccount,
    IsRecentChatter,
    MessageCountTotal,
    MessageCountThisSession,
    CreatedAt,
    FirstMessageAt,
    FirstMessageThisSessionAt,
    LastMessageAt,
    JoinedAt,
    LeftAt,
    TotalViewSeconds,
    Note,

    // Derived.
    RoleLabel,
    CreatedAtFormatted,
    FirstMessageAtFormatted,
    FirstMessageThisSessionAtFormatted,
    FirstMessageReport,
    LastMessageAtFormatted,
    JoinedAtFormatted,
    LeftAtFormatted,
    TotalViewTimeFormatted,
    NumMessagesReport,
    TimeoutFormatted,
    Highlight,
    CanBan,
    CanUnban,
    CanWhitelist,
    CanUnwhitelist,
    CanMarkBot,
    CanMarkNotBot,
    CanWatch,
    CanUnwatch,
    HasNote,
}

impl Field {
    /// Derived fields that must be re-announced when this raw field changes.
    pub fn dependents(&self) -> &'static [Field] {
        use Field::*;
        match self {
            Role => &[RoleLabel],
            BotStatus => &[CanMarkBot, CanMarkNotBot],
            IsBanned => &[Highlight, CanBan, CanUnban],
            TimeoutRemaining => &[TimeoutFormatted, Highlight],
            IsWhitelisted => &[Highlight, CanWhitelist, CanUnwhitelist],
            IsWatched => &[Highlight, CanWatch, CanUnwatch],
            IsNewAccount => &[Highlight],
            MessageCountTotal => &[NumMessagesReport],
            MessageCountThisSession => &[NumMessagesReport],
            CreatedAt => &[CreatedAtFormatted],
            FirstMessageAt => &[FirstMessageAtFormatted, FirstMessageReport],
            FirstMessageThisSessionAt => &[FirstMessageThisSessionAtFormatted, FirstMessageReport],
            LastMessageAt => &[LastMessageAtFormatted],
            JoinedAt => &[JoinedAtFormatted],
            LeftAt => &[LeftAtFormatted],
            TotalViewSeconds => &[TotalViewTimeFormatted],
            Note => &[HasNote],
            _ => &[],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
