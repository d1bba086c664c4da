use std::fmt;
use std::str::FromStr;
use log::debug;
use crate::filter::errors::FilterError;

/// A single visibility toggle. Toggles form a tree rooted at `ShowAll`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Toggle {
    ShowAll,
    KnownBot,
    PossibleBot,
    NonBot,
    Banned,
    TimedOut,
    NotTimedOut,
    Mod,
    Vip,
    Pleb,
    UnknownRole,
    Current,
    Lurking,
    Chatting,
    RecentlyChatting,
    Missing,
    Whitelisted,
    NotWhitelisted,
    Watched,
    NotWatched,
    NewAccount,
    OldAccount,
}

impl Toggle {
    pub const COUNT: usize = 22;

    pub const ALL: [Toggle; Toggle::COUNT] = [
        Toggle::ShowAll,
        Toggle::KnownBot,
        Toggle::PossibleBot,
        Toggle::NonBot,
        Toggle::Banned,
        Toggle::TimedOut,
        Toggle::NotTimedOut,
        Toggle::Mod,
        Toggle::Vip,
        Toggle::Pleb,
        Toggle::UnknownRole,
        Toggle::Current,
        Toggle::Lurking,
        Toggle::Chatting,
        Toggle::RecentlyChatting,
        Toggle::Missing,
        Toggle::Whitelisted,
        Toggle::NotWhitelisted,
        Toggle::Watched,
        Toggle::NotWatched,
        Toggle::NewAccount,
        Toggle::OldAccount,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Toggle::ShowAll => "show_all",
            Toggle::KnownBot => "known_bot",
            Toggle::PossibleBot => "possible_bot",
            Toggle::NonBot => "non_bot",
            Toggle::Banned => "banned",
            Toggle::TimedOut => "timed_out",
            Toggle::NotTimedOut => "not_timed_out",
            Toggle::Mod => "mod",
            Toggle::Vip => "vip",
            Toggle::Pleb => "pleb",
            Toggle::UnknownRole => "unknown_role",
            Toggle::Current => "current",
            Toggle::Lurking => "lurking",
            Toggle::Chatting => "chatting",
            Toggle::RecentlyChatting => "recently_chatting",
            Toggle::Missing => "missing",
            Toggle::Whitelisted => "whitelisted",
            Toggle::NotWhitelisted => "not_whitelisted",
            Toggle::Watched => "watched",
            Toggle::NotWatched => "not_watched",
            Toggle::NewAccount => "new_account",
            Toggle::OldAccount => "old_account",
        }
    }

    /// The toggle that aggregates this one, if any.
    pub fn parent(&self) -> Option<Toggle> {
        match self {
            Toggle::ShowAll => None,
            Toggle::Lurking | Toggle::Chatting => Some(Toggle::Current),
            Toggle::RecentlyChatting => Some(Toggle::Chatting),
            _ => Some(Toggle::ShowAll),
        }
    }

    pub fn children(&self) -> impl Iterator<Item = Toggle> + '_ {
        Toggle::ALL.into_iter().filter(move |t| t.parent() == Some(*self))
    }

    fn slot(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Toggle {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Toggle::ALL
            .into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| FilterError::UnknownToggle(s.to_string()))
    }
}

/// Cascading visibility toggles. Everything starts enabled.
///
/// Cascade rules:
/// - assigning a toggle assigns the same value to all of its descendants;
/// - turning a toggle off turns every ancestor off, up to and including `ShowAll`;
/// - turning a toggle on never turns an ancestor back on.
///
/// Together these keep an enabled toggle from ever having a disabled descendant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterState {
    toggles: [bool; Toggle::COUNT],
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            toggles: [true; Toggle::COUNT],
        }
    }
}

impl FilterState {
    pub fn get(&self, toggle: Toggle) -> bool {
        self.toggles[toggle.slot()]
    }

    pub fn show_all(&self) -> bool {
        self.get(Toggle::ShowAll)
    }

    /// Applies the cascade and returns every toggle whose value changed, in the
    /// order the changes were made. An empty result means nothing changed.
    pub fn set_toggle(&mut self, toggle: Toggle, value: bool) -> Vec<Toggle> {
        let mut changed = Vec::new();
        self.assign(toggle, value, &mut changed);
        if !changed.is_empty() {
            debug!("Filter toggle {} set to {} (changed: {:?})", toggle, value, changed);
        }
        changed
    }

    /// Pure form of [`FilterState::set_toggle`].
    pub fn with_toggle(mut self, toggle: Toggle, value: bool) -> Self {
        self.set_toggle(toggle, value);
        self
    }

    fn assign(&mut self, toggle: Toggle, value: bool, changed: &mut Vec<Toggle>) {
        self.put(toggle, value, changed);
        let children: Vec<Toggle> = toggle.children().collect();
        for child in children {
            self.assign(child, value, changed);
        }
        if !value {
            let mut ancestor = toggle.parent();
            while let Some(parent) = ancestor {
                self.put(parent, false, changed);
                ancestor = parent.parent();
            }
        }
    }

    fn put(&mut self, toggle: Toggle, value: bool, changed: &mut Vec<Toggle>) {
        let slot = &mut self.toggles[toggle.slot()];
        if *slot != value {
            *slot = value;
            changed.push(toggle);
        }
    }

    /// True when no enabled toggle has a disabled descendant.
    pub fn is_consistent(&self) -> bool {
        Toggle::ALL.into_iter().all(|toggle| match toggle.parent() {
            Some(parent) => !self.get(parent) || self.get(toggle),
            None => true,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (Toggle, bool)> + '_ {
        Toggle::ALL.into_iter().map(move |t| (t, self.get(t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_everything() {
        let state = FilterState::default();
        assert!(state.iter().all(|(_, on)| on));
        assert!(state.is_consistent());
    }

    #[test]
    fn lurking_off_forces_current_and_show_all_off() {
        let mut state = FilterState::default();
        let changed = state.set_toggle(Toggle::Lurking, false);
        assert_eq!(changed, vec![Toggle::Lurking, Toggle::Current, Toggle::ShowAll]);
        assert!(!state.get(Toggle::Current));
        assert!(!state.show_all());
        assert!(state.get(Toggle::Missing));
        assert!(state.get(Toggle::Chatting));
    }

    #[test]
    fn chatting_off_takes_recently_chatting_with_it() {
        let state = FilterState::default().with_toggle(Toggle::Chatting, false);
        assert!(!state.get(Toggle::RecentlyChatting));
        assert!(!state.get(Toggle::Current));
        assert!(state.get(Toggle::Lurking));
        assert!(state.is_consistent());
    }

    #[test]
    fn recently_chatting_off_climbs_to_the_root() {
        let state = FilterState::default().with_toggle(Toggle::RecentlyChatting, false);
        assert!(!state.get(Toggle::Chatting));
        assert!(!state.get(Toggle::Current));
        assert!(!state.show_all());
        assert!(state.get(Toggle::Lurking));
    }

    #[test]
    fn child_back_on_does_not_restore_ancestors() {
        let mut state = FilterState::default().with_toggle(Toggle::Vip, false);
        let changed = state.set_toggle(Toggle::Vip, true);
        assert_eq!(changed, vec![Toggle::Vip]);
        assert!(!state.show_all());
        assert!(state.is_consistent());
    }

    #[test]
    fn show_all_on_enables_every_toggle() {
        let mut state = FilterState::default()
            .with_toggle(Toggle::Lurking, false)
            .with_toggle(Toggle::Banned, false)
            .with_toggle(Toggle::NewAccount, false);
        state.set_toggle(Toggle::ShowAll, true);
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn show_all_off_disables_every_toggle() {
        let state = FilterState::default().with_toggle(Toggle::ShowAll, false);
        assert!(state.iter().all(|(_, on)| !on));
    }

    #[test]
    fn parent_assignment_reaches_children_even_when_parent_unchanged() {
        let mut state = FilterState::default().with_toggle(Toggle::Current, false);
        state.set_toggle(Toggle::Lurking, true);
        state.set_toggle(Toggle::Chatting, true);
        assert!(!state.get(Toggle::Current));
        assert!(state.get(Toggle::RecentlyChatting));

        let changed = state.set_toggle(Toggle::Current, false);
        assert_eq!(changed, vec![Toggle::Lurking, Toggle::Chatting, Toggle::RecentlyChatting]);
    }

    #[test]
    fn parent_on_restores_children_but_not_show_all() {
        let mut state = FilterState::default().with_toggle(Toggle::Current, false);
        let changed = state.set_toggle(Toggle::Current, true);
        assert_eq!(
            changed,
            vec![Toggle::Current, Toggle::Lurking, Toggle::Chatting, Toggle::RecentlyChatting]
        );
        assert!(!state.show_all());
    }

    #[test]
    fn redundant_assignment_reports_nothing() {
        let mut state = FilterState::default();
        assert!(state.set_toggle(Toggle::Mod, true).is_empty());
    }

    #[test]
    fn toggles_parse_by_name() {
        assert_eq!("recently-chatting".parse::<Toggle>(), Ok(Toggle::RecentlyChatting));
        assert_eq!("SHOW_ALL".parse::<Toggle>(), Ok(Toggle::ShowAll));
        assert_eq!(
            "regular".parse::<Toggle>(),
            Err(FilterError::UnknownToggle("regular".to_string()))
        );
        for toggle in Toggle::ALL {
            assert_eq!(toggle.name().parse::<Toggle>(), Ok(toggle));
        }
    }
}
