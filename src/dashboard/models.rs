use std::sync::Arc;
use tokio::sync::oneshot;
use crate::filter::{FilterState, Toggle};
use crate::roster::{RosterEvent, SharedViewer};
use crate::stats::StatsField;
use crate::moderation::ModerationError;
use crate::viewers::{AggregateStats, ViewerId};

/// Everything the presentation layer can observe.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    FilterChanged { toggle: Toggle, value: bool },
    Stats { fields: Vec<StatsField>, stats: AggregateStats },
    /// A reconciliation pass finished. `events` holds every roster change of
    /// that pass in the order it was applied, so a subscriber that keeps up
    /// with passes never misses a single add or remove.
    Synced {
        events: Arc<[RosterEvent]>,
        visible: usize,
        reported: usize,
    },
}

pub(crate) enum DashboardCommand {
    SetToggle {
        toggle: Toggle,
        value: bool,
        reply: oneshot::Sender<Vec<Toggle>>,
    },
    Lookup {
        id: ViewerId,
        reply: oneshot::Sender<Option<SharedViewer>>,
    },
    Filter {
        reply: oneshot::Sender<FilterState>,
    },
    Roster {
        reply: oneshot::Sender<Vec<SharedViewer>>,
    },
    Refresh {
        reply: oneshot::Sender<Result<(), ModerationError>>,
    },
    Stop,
}
