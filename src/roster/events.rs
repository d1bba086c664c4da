use crate::filter::Toggle;
use crate::roster::fields::Field;
use crate::roster::view_model::SharedViewer;
use crate::viewers::{RecordError, ViewerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    /// No longer in the snapshot.
    Departed,
    /// Still reported, but hidden by the current filters.
    Filtered,
}

/// Fine-grained roster change, in the order it was applied. Indices are
/// positions in the roster at the moment the event happened.
#[derive(Debug, Clone)]
pub enum RosterEvent {
    Added { index: usize, viewer: SharedViewer },
    Removed { index: usize, id: ViewerId, reason: RemovalReason },
    FieldChanged { viewer: SharedViewer, field: Field },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerUpdate {
    pub id: ViewerId,
    pub fields: Vec<Field>,
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub added: Vec<ViewerId>,
    pub removed: Vec<ViewerId>,
    pub updated: Vec<ViewerUpdate>,
    pub events: Vec<RosterEvent>,
    /// Ids reported more than once in the batch; the last instance won.
    pub duplicates: Vec<ViewerId>,
    /// Records dropped before reconciliation because their id is unusable.
    pub rejected: Vec<(ViewerId, RecordError)>,
}

impl SyncReport {
    /// True when the roster was left untouched.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

/// Result of a toggle assignment.
#[derive(Debug, Clone, Default)]
pub struct FilterChange {
    pub changed: Vec<Toggle>,
    /// Present when at least one toggle changed and the last snapshot was re-filtered.
    pub report: Option<SyncReport>,
}
