use std::collections::HashMap;
use log::{debug, warn};
use crate::filter::{Classifier, FilterState, Toggle};
use crate::roster::events::{FilterChange, RemovalReason, RosterEvent, SyncReport, ViewerUpdate};
use crate::roster::index::RosterIndex;
use crate::roster::view_model::{SharedViewer, ViewerViewModel};
use crate::viewers::{ViewerId, ViewerRecord};

/// Owns the live roster and keeps it in step with the moderation core's
/// snapshots.
///
/// Every call to [`RosterReconciler::sync`] takes the complete current
/// snapshot. Entries that remain visible keep their allocation and are updated
/// in place; entries that vanish or stop passing the filters are removed;
/// newly visible viewers are appended in the order they first appear in the
/// batch.
#[derive(Debug, Default)]
pub struct RosterReconciler {
    viewers: Vec<SharedViewer>,
    index: RosterIndex,
    classifier: Classifier,
    filter: FilterState,
    last_snapshot: Vec<ViewerRecord>,
}

impl RosterReconciler {
    pub fn new(classifier: Classifier, filter: FilterState) -> Self {
        Self {
            classifier,
            filter,
            ..Default::default()
        }
    }

    pub fn viewers(&self) -> &[SharedViewer] {
        &self.viewers
    }

    pub fn index(&self) -> &RosterIndex {
        &self.index
    }

    pub fn lookup(&self, id: ViewerId) -> Option<SharedViewer> {
        self.index.lookup(id)
    }

    pub fn position(&self, id: ViewerId) -> Option<usize> {
        self.viewers.iter().position(|viewer| viewer.read().id() == id)
    }

    pub fn len(&self) -> usize {
        self.viewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewers.is_empty()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn last_snapshot(&self) -> &[ViewerRecord] {
        &self.last_snapshot
    }

    /// Reconciles the roster against a full snapshot and keeps the snapshot
    /// for later re-filtering.
    pub fn sync(&mut self, batch: Vec<ViewerRecord>) -> SyncReport {
        let report = self.reconcile(&batch);
        self.last_snapshot = batch;
        report
    }

    /// Re-runs reconciliation against the most recent snapshot.
    pub fn resync(&mut self) -> SyncReport {
        let batch = std::mem::take(&mut self.last_snapshot);
        let report = self.reconcile(&batch);
        self.last_snapshot = batch;
        report
    }

    /// Assigns a toggle through the cascade. When anything changed, the last
    /// snapshot is re-filtered so visibility follows immediately.
    pub fn set_toggle(&mut self, toggle: Toggle, value: bool) -> FilterChange {
        let changed = self.filter.set_toggle(toggle, value);
        if changed.is_empty() {
            return FilterChange::default();
        }
        let report = self.resync();
        FilterChange {
            changed,
            report: Some(report),
        }
    }

    fn reconcile(&mut self, batch: &[ViewerRecord]) -> SyncReport {
        let mut report = SyncReport::default();

        let mut incoming: HashMap<ViewerId, &ViewerRecord> = HashMap::with_capacity(batch.len());
        let mut arrival = Vec::with_capacity(batch.len());
        for record in batch {
            if let Err(e) = record.validate() {
                warn!("Ignoring malformed record: {}", e);
                report.rejected.push((record.id, e));
                continue;
            }
            if incoming.insert(record.id, record).is_some() {
                warn!("Viewer {} reported more than once in one snapshot; keeping the last", record.id);
                report.duplicates.push(record.id);
            } else {
                arrival.push(record.id);
            }
        }

        let classifier = &self.classifier;
        let filter = &self.filter;
        let index = &mut self.index;
        let mut kept = 0;
        self.viewers.retain(|viewer| {
            let id = viewer.read().id();
            let outcome = match incoming.remove(&id) {
                None => Err(RemovalReason::Departed),
                Some(record) if !classifier.classify(record, filter) => Err(RemovalReason::Filtered),
                Some(record) => {
                    let fields = viewer.write().update(record);
                    if !fields.is_empty() {
                        for field in &fields {
                            report.events.push(RosterEvent::FieldChanged {
                                viewer: viewer.clone(),
                                field: *field,
                            });
                        }
                        report.updated.push(ViewerUpdate { id, fields });
                    }
                    Ok(())
                }
            };
            match outcome {
                Ok(()) => {
                    kept += 1;
                    true
                }
                Err(reason) => {
                    index.remove(id);
                    report.removed.push(id);
                    report.events.push(RosterEvent::Removed { index: kept, id, reason });
                    false
                }
            }
        });

        for id in arrival {
            let Some(record) = incoming.remove(&id) else {
                continue;
            };
            if !self.classifier.classify(record, &self.filter) {
                continue;
            }
            let viewer = ViewerViewModel::shared(record.clone());
            let position = self.viewers.len();
            self.viewers.push(viewer.clone());
            self.index.insert(id, viewer.clone());
            report.added.push(id);
            report.events.push(RosterEvent::Added { index: position, viewer });
        }

        debug_assert_eq!(self.viewers.len(), self.index.len());
        debug!(
            "Roster sync: {} added, {} removed, {} updated, {} visible of {} reported",
            report.added.len(),
            report.removed.len(),
            report.updated.len(),
            self.viewers.len(),
            batch.len()
        );
        report
    }
}
