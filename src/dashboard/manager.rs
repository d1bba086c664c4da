use std::sync::Arc;
use std::time::Duration;
use log::{debug, info, warn};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use crate::dashboard::handle::DashboardHandle;
use crate::dashboard::models::{DashboardCommand, DashboardEvent};
use crate::filter::Toggle;
use crate::moderation::{ModerationCore, ModerationError};
use crate::roster::{RosterEvent, RosterReconciler, SyncReport};
use crate::stats::StatsView;

/// Single task that owns the roster. Polling ticks, filter changes and
/// lookups are all processed here one at a time, so a sync never overlaps
/// another.
pub struct Dashboard {
    core: Arc<dyn ModerationCore>,
    reconciler: RosterReconciler,
    stats: StatsView,
    events: broadcast::Sender<DashboardEvent>,
    poll_interval: Duration,
}

impl Dashboard {
    pub fn new(core: Arc<dyn ModerationCore>, reconciler: RosterReconciler, poll_interval: Duration) -> Self {
        let (events, _) = broadcast::channel(1024);
        Self {
            core,
            reconciler,
            stats: StatsView::default(),
            events,
            poll_interval,
        }
    }

    pub fn reconciler(&self) -> &RosterReconciler {
        &self.reconciler
    }

    pub fn stats(&self) -> &StatsView {
        &self.stats
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    /// Moves the dashboard onto its own task and returns a handle to it.
    pub fn spawn(self) -> (DashboardHandle, JoinHandle<()>) {
        let (commands, receiver) = mpsc::channel(64);
        let handle = DashboardHandle::new(commands, self.events.clone());
        let task = tokio::spawn(self.run(receiver));
        (handle, task)
    }

    async fn run(mut self, mut commands: mpsc::Receiver<DashboardCommand>) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("Dashboard polling every {:?}", self.poll_interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.poll().await {
                        warn!("Failed to fetch snapshot, keeping previous roster: {}", e);
                    }
                }
                command = commands.recv() => match command {
                    Some(DashboardCommand::Stop) | None => break,
                    Some(command) => self.handle(command).await,
                }
            }
        }
        info!("Dashboard stopped");
    }

    async fn handle(&mut self, command: DashboardCommand) {
        match command {
            DashboardCommand::SetToggle { toggle, value, reply } => {
                let changed = self.set_toggle(toggle, value);
                let _ = reply.send(changed);
            }
            DashboardCommand::Lookup { id, reply } => {
                let _ = reply.send(self.reconciler.lookup(id));
            }
            DashboardCommand::Filter { reply } => {
                let _ = reply.send(*self.reconciler.filter());
            }
            DashboardCommand::Roster { reply } => {
                let _ = reply.send(self.reconciler.viewers().to_vec());
            }
            DashboardCommand::Refresh { reply } => {
                let _ = reply.send(self.poll().await.map(|_| ()));
            }
            DashboardCommand::Stop => {}
        }
    }

    /// Fetches a fresh snapshot and reconciles it. A failed fetch leaves the
    /// roster and the stats exactly as the last successful tick left them.
    pub async fn poll(&mut self) -> Result<SyncReport, ModerationError> {
        let snapshot = self.core.fetch_snapshot().await?;

        let stats = snapshot.stats;
        let fields = self.stats.update(stats);
        if !fields.is_empty() {
            self.publish(DashboardEvent::Stats { fields, stats });
        }

        let reported = snapshot.viewers.len();
        let report = self.reconciler.sync(snapshot.viewers);
        self.publish_report(&report, reported);
        Ok(report)
    }

    /// Applies a toggle and re-filters the last snapshot if anything changed.
    pub fn set_toggle(&mut self, toggle: Toggle, value: bool) -> Vec<Toggle> {
        let change = self.reconciler.set_toggle(toggle, value);
        for changed in &change.changed {
            let value = self.reconciler.filter().get(*changed);
            self.publish(DashboardEvent::FilterChanged { toggle: *changed, value });
        }
        if let Some(report) = &change.report {
            let reported = self.reconciler.last_snapshot().len();
            self.publish_report(report, reported);
        }
        change.changed
    }

    fn publish_report(&self, report: &SyncReport, reported: usize) {
        let events: Arc<[RosterEvent]> = report.events.iter().cloned().collect();
        debug!("Publishing {} roster events", events.len());
        self.publish(DashboardEvent::Synced {
            events,
            visible: self.reconciler.len(),
            reported,
        });
    }

    fn publish(&self, event: DashboardEvent) {
        // No subscribers is fine; the roster itself is the source of truth.
        let _ = self.events.send(event);
    }
}
