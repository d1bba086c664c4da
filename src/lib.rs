pub mod config;
pub mod dashboard;
pub mod filter;
pub mod format;
pub mod logging;
pub mod moderation;
pub mod roster;
pub mod stats;
pub mod viewers;

use std::sync::Arc;
use colored::{ColoredString, Colorize};
use log::{debug, info, warn};
use tokio::sync::broadcast::error::RecvError;
use crate::config::{Config, ConfigError};
use crate::dashboard::{Dashboard, DashboardError, DashboardEvent, DashboardHandle};
use crate::moderation::ModerationCore;
use crate::roster::{Highlight, RosterEvent, RosterReconciler, SharedViewer};
use crate::stats::StatsView;

pub use crate::logging::LogLevel;

/// Builds a dashboard from configuration, with the configured stage order and
/// starting filters already applied.
pub fn init(config: &Config, core: Arc<dyn ModerationCore>) -> Result<Dashboard, ConfigError> {
    let classifier = config.classifier()?;
    let filter = config.filter_state()?;
    info!(
        "Classifier stages: {}",
        classifier.order().iter().map(|s| s.name()).collect::<Vec<_>>().join(" -> ")
    );
    let reconciler = RosterReconciler::new(classifier, filter);
    Ok(Dashboard::new(core, reconciler, config.poll_interval()))
}

/// Runs the dashboard, logging roster activity, until Ctrl+C or until
/// `max_ticks` reconciliation passes have completed.
pub async fn run(dashboard: Dashboard, max_ticks: Option<usize>) -> Result<(), DashboardError> {
    let mut events = dashboard.subscribe();
    let (handle, task) = dashboard.spawn();
    let mut stats = StatsView::default();
    let mut ticks = 0;

    println!("Bouncer is now running. Press Ctrl+C to exit.");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(DashboardEvent::Synced { events: changes, visible, reported }) => {
                    changes.iter().for_each(log_roster_event);
                    ticks += 1;
                    print_roster(&handle, visible, reported).await?;
                    if max_ticks.is_some_and(|max| ticks >= max) {
                        break;
                    }
                }
                Ok(DashboardEvent::Stats { stats: latest, .. }) => {
                    stats.update(latest);
                    info!("Viewers {} | View time {}", stats.viewers_report(), stats.time_report());
                }
                Ok(DashboardEvent::FilterChanged { toggle, value }) => {
                    info!("Filter {} -> {}", toggle, value);
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event log fell behind; skipped {} passes", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                println!("Received Ctrl+C, shutting down.");
                break;
            }
        }
    }

    handle.stop().await?;
    if let Err(e) = task.await {
        warn!("Dashboard task ended abnormally: {}", e);
    }
    println!("Bouncer has shut down.");
    Ok(())
}

fn log_roster_event(event: &RosterEvent) {
    match event {
        RosterEvent::Added { index, viewer } => {
            let viewer = viewer.read();
            info!("+ {} ({}) at {}", viewer.record().login, viewer.id(), index);
        }
        RosterEvent::Removed { index, id, reason } => {
            info!("- {} at {} ({:?})", id, index, reason);
        }
        RosterEvent::FieldChanged { viewer, field } => {
            debug!("~ {} {}", viewer.read().id(), field);
        }
    }
}

fn paint(viewer: &SharedViewer) -> ColoredString {
    let viewer = viewer.read();
    let name = viewer.record().display_name.as_str();
    match viewer.highlight() {
        Highlight::Banned => name.red(),
        Highlight::TimedOut => name.yellow(),
        Highlight::Watched => name.magenta(),
        Highlight::NewAccount => name.cyan(),
        Highlight::Whitelisted => name.green(),
        Highlight::Normal => name.normal(),
    }
}

async fn print_roster(handle: &DashboardHandle, visible: usize, reported: usize) -> Result<(), DashboardError> {
    let roster = handle.roster().await?;
    let names: Vec<String> = roster.iter().map(|viewer| paint(viewer).to_string()).collect();
    println!(
        "{} {}/{} {}",
        "roster".bold(),
        visible,
        reported,
        names.join(", ")
    );
    Ok(())
}
