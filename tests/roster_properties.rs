//! Roster-level guarantees: identity, index coherence, no duplicates and
//! the documented scenarios, driven through the public API only.

use std::collections::HashSet;
use std::sync::Arc;

use bouncer::filter::{Classifier, FilterState, Toggle};
use bouncer::roster::{Field, RosterReconciler, SharedViewer};
use bouncer::viewers::{BotStatus, Role, ViewerId, ViewerRecord};

fn lurking_vip(id: ViewerId) -> ViewerRecord {
    let mut record = ViewerRecord::new(id, format!("vip{}", id));
    record.role = Role::VIP;
    record.bot_status = BotStatus::No;
    record.is_joined = true;
    record
}

fn assorted_batch() -> Vec<ViewerRecord> {
    let mut batch = Vec::new();
    for id in 1..=30 {
        let mut record = ViewerRecord::new(id, format!("user{}", id));
        record.role = match id % 5 {
            0 => Role::Moderator,
            1 => Role::VIP,
            2 => Role::Pleb,
            3 => Role::Unknown,
            _ => Role::Staff,
        };
        record.bot_status = match id % 3 {
            0 => BotStatus::Yes,
            1 => BotStatus::No,
            _ => BotStatus::Unknown,
        };
        record.is_joined = id % 4 != 0;
        record.message_count_total = (id % 6) as u64;
        record.message_count_this_session = (id % 3).min(id % 6) as u64;
        record.is_recent_chatter = id % 7 == 0;
        record.is_banned = id % 11 == 0;
        record.timeout_remaining_seconds = if id % 9 == 0 { 300 } else { 0 };
        record.is_whitelisted = id % 8 == 0;
        record.is_watched = id % 10 == 0;
        record.is_new_account = id % 13 == 0;
        batch.push(record);
    }
    batch
}

fn roster_ids(reconciler: &RosterReconciler) -> Vec<ViewerId> {
    reconciler.viewers().iter().map(|v| v.read().id()).collect()
}

fn assert_coherent(reconciler: &RosterReconciler, batch: &[ViewerRecord]) {
    let ids = roster_ids(reconciler);
    let unique: HashSet<ViewerId> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len(), "duplicate ids in roster");

    let classifier = reconciler.classifier();
    let expected: HashSet<ViewerId> = batch
        .iter()
        .filter(|record| classifier.classify(record, reconciler.filter()))
        .map(|record| record.id)
        .collect();
    assert_eq!(unique, expected);

    let indexed: HashSet<ViewerId> = reconciler.index().ids().collect();
    assert_eq!(indexed, unique);
    for viewer in reconciler.viewers() {
        let id = viewer.read().id();
        let from_index = reconciler.index().lookup(id).unwrap();
        assert!(Arc::ptr_eq(viewer, &from_index));
    }
}

#[test]
fn roster_matches_classifier_under_many_filters() {
    let batch = assorted_batch();
    let mut reconciler = RosterReconciler::default();
    reconciler.sync(batch.clone());
    assert_coherent(&reconciler, &batch);

    let steps = [
        (Toggle::KnownBot, false),
        (Toggle::Lurking, false),
        (Toggle::Banned, false),
        (Toggle::Lurking, true),
        (Toggle::Pleb, false),
        (Toggle::Missing, false),
        (Toggle::ShowAll, true),
        (Toggle::Current, false),
        (Toggle::RecentlyChatting, true),
        (Toggle::NotWatched, false),
    ];
    for (toggle, value) in steps {
        reconciler.set_toggle(toggle, value);
        assert!(reconciler.filter().is_consistent());
        assert_coherent(&reconciler, &batch);
    }
}

#[test]
fn identity_survives_updates_and_filter_churn_elsewhere() {
    let batch = assorted_batch();
    let mut reconciler = RosterReconciler::default();
    reconciler.sync(batch.clone());
    let before: Vec<SharedViewer> = reconciler.viewers().to_vec();

    reconciler.set_toggle(Toggle::KnownBot, false);

    let mut next = batch.clone();
    for record in next.iter_mut() {
        record.total_view_seconds += 60;
    }
    reconciler.sync(next.clone());
    assert_coherent(&reconciler, &next);

    for viewer in reconciler.viewers() {
        let id = viewer.read().id();
        let original = before.iter().find(|v| v.read().id() == id).unwrap();
        assert!(Arc::ptr_eq(original, viewer), "viewer {} was re-created", id);
    }
}

#[test]
fn second_identical_sync_is_silent() {
    let batch = assorted_batch();
    let mut reconciler = RosterReconciler::new(Classifier::default(), FilterState::default().with_toggle(Toggle::Vip, false));
    reconciler.sync(batch.clone());
    let report = reconciler.sync(batch);
    assert!(report.added.is_empty());
    assert!(report.removed.is_empty());
    assert!(report.updated.is_empty());
    assert!(report.events.is_empty());
}

#[test]
fn scenario_lurking_vip_joins_then_vip_hidden() {
    let mut reconciler = RosterReconciler::default();
    let report = reconciler.sync(vec![lurking_vip(1)]);
    assert_eq!(report.added, vec![1]);
    assert!(reconciler.index().lookup(1).is_some());

    reconciler.set_toggle(Toggle::Vip, false);
    let report = reconciler.sync(vec![lurking_vip(1)]);
    assert!(report.is_empty(), "already removed by the toggle re-filter");
    assert!(reconciler.is_empty());
    assert!(reconciler.index().lookup(1).is_none());
}

#[test]
fn scenario_first_message_updates_in_place() {
    let mut reconciler = RosterReconciler::new(
        Classifier::default(),
        FilterState::default().with_toggle(Toggle::Missing, false),
    );
    reconciler.sync(vec![lurking_vip(1)]);
    let original = reconciler.index().lookup(1).unwrap();

    let mut chatting = lurking_vip(1);
    chatting.message_count_this_session = 1;
    chatting.message_count_total = 1;
    let report = reconciler.sync(vec![chatting]);

    let current = reconciler.index().lookup(1).unwrap();
    assert!(Arc::ptr_eq(&original, &current));
    let fields = &report.updated[0].fields;
    assert_eq!(fields.iter().filter(|f| **f == Field::NumMessagesReport).count(), 1);
    assert!(fields.contains(&Field::MessageCountThisSession));
    assert_eq!(current.read().num_messages_report(), "1 / 1");
}

#[test]
fn scenario_viewer_leaves() {
    let mut reconciler = RosterReconciler::default();
    reconciler.sync(vec![lurking_vip(1), lurking_vip(2)]);
    let report = reconciler.sync(vec![lurking_vip(2)]);
    assert_eq!(report.removed, vec![1]);
    assert_eq!(roster_ids(&reconciler), vec![2]);
}

#[test]
fn duplicate_of_a_listed_viewer_updates_it_in_place() {
    let mut reconciler = RosterReconciler::default();
    reconciler.sync(vec![lurking_vip(1), lurking_vip(2)]);
    let original = reconciler.index().lookup(1).unwrap();

    let mut renamed = lurking_vip(1);
    renamed.display_name = "Renamed".to_string();
    renamed.note = "flagged twice".to_string();
    let report = reconciler.sync(vec![lurking_vip(1), lurking_vip(2), renamed]);

    assert_eq!(report.duplicates, vec![1]);
    assert!(report.added.is_empty());
    assert!(report.removed.is_empty());
    assert_eq!(roster_ids(&reconciler), vec![1, 2]);

    let current = reconciler.index().lookup(1).unwrap();
    assert!(Arc::ptr_eq(&original, &current));
    assert!(Arc::ptr_eq(&current, &reconciler.viewers()[0]));
    assert_eq!(current.read().record().display_name, "Renamed");
    assert_eq!(current.read().record().note, "flagged twice");
    let fields = &report.updated[0].fields;
    assert!(fields.contains(&Field::DisplayName));
    assert!(fields.contains(&Field::Note));
}

#[test]
fn empty_snapshot_clears_the_roster() {
    let mut reconciler = RosterReconciler::default();
    reconciler.sync(assorted_batch());
    assert!(!reconciler.is_empty());
    let report = reconciler.sync(Vec::new());
    assert_eq!(report.removed.len(), 30);
    assert!(reconciler.is_empty());
    assert!(reconciler.index().is_empty());
}
