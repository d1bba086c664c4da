use std::collections::HashMap;
use crate::roster::view_model::SharedViewer;
use crate::viewers::ViewerId;

/// id -> roster entry, kept in lock-step with the reconciler's ordered list.
#[derive(Debug, Default)]
pub struct RosterIndex {
    viewers: HashMap<ViewerId, SharedViewer>,
}

impl RosterIndex {
    pub fn lookup(&self, id: ViewerId) -> Option<SharedViewer> {
        self.viewers.get(&id).cloned()
    }

    pub fn contains(&self, id: ViewerId) -> bool {
        self.viewers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.viewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewers.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ViewerId> + '_ {
        self.viewers.keys().copied()
    }

    pub(crate) fn insert(&mut self, id: ViewerId, viewer: SharedViewer) {
        self.viewers.insert(id, viewer);
    }

    pub(crate) fn remove(&mut self, id: ViewerId) -> Option<SharedViewer> {
        self.viewers.remove(&id)
    }
}
