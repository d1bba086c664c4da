mod events;
mod fields;
mod index;
mod reconciler;
mod view_model;

pub use events::{FilterChange, RemovalReason, RosterEvent, SyncReport, ViewerUpdate};
pub use fields::Field;
pub use index::RosterIndex;
pub use reconciler::RosterReconciler;
pub use view_model::{Highlight, SharedViewer, ViewerViewModel};
