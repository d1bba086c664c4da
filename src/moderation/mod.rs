mod client;
mod errors;
mod snapshot_file;

pub use client::{ModerationCore, Snapshot};
pub use errors::ModerationError;
pub use snapshot_file::SnapshotFileCore;
