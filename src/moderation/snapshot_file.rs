use std::path::{Path, PathBuf};
use async_trait::async_trait;
use log::debug;
use crate::moderation::client::{ModerationCore, Snapshot};
use crate::moderation::errors::ModerationError;
use crate::viewers::{AggregateStats, ViewerRecord};

/// Reads the moderation core's state from a JSON file on every fetch, so an
/// external process can rewrite the file between polls.
pub struct SnapshotFileCore {
    path: PathBuf,
}

impl SnapshotFileCore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn load(&self) -> Result<Snapshot, ModerationError> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let snapshot: Snapshot = serde_json::from_str(&contents)?;
        debug!("Loaded {} viewer records from {:?}", snapshot.viewers.len(), self.path);
        Ok(snapshot)
    }
}

#[async_trait]
impl ModerationCore for SnapshotFileCore {
    async fn fetch_viewer_records(&self) -> Result<Vec<ViewerRecord>, ModerationError> {
        Ok(self.load().await?.viewers)
    }

    async fn fetch_aggregate_stats(&self) -> Result<AggregateStats, ModerationError> {
        Ok(self.load().await?.stats)
    }

    async fn fetch_snapshot(&self) -> Result<Snapshot, ModerationError> {
        self.load().await
    }
}
