use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::moderation::errors::ModerationError;
use crate::viewers::{AggregateStats, ViewerRecord};

/// Everything the dashboard needs for one tick, taken from a single read of
/// the moderation core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub viewers: Vec<ViewerRecord>,
    pub stats: AggregateStats,
}

/// The moderation core that tracks viewers. Each call returns a complete
/// snapshot, never a delta.
#[async_trait]
pub trait ModerationCore: Send + Sync {
    async fn fetch_viewer_records(&self) -> Result<Vec<ViewerRecord>, ModerationError>;

    async fn fetch_aggregate_stats(&self) -> Result<AggregateStats, ModerationError>;

    /// Viewers and stats for one polling tick. Cores that can produce both
    /// from one read should override this.
    async fn fetch_snapshot(&self) -> Result<Snapshot, ModerationError> {
        let stats = self.fetch_aggregate_stats().await?;
        let viewers = self.fetch_viewer_records().await?;
        Ok(Snapshot { viewers, stats })
    }
}
