use thiserror::Error;
use crate::moderation::ModerationError;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Dashboard task is no longer running")]
    Closed,

    #[error("Moderation core error: {0}")]
    Moderation(#[from] ModerationError),
}
