mod errors;
pub(crate) mod models;
mod roles;

pub use errors::RecordError;
pub use models::{AggregateStats, BotStatus, ViewerId, ViewerRecord};
pub use roles::Role;
