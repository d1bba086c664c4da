use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Invalid viewer id: {0}")]
    InvalidId(i64),

    #[error("Unknown viewer role: {0}")]
    UnknownRole(String),
}
