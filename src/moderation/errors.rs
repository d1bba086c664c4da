use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModerationError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Moderation core unavailable: {0}")]
    Unavailable(String),
}
