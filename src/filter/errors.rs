use thiserror::Error;
use crate::filter::classifier::Stage;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown filter toggle: {0}")]
    UnknownToggle(String),

    #[error("Unknown classifier stage: {0}")]
    UnknownStage(String),

    #[error("Classifier stage listed more than once: {0}")]
    DuplicateStage(Stage),

    #[error("Classifier stage missing from order: {0}")]
    MissingStage(Stage),
}
