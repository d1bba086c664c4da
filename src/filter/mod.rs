pub(crate) mod classifier;
mod errors;
mod state;

pub use classifier::{Classifier, Stage};
pub use errors::FilterError;
pub use state::{FilterState, Toggle};
