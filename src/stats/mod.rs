mod view;

pub use view::{StatsField, StatsView};
