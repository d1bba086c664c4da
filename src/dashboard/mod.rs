mod errors;
mod handle;
mod manager;
mod models;

pub use errors::DashboardError;
pub use handle::DashboardHandle;
pub use manager::Dashboard;
pub use models::DashboardEvent;
