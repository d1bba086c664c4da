use tokio::sync::{broadcast, mpsc, oneshot};
use crate::dashboard::errors::DashboardError;
use crate::dashboard::models::{DashboardCommand, DashboardEvent};
use crate::filter::{FilterState, Toggle};
use crate::roster::SharedViewer;
use crate::viewers::ViewerId;

/// Cloneable front door to a running [`super::Dashboard`].
#[derive(Clone)]
pub struct DashboardHandle {
    commands: mpsc::Sender<DashboardCommand>,
    events: broadcast::Sender<DashboardEvent>,
}

impl DashboardHandle {
    pub(crate) fn new(commands: mpsc::Sender<DashboardCommand>, events: broadcast::Sender<DashboardEvent>) -> Self {
        Self { commands, events }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> DashboardCommand,
    ) -> Result<T, DashboardError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(build(reply))
            .await
            .map_err(|_| DashboardError::Closed)?;
        response.await.map_err(|_| DashboardError::Closed)
    }

    /// Returns the toggles whose value changed.
    pub async fn set_toggle(&self, toggle: Toggle, value: bool) -> Result<Vec<Toggle>, DashboardError> {
        self.request(|reply| DashboardCommand::SetToggle { toggle, value, reply }).await
    }

    pub async fn lookup(&self, id: ViewerId) -> Result<Option<SharedViewer>, DashboardError> {
        self.request(|reply| DashboardCommand::Lookup { id, reply }).await
    }

    pub async fn filter(&self) -> Result<FilterState, DashboardError> {
        self.request(|reply| DashboardCommand::Filter { reply }).await
    }

    pub async fn roster(&self) -> Result<Vec<SharedViewer>, DashboardError> {
        self.request(|reply| DashboardCommand::Roster { reply }).await
    }

    /// Polls immediately instead of waiting for the next tick. A fetch
    /// failure comes back as [`DashboardError::Moderation`] and leaves the
    /// roster untouched.
    pub async fn refresh(&self) -> Result<(), DashboardError> {
        self.request(|reply| DashboardCommand::Refresh { reply }).await??;
        Ok(())
    }

    pub async fn stop(&self) -> Result<(), DashboardError> {
        self.commands
            .send(DashboardCommand::Stop)
            .await
            .map_err(|_| DashboardError::Closed)
    }
}
