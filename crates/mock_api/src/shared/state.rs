use super::config::Config;
use super::store::Store;
use contracts::dashboards::d400_sensors::ControlDataUpdate;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Pending telemetry per subscriber before it starts lagging
const TELEMETRY_CHANNEL_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<RwLock<Store>>,
    /// Fan-out to sockets that joined the dashboard
    pub telemetry: broadcast::Sender<ControlDataUpdate>,
}

impl AppState {
    pub fn new(config: Config, store: Store) -> Self {
        let (telemetry, _) = broadcast::channel(TELEMETRY_CHANNEL_CAPACITY);
        Self {
            config: Arc::new(config),
            store: Arc::new(RwLock::new(store)),
            telemetry,
        }
    }

    /// Sends to current subscribers; nobody listening is not an error.
    pub fn publish(&self, update: ControlDataUpdate) {
        match self.telemetry.send(update) {
            Ok(receivers) => tracing::trace!(receivers, "telemetry published"),
            Err(_) => tracing::trace!("telemetry dropped, no subscribers"),
        }
    }
}
