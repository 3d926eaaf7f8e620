use std::sync::Arc;

use crate::backend::BackendClient;
use crate::config::CounterSettings;
use crate::controllers::InFlight;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn BackendClient>,
    pub in_flight: InFlight,
    pub counters: CounterSettings,
}

impl AppState {
    pub fn new(client: Arc<dyn BackendClient>, counters: CounterSettings) -> Self {
        Self {
            client,
            in_flight: InFlight::new(),
            counters,
        }
    }
}
