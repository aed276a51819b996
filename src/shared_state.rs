use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::Client;

use crate::config::Config;

/// Per-process shared state: parsed configuration, one reused HTTP client
/// for the two upstream APIs, and the runtime offline-mode flag.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<Config>,
    http: Client,
    /// Offline mode flag — toggled at runtime via API
    offline_mode: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let offline = config.offline_mode;
        Self {
            config: Arc::new(config),
            http: Client::new(),
            offline_mode: Arc::new(AtomicBool::new(offline)),
        }
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn is_offline(&self) -> bool {
        self.offline_mode.load(Ordering::Relaxed)
    }

    pub fn set_offline(&self, value: bool) {
        self.offline_mode.store(value, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_flag_starts_from_config_and_toggles() {
        let mut config = Config::default();
        config.offline_mode = true;

        let state = AppState::new(config);
        assert!(state.is_offline());

        state.set_offline(false);
        assert!(!state.is_offline());

        // Clones share the flag.
        let clone = state.clone();
        clone.set_offline(true);
        assert!(state.is_offline());
    }
}
