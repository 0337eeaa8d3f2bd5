use std::sync::Arc;
use std::time::Instant;

use reelscout_core::{Config, SanitizedConfig, SearchService};

/// Shared application state
pub struct AppState {
    config: Config,
    search: Arc<SearchService>,
    started_at: Instant,
}

impl AppState {
    pub fn new(config: Config, search: Arc<SearchService>) -> Self {
        Self {
            config,
            search,
            started_at: Instant::now(),
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn search(&self) -> &SearchService {
        self.search.as_ref()
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
