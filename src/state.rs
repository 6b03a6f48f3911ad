use std::sync::Arc;

use crate::config::Config;

/// Shared state for the proxy routes. The control plane holds no
/// memory or agent state of its own; everything here is fixed at
/// startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
        }
    }

    pub fn dataplane_url(&self) -> &str {
        self.config.dataplane_api_url.trim_end_matches('/')
    }
}
