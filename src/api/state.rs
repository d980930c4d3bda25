//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::page::PageComposer;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Composes the overview page; owns the overview source and series cache
    pub composer: Arc<PageComposer>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(composer: PageComposer, config: ServerConfig) -> Self {
        Self {
            composer: Arc::new(composer),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
