use std::time::Duration;

use crate::config::Config;
use crate::store::Store;
use crate::transport::latency::{FaultPolicy, Latency};

/// Shared state injected into all mock route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    /// Delay and fault injection applied by every handler.
    pub latency: Latency,
}

impl AppState {
    pub fn new(store: Store, config: &Config) -> Self {
        AppState {
            store,
            latency: Latency::new(
                Duration::from_millis(config.mock_latency_ms),
                FaultPolicy::new(config.mock_failure_rate),
            ),
        }
    }
}
