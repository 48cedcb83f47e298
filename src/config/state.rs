// Application state module
// Shared state handed to the accept loop and request handlers

use std::sync::atomic::AtomicUsize;

use super::types::Config;

/// Application state
///
/// The configuration is immutable after startup; the only mutable piece is
/// the active connection counter, so request handling needs no locks.
pub struct AppState {
    pub config: Config,
    pub active_connections: AtomicUsize,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            active_connections: AtomicUsize::new(0),
        }
    }
}
