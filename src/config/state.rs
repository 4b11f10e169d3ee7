// Application state module
// Shared, read-only runtime state handed to every connection

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,

    /// Resolved list file location
    pub list_path: PathBuf,

    // Cached config values for fast access without locks
    pub cached_access_log: AtomicBool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            list_path: PathBuf::from(&config.list.path),
            cached_access_log: AtomicBool::new(config.logging.access_log),
        }
    }

    /// Whether access logging is on (lock-free)
    pub fn access_log_enabled(&self) -> bool {
        self.cached_access_log.load(Ordering::Relaxed)
    }
}
