//! Application state for the attendance API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{AttendanceRules, ConfigLoader};
use crate::session::SessionRegistry;
use crate::store::AttendanceStore;

/// Shared application state.
///
/// Holds the loaded rules, the attendance store and the pending chat intents.
/// Cloning is cheap; every clone shares the same store and sessions.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<dyn AttendanceStore>,
    sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// Creates a new application state over the given configuration and store.
    pub fn new(config: ConfigLoader, store: Arc<dyn AttendanceStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            sessions: Arc::new(SessionRegistry::new()),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the attendance rules in effect.
    pub fn rules(&self) -> &AttendanceRules {
        self.config.rules()
    }

    /// Returns the attendance store.
    pub fn store(&self) -> &dyn AttendanceStore {
        self.store.as_ref()
    }

    /// Returns the pending intent registry.
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }
}
