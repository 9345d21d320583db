//! Pending attendance intents per chat user.
//!
//! A user first says what they are about to record (arriving or leaving) and
//! then confirms. The intent sits here in between.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::AttendanceField;

/// What a user has announced they are about to record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingIntent {
    /// The user is arriving.
    Arrival,
    /// The user is leaving.
    Departure,
}

impl PendingIntent {
    /// The record field this intent writes on confirmation.
    pub fn field(self) -> AttendanceField {
        match self {
            PendingIntent::Arrival => AttendanceField::Arrival,
            PendingIntent::Departure => AttendanceField::Departure,
        }
    }
}

/// Pending intents keyed by user id.
///
/// # Example
///
/// ```
/// use attendance_engine::session::{PendingIntent, SessionRegistry};
///
/// let sessions = SessionRegistry::new();
/// sessions.begin("42", PendingIntent::Arrival).unwrap();
/// assert_eq!(sessions.confirm("42").unwrap(), PendingIntent::Arrival);
/// assert!(sessions.confirm("42").is_err());
/// ```
#[derive(Debug, Default)]
pub struct SessionRegistry {
    pending: Mutex<HashMap<String, PendingIntent>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> EngineResult<MutexGuard<'_, HashMap<String, PendingIntent>>> {
        self.pending.lock().map_err(|_| EngineError::Store {
            message: "session registry lock poisoned".to_string(),
        })
    }

    /// Sets the pending intent for `user_id`, replacing any earlier one.
    pub fn begin(&self, user_id: &str, intent: PendingIntent) -> EngineResult<()> {
        let previous = self.lock()?.insert(user_id.to_string(), intent);
        debug!(user_id = %user_id, ?intent, ?previous, "Pending intent set");
        Ok(())
    }

    /// Takes and clears the pending intent for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoPendingIntent`] if nothing is pending.
    pub fn confirm(&self, user_id: &str) -> EngineResult<PendingIntent> {
        self.lock()?
            .remove(user_id)
            .ok_or_else(|| EngineError::NoPendingIntent {
                user_id: user_id.to_string(),
            })
    }

    /// Returns the pending intent for `user_id` without clearing it.
    pub fn pending(&self, user_id: &str) -> EngineResult<Option<PendingIntent>> {
        Ok(self.lock()?.get(user_id).copied())
    }
}
