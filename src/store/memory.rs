//! In-memory attendance store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceField, DayRecord, WriteOutcome, is_unset};

use super::AttendanceStore;

#[derive(Debug, Default)]
struct Inner {
    roster: Vec<String>,
    records: HashMap<(String, NaiveDate), DayRecord>,
}

impl Inner {
    fn register(&mut self, name: &str) -> bool {
        if self.roster.iter().any(|existing| existing == name) {
            return false;
        }
        self.roster.push(name.to_string());
        true
    }
}

/// An [`AttendanceStore`] held in process memory.
///
/// All state sits behind one [`RwLock`], so a set-if-absent write is a single
/// critical section and concurrent writers to the same field cannot both win.
///
/// # Example
///
/// ```
/// use attendance_engine::store::{AttendanceStore, InMemoryStore};
/// use chrono::NaiveDate;
///
/// let store = InMemoryStore::new();
/// let date = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
///
/// assert!(store.set_arrival("Aziz", date, "08:05").unwrap().is_recorded());
/// assert!(!store.set_arrival("Aziz", date, "08:30").unwrap().is_recorded());
/// assert_eq!(store.list_employees().unwrap(), vec!["Aziz".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with the given roster and no records.
    pub fn with_employees<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut inner = Inner::default();
        for name in names {
            inner.register(name.as_ref());
        }
        Self {
            inner: RwLock::new(inner),
        }
    }
}

fn poisoned<T>(_: PoisonError<T>) -> EngineError {
    EngineError::Store {
        message: "attendance store lock poisoned".to_string(),
    }
}

impl AttendanceStore for InMemoryStore {
    fn list_employees(&self) -> EngineResult<Vec<String>> {
        Ok(self.inner.read().map_err(poisoned)?.roster.clone())
    }

    fn register_employee(&self, name: &str) -> EngineResult<bool> {
        let added = self.inner.write().map_err(poisoned)?.register(name);
        if added {
            debug!(employee = %name, "Registered employee");
        }
        Ok(added)
    }

    fn get_day_record(&self, employee: &str, date: NaiveDate) -> EngineResult<DayRecord> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner
            .records
            .get(&(employee.to_string(), date))
            .cloned()
            .unwrap_or_else(|| DayRecord::empty(date)))
    }

    fn set_field(
        &self,
        employee: &str,
        date: NaiveDate,
        field: AttendanceField,
        value: &str,
    ) -> EngineResult<WriteOutcome> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.register(employee);

        let record = inner
            .records
            .entry((employee.to_string(), date))
            .or_insert_with(|| DayRecord::empty(date));

        let slot = match field {
            AttendanceField::Arrival => &mut record.arrival,
            AttendanceField::Departure => &mut record.departure,
        };

        if !is_unset(slot.as_deref()) {
            let existing = slot.clone().unwrap_or_default();
            debug!(employee = %employee, %date, %field, existing = %existing, "Field already set");
            return Ok(WriteOutcome::AlreadySet { existing });
        }

        *slot = Some(value.to_string());
        debug!(employee = %employee, %date, %field, value = %value, "Recorded attendance");
        Ok(WriteOutcome::Recorded)
    }

    fn mark_if_blank(&self, employee: &str, date: NaiveDate, marker: &str) -> EngineResult<bool> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let record = inner
            .records
            .entry((employee.to_string(), date))
            .or_insert_with(|| DayRecord::empty(date));

        if !record.is_blank() {
            debug!(employee = %employee, %date, "Day has entries, not marking");
            return Ok(false);
        }

        record.arrival = Some(marker.to_string());
        record.departure = Some(marker.to_string());
        inner.register(employee);
        debug!(employee = %employee, %date, marker = %marker, "Marked day absent");
        Ok(true)
    }
}
