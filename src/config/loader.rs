//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading attendance
//! rules from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AttendanceRules, FineConfig, ScheduleConfig};

/// Loads and provides access to attendance rules.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// assembles them into [`AttendanceRules`] and validates the result.
///
/// # Directory Structure
///
/// ```text
/// config/attendance/
/// ├── schedule.yaml   # Clock thresholds and the rest day
/// └── fines.yaml      # Fine amounts and the absence marker
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/attendance").unwrap();
/// println!("Work starts at {}", loader.rules().schedule.work_start);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    rules: AttendanceRules,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/attendance")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML or values
    /// - The thresholds are inconsistent (see [`AttendanceRules::validate`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let schedule = Self::load_yaml::<ScheduleConfig>(&path.join("schedule.yaml"))?;
        let fines = Self::load_yaml::<FineConfig>(&path.join("fines.yaml"))?;

        let rules = AttendanceRules { schedule, fines };
        rules.validate()?;

        Ok(Self { rules })
    }

    /// Wraps already-assembled rules, validating them.
    pub fn from_rules(rules: AttendanceRules) -> EngineResult<Self> {
        rules.validate()?;
        Ok(Self { rules })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded rules.
    pub fn rules(&self) -> &AttendanceRules {
        &self.rules
    }
}
