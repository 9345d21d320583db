//! Configuration loading and management for the attendance rules engine.
//!
//! This module provides functionality to load attendance rules from YAML files:
//! the working-day clock thresholds, the weekly rest day, and the fine amounts.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/attendance").unwrap();
//! println!("Late fine: {}", config.rules().fines.late_per_day);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ABSENCE_FINE_PER_DAY, ABSENCE_MARKER, AttendanceRules, EXTENDED_ARRIVAL_1, EXTENDED_ARRIVAL_2,
    FINE_PER_DAY, FineConfig, OVERTIME_GREEN_END, OVERTIME_YELLOW_START, ScheduleConfig,
    VERY_LATE_LEAVE, WORK_END, WORK_START,
};
