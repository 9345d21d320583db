//! Attendance rules engine
//!
//! This crate records employee arrivals and departures and evaluates them
//! against a working-day schedule: arrivals after the effective limit are
//! late, working days with nothing recorded are absences, and both are fined
//! per billing cycle (the 15th of one month to the 14th of the next).
//!
//! The engine is pure and synchronous. History is read and written through
//! the [`store::AttendanceStore`] trait, and [`api`] exposes it over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod store;
