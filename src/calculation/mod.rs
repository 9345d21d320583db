//! Calculation logic for the attendance rules engine.
//!
//! This module contains the billing cycle calculation, arrival limit
//! resolution from the previous day's departure, daily attendance
//! classification, departure status, fine aggregation and report building
//! for a cycle, and absence marking.

mod absence_marking;
mod arrival_limit;
mod classification;
mod cycle;
mod departure;
mod fines;
mod rest_day;

pub use absence_marking::{AbsenceMark, mark_absences};
pub use arrival_limit::{ArrivalLimit, LimitBasis, effective_limit};
pub use classification::{classify, classify_day};
pub use cycle::{CYCLE_END_DAY, CYCLE_START_DAY, cycle_bounds};
pub use departure::classify_departure;
pub use fines::{build_report, compute_fines, summarize};
pub use rest_day::is_rest_day;
