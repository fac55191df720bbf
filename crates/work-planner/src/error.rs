//! Error types for work-planner operations.

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("Invalid work period: end {end} is not after start {start}")]
    InvalidPeriod {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Periods cannot span more than two days: {start} to {end}")]
    PeriodTooLong {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Work periods cannot overlap: {existing} and {rejected}")]
    Overlap { existing: String, rejected: String },

    #[error("Invalid task: {0}")]
    InvalidTask(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
