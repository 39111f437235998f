//! Error types for roster and calendar operations.
//!
//! Every variant is a recoverable validation failure meant to be shown
//! to the caller. Structural checks that collect several problems at once
//! live in [`crate::validation`] instead.

use thiserror::Error;

/// Result type for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;

/// Errors raised by the capacity model, generator, and calendar.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    /// A worker id does not resolve to a roster entry.
    #[error("unknown worker: {0}")]
    UnknownWorker(String),

    /// A worker with this id is already on the roster.
    #[error("duplicate worker: {0}")]
    DuplicateWorker(String),

    /// A stage name is not part of the production taxonomy.
    #[error("unknown stage: {0}")]
    UnknownStage(String),

    /// A day count is not a half-day multiple in [0, 5].
    #[error("invalid day increment: {0} (expected a multiple of 0.5 between 0 and 5)")]
    InvalidDayIncrement(f64),

    /// Weekly capacity must be a positive finite number of hours.
    #[error("invalid weekly capacity: {0}")]
    InvalidCapacity(f64),

    /// Assignment hours must be a positive finite number.
    #[error("invalid hours: {0}")]
    InvalidHours(f64),

    /// No assignment carries this id (stale drag source).
    #[error("assignment not found: {0}")]
    AssignmentNotFound(String),

    /// A date input could not be normalized to a calendar day.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    /// A worker's stage allocations do not fit in one work week.
    #[error("worker {worker_id} allocates {allocated} days, week holds {limit}")]
    AllocationExceedsWeek {
        worker_id: String,
        allocated: f64,
        limit: f64,
    },

    /// Configuration could not be read, parsed, or is out of range.
    #[error("configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = RosterError::UnknownWorker("w9".into());
        assert_eq!(e.to_string(), "unknown worker: w9");

        let e = RosterError::InvalidDate("yesterday".into());
        assert_eq!(e.to_string(), "invalid date: \"yesterday\"");

        let e = RosterError::AllocationExceedsWeek {
            worker_id: "w1".into(),
            allocated: 6.5,
            limit: 5.0,
        };
        assert_eq!(e.to_string(), "worker w1 allocates 6.5 days, week holds 5");
    }
}
