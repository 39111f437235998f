//! Input validation for rosters and assignment sets.
//!
//! Checks structural integrity before data is handed to the scheduler
//! (for example after loading from a record source). Detects:
//! - Duplicate worker or assignment IDs
//! - Non-positive weekly capacity
//! - Allocations beyond one work week
//! - Assignments referencing unknown workers
//! - Non-positive assignment hours
//! - Assignments dated on a weekend
//!
//! Unlike [`crate::error::RosterError`], which stops at the first
//! problem, validation collects every issue it finds.

use std::collections::HashSet;

use crate::models::{is_weekend, CalendarAssignment, Worker};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// Weekly capacity is zero, negative, or not finite.
    InvalidCapacity,
    /// Stage allocations add up to more than one week.
    OverAllocated,
    /// An assignment references a worker not on the roster.
    UnknownWorker,
    /// Assignment hours are zero, negative, or not finite.
    InvalidHours,
    /// An assignment falls on Saturday or Sunday.
    WeekendDate,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a worker roster.
///
/// Checks:
/// 1. No duplicate worker IDs
/// 2. Weekly capacity is positive
/// 3. Stage allocations fit in one week
pub fn validate_roster(workers: &[Worker]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for w in workers {
        if !ids.insert(w.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate worker ID: {}", w.id),
            ));
        }

        if !w.weekly_capacity.is_finite() || w.weekly_capacity <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!(
                    "Worker '{}' has invalid weekly capacity {}",
                    w.id, w.weekly_capacity
                ),
            ));
        }

        if w.is_over_allocated() {
            errors.push(ValidationError::new(
                ValidationErrorKind::OverAllocated,
                format!(
                    "Worker '{}' is allocated {} days in a 5-day week",
                    w.id,
                    w.total_allocated_days()
                ),
            ));
        }
    }

    finish(errors)
}

/// Validates an assignment set against a roster.
///
/// Checks:
/// 1. No duplicate assignment IDs
/// 2. Every worker reference resolves
/// 3. Hours are positive
/// 4. Dates are weekdays
pub fn validate_assignments(
    assignments: &[CalendarAssignment],
    workers: &[Worker],
) -> ValidationResult {
    let mut errors = Vec::new();
    let worker_ids: HashSet<&str> = workers.iter().map(|w| w.id.as_str()).collect();
    let mut ids = HashSet::new();

    for a in assignments {
        if !ids.insert(a.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate assignment ID: {}", a.id),
            ));
        }

        if !worker_ids.contains(a.worker_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownWorker,
                format!(
                    "Assignment '{}' references unknown worker '{}'",
                    a.id, a.worker_id
                ),
            ));
        }

        if !a.hours.is_finite() || a.hours <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidHours,
                format!("Assignment '{}' has invalid hours {}", a.id, a.hours),
            ));
        }

        if is_weekend(a.date) {
            errors.push(ValidationError::new(
                ValidationErrorKind::WeekendDate,
                format!("Assignment '{}' is dated on a weekend ({})", a.id, a.date),
            ));
        }
    }

    finish(errors)
}
