//! Calendar mutation engine.
//!
//! Holds the authoritative assignment set and applies point mutations
//! (drag-and-drop moves, manual additions) and bulk replacement.
//!
//! # Notification
//! Observers run synchronously, in subscription order, after a mutation
//! has been applied. A failed mutation changes nothing and notifies no
//! one. Subscription is add-only for the calendar's lifetime.
//!
//! Moves are last-write-wins; there is no version check.

use chrono::NaiveDate;
use std::fmt;
use tracing::info;

use crate::error::{Result, RosterError};
use crate::models::{normalize_date, CalendarAssignment, DateInput};

/// A change applied to the calendar.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarEvent {
    /// The whole set was replaced.
    Replaced { count: usize },
    /// One assignment was added.
    Added { id: String },
    /// One assignment changed cell.
    Moved {
        id: String,
        from_worker: String,
        from_date: NaiveDate,
        to_worker: String,
        to_date: NaiveDate,
    },
}

/// Receives calendar change notifications.
pub trait CalendarObserver {
    fn on_calendar_event(&self, event: &CalendarEvent);
}

impl<F> CalendarObserver for F
where
    F: Fn(&CalendarEvent),
{
    fn on_calendar_event(&self, event: &CalendarEvent) {
        self(event)
    }
}

/// The in-memory assignment set with change notification.
#[derive(Default)]
pub struct AssignmentCalendar {
    assignments: Vec<CalendarAssignment>,
    observers: Vec<Box<dyn CalendarObserver>>,
}

impl fmt::Debug for AssignmentCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssignmentCalendar")
            .field("assignments", &self.assignments)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl AssignmentCalendar {
    /// Creates an empty calendar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calendar seeded with assignments. No notification.
    pub fn with_assignments(assignments: Vec<CalendarAssignment>) -> Self {
        Self {
            assignments,
            observers: Vec::new(),
        }
    }

    /// Registers an observer.
    pub fn subscribe<O: CalendarObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&self, event: CalendarEvent) {
        for observer in &self.observers {
            observer.on_calendar_event(&event);
        }
    }

    /// Replaces the whole assignment set.
    pub fn replace_all(&mut self, assignments: Vec<CalendarAssignment>) {
        self.assignments = assignments;
        let count = self.assignments.len();
        info!(count, "calendar replaced");
        self.notify(CalendarEvent::Replaced { count });
    }

    /// Appends one assignment.
    pub fn add_assignment(&mut self, assignment: CalendarAssignment) {
        let id = assignment.id.clone();
        self.assignments.push(assignment);
        self.notify(CalendarEvent::Added { id });
    }

    /// Moves an assignment to another worker and/or date.
    ///
    /// Stage, hours, and batch are kept. The date is normalized first, so
    /// a bad date leaves the calendar untouched.
    pub fn move_assignment(
        &mut self,
        assignment_id: &str,
        target_worker_id: &str,
        target_date: impl Into<DateInput>,
    ) -> Result<&CalendarAssignment> {
        let to_date = normalize_date(target_date)?;
        let idx = self
            .assignments
            .iter()
            .position(|a| a.id == assignment_id)
            .ok_or_else(|| RosterError::AssignmentNotFound(assignment_id.to_string()))?;

        let assignment = &mut self.assignments[idx];
        let from_worker = std::mem::replace(&mut assignment.worker_id, target_worker_id.to_string());
        let from_date = std::mem::replace(&mut assignment.date, to_date);

        info!(
            id = assignment_id,
            from_worker = %from_worker,
            %from_date,
            to_worker = target_worker_id,
            %to_date,
            "assignment moved"
        );
        self.notify(CalendarEvent::Moved {
            id: assignment_id.to_string(),
            from_worker,
            from_date,
            to_worker: target_worker_id.to_string(),
            to_date,
        });
        Ok(&self.assignments[idx])
    }

    /// All assignments in a (worker, date) cell. A cell can hold several.
    pub fn assignments_for_cell(
        &self,
        worker_id: &str,
        date: impl Into<DateInput>,
    ) -> Result<Vec<&CalendarAssignment>> {
        let date = normalize_date(date)?;
        Ok(self
            .assignments
            .iter()
            .filter(|a| a.is_in_cell(worker_id, date))
            .collect())
    }

    /// Finds an assignment by id.
    pub fn get(&self, assignment_id: &str) -> Option<&CalendarAssignment> {
        self.assignments.iter().find(|a| a.id == assignment_id)
    }

    /// Whether an id is in use.
    pub fn contains(&self, assignment_id: &str) -> bool {
        self.get(assignment_id).is_some()
    }

    /// All assignments for a worker.
    pub fn assignments_for_worker(&self, worker_id: &str) -> Vec<&CalendarAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.worker_id == worker_id)
            .collect()
    }

    /// All assignments on a date.
    pub fn assignments_on(&self, date: NaiveDate) -> Vec<&CalendarAssignment> {
        self.assignments.iter().filter(|a| a.date == date).collect()
    }

    /// The assignment set as a slice.
    pub fn as_slice(&self) -> &[CalendarAssignment] {
        &self.assignments
    }

    /// Iterates assignments.
    pub fn iter(&self) -> std::slice::Iter<'_, CalendarAssignment> {
        self.assignments.iter()
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the calendar is empty.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
