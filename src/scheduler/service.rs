//! Workforce scheduling service.
//!
//! One instance per process owns the roster, the calendar, and the
//! generator settings, and is passed by reference to whatever drives it
//! (UI handlers, tests). It is the single source of truth for both
//! collections; they are correlated only by worker id.

use chrono::NaiveDate;
use tracing::info;

use super::generator::AssignmentGenerator;
use super::utilization::{self, WeekUtilization};
use crate::calendar::{AssignmentCalendar, CalendarObserver};
use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::models::{normalize_date, CalendarAssignment, DateInput, Stage, WorkWeek, Worker};
use crate::roster::Roster;

/// Roster + calendar + generator behind one API.
///
/// # Example
///
/// ```
/// use u_roster::config::RosterConfig;
/// use u_roster::models::{Stage, Worker};
/// use u_roster::scheduler::WorkforceScheduler;
///
/// let mut scheduler = WorkforceScheduler::new(
///     vec![Worker::new("w1").with_name("Ana")],
///     RosterConfig::default(),
/// )
/// .unwrap();
/// scheduler.set_stage_allocation("w1", Stage::Intake, 4.0).unwrap();
/// scheduler.set_stage_allocation("w1", Stage::Sanding, 1.0).unwrap();
///
/// let count = scheduler.generate_week("2024-06-10").unwrap();
/// assert_eq!(count, 5);
///
/// let friday = scheduler.assignments_for_cell("w1", "2024-06-14").unwrap();
/// assert_eq!(friday[0].stage, Stage::Sanding);
/// assert_eq!(scheduler.available_hours("w1", "2024-06-14").unwrap(), 0.0);
/// ```
#[derive(Debug)]
pub struct WorkforceScheduler {
    roster: Roster,
    calendar: AssignmentCalendar,
    generator: AssignmentGenerator,
    manual_seq: u64,
}

impl WorkforceScheduler {
    /// Creates a service over an injected worker list with an empty calendar.
    ///
    /// Fails on duplicate worker ids or an invalid config.
    pub fn new(workers: Vec<Worker>, config: RosterConfig) -> Result<Self> {
        Self::with_roster(Roster::new(workers)?, config)
    }

    /// Creates a service over an already built roster.
    pub fn with_roster(roster: Roster, config: RosterConfig) -> Result<Self> {
        Ok(Self {
            roster,
            calendar: AssignmentCalendar::new(),
            generator: AssignmentGenerator::new(config)?,
            manual_seq: 0,
        })
    }

    /// The roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Mutable roster access for edits beyond stage allocations.
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    /// The calendar.
    pub fn calendar(&self) -> &AssignmentCalendar {
        &self.calendar
    }

    /// Generator settings.
    pub fn config(&self) -> &RosterConfig {
        self.generator.config()
    }

    /// Registers a calendar observer.
    pub fn subscribe<O: CalendarObserver + 'static>(&mut self, observer: O) {
        self.calendar.subscribe(observer);
    }

    /// Sets a worker's days on a stage. See [`Roster::set_stage_allocation`].
    pub fn set_stage_allocation(&mut self, worker_id: &str, stage: Stage, days: f64) -> Result<()> {
        self.roster.set_stage_allocation(worker_id, stage, days)
    }

    /// Lists workers, optionally only the available ones.
    pub fn list_workers(&self, only_available: bool) -> Vec<&Worker> {
        self.roster.list_workers(only_available)
    }

    /// Regenerates the whole calendar for the week containing `start`.
    ///
    /// Replaces every existing assignment, manual ones included. On error
    /// the calendar is left as it was. Returns the number of assignments.
    pub fn generate_week(&mut self, start: impl Into<DateInput>) -> Result<usize> {
        let week = WorkWeek::containing(normalize_date(start)?);
        let assignments = self.generator.generate(self.roster.workers(), week)?;
        let count = assignments.len();
        info!(week = %week.start(), count, "generated week");
        self.calendar.replace_all(assignments);
        Ok(count)
    }

    /// Moves an assignment to a worker and date (drag-and-drop).
    pub fn move_assignment(
        &mut self,
        assignment_id: &str,
        target_worker_id: &str,
        target_date: impl Into<DateInput>,
    ) -> Result<&CalendarAssignment> {
        if !self.roster.contains(target_worker_id) {
            return Err(RosterError::UnknownWorker(target_worker_id.to_string()));
        }
        self.calendar
            .move_assignment(assignment_id, target_worker_id, target_date)
    }

    /// Books a single assignment by hand, optionally against a batch.
    ///
    /// Returns the new assignment's id.
    pub fn assign_manual(
        &mut self,
        worker_id: &str,
        stage: Stage,
        date: impl Into<DateInput>,
        hours: f64,
        batch_id: Option<&str>,
    ) -> Result<String> {
        if !self.roster.contains(worker_id) {
            return Err(RosterError::UnknownWorker(worker_id.to_string()));
        }
        if !hours.is_finite() || hours <= 0.0 {
            return Err(RosterError::InvalidHours(hours));
        }
        let date = normalize_date(date)?;

        let id = loop {
            let candidate = format!("{worker_id}-{}-manual-{}", stage.key(), self.manual_seq);
            self.manual_seq += 1;
            if !self.calendar.contains(&candidate) {
                break candidate;
            }
        };

        let mut assignment = CalendarAssignment::new(&id, worker_id, stage, date, hours);
        if let Some(batch) = batch_id {
            assignment = assignment.with_batch(batch);
        }
        self.calendar.add_assignment(assignment);
        Ok(id)
    }

    /// Assignments in a (worker, date) cell.
    pub fn assignments_for_cell(
        &self,
        worker_id: &str,
        date: impl Into<DateInput>,
    ) -> Result<Vec<&CalendarAssignment>> {
        self.calendar.assignments_for_cell(worker_id, date)
    }

    fn require_worker(&self, worker_id: &str) -> Result<&Worker> {
        self.roster
            .worker(worker_id)
            .ok_or_else(|| RosterError::UnknownWorker(worker_id.to_string()))
    }

    /// Hours still free for a worker on a date.
    pub fn available_hours(&self, worker_id: &str, date: impl Into<DateInput>) -> Result<f64> {
        let worker = self.require_worker(worker_id)?;
        let date: NaiveDate = normalize_date(date)?;
        Ok(utilization::available_hours(
            worker,
            self.calendar.as_slice(),
            date,
        ))
    }

    /// Hours booked for a worker in the week containing `date`.
    pub fn scheduled_hours(&self, worker_id: &str, date: impl Into<DateInput>) -> Result<f64> {
        self.require_worker(worker_id)?;
        let week = WorkWeek::containing(normalize_date(date)?);
        Ok(utilization::scheduled_hours(
            self.calendar.as_slice(),
            worker_id,
            week,
        ))
    }

    /// Utilization report for every roster worker in the week containing `date`.
    pub fn week_utilization(&self, date: impl Into<DateInput>) -> Result<WeekUtilization> {
        let week = WorkWeek::containing(normalize_date(date)?);
        Ok(WeekUtilization::calculate(
            self.roster.workers(),
            self.calendar.as_slice(),
            week,
        ))
    }
}
