//! Capacity model: the worker roster and its stage-day allocations.
//!
//! The roster is injected (loaded by the caller from whatever record
//! source backs it) and mutated through explicit update calls. Weekly
//! over-allocation is reported, not refused.

use tracing::{debug, warn};

use crate::error::{Result, RosterError};
use crate::models::{DayCount, Stage, Worker};

/// The in-memory worker roster.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    workers: Vec<Worker>,
}

impl Roster {
    /// Creates a roster from an injected worker list.
    ///
    /// Fails with `DuplicateWorker` on the first repeated id.
    pub fn new(workers: Vec<Worker>) -> Result<Self> {
        let mut roster = Self::default();
        for worker in workers {
            roster.add_worker(worker)?;
        }
        Ok(roster)
    }

    /// Adds a worker. Ids must be unique.
    pub fn add_worker(&mut self, worker: Worker) -> Result<()> {
        if self.worker(&worker.id).is_some() {
            return Err(RosterError::DuplicateWorker(worker.id));
        }
        self.workers.push(worker);
        Ok(())
    }

    /// Looks up a worker by id.
    pub fn worker(&self, worker_id: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == worker_id)
    }

    /// Mutable lookup by id.
    pub fn worker_mut(&mut self, worker_id: &str) -> Option<&mut Worker> {
        self.workers.iter_mut().find(|w| w.id == worker_id)
    }

    fn require_mut(&mut self, worker_id: &str) -> Result<&mut Worker> {
        self.worker_mut(worker_id)
            .ok_or_else(|| RosterError::UnknownWorker(worker_id.to_string()))
    }

    /// Whether a worker id exists.
    pub fn contains(&self, worker_id: &str) -> bool {
        self.worker(worker_id).is_some()
    }

    /// Workers in roster order, optionally only the available ones.
    pub fn list_workers(&self, only_available: bool) -> Vec<&Worker> {
        self.workers
            .iter()
            .filter(|w| !only_available || w.available)
            .collect()
    }

    /// All workers as a slice.
    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// Number of workers.
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Sets the days a worker spends on a stage this week.
    ///
    /// `days` must be a half-day multiple in [0, 5]; 0 clears the stage.
    /// A weekly total above 5 days is accepted and logged.
    pub fn set_stage_allocation(&mut self, worker_id: &str, stage: Stage, days: f64) -> Result<()> {
        let count = DayCount::from_days(days)?;
        let worker = self.require_mut(worker_id)?;
        worker.set_allocation(stage, count);
        debug!(worker = worker_id, %stage, days, "stage allocation updated");
        if worker.is_over_allocated() {
            warn!(
                worker = worker_id,
                total = worker.total_allocated_days(),
                "worker allocated beyond one work week"
            );
        }
        Ok(())
    }

    /// Marks a worker available or unavailable for generation.
    pub fn set_available(&mut self, worker_id: &str, available: bool) -> Result<()> {
        self.require_mut(worker_id)?.available = available;
        Ok(())
    }

    /// Updates a worker's weekly hour capacity.
    pub fn set_weekly_capacity(&mut self, worker_id: &str, hours: f64) -> Result<()> {
        if !hours.is_finite() || hours <= 0.0 {
            return Err(RosterError::InvalidCapacity(hours));
        }
        self.require_mut(worker_id)?.weekly_capacity = hours;
        Ok(())
    }

    /// Workers whose allocations exceed one week, with their total in days.
    pub fn over_allocated(&self) -> Vec<(&Worker, f64)> {
        self.workers
            .iter()
            .filter(|w| w.is_over_allocated())
            .map(|w| (w, w.total_allocated_days()))
            .collect()
    }
}

impl TryFrom<Vec<Worker>> for Roster {
    type Error = RosterError;

    fn try_from(workers: Vec<Worker>) -> Result<Self> {
        Self::new(workers)
    }
}
