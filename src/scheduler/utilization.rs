//! Availability and utilization queries.
//!
//! Pure reads over the assignment set. Nothing is cached; every call
//! recomputes from the current assignments, so there is no stored
//! "scheduled hours" figure to drift out of sync.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Daily capacity | weekly_capacity / 5 |
//! | Assigned hours | Sum of hours in a (worker, date) cell |
//! | Available hours | max(0, daily capacity - assigned hours) |
//! | Scheduled hours | Sum of a worker's hours over Mon..Fri |
//! | Utilization | scheduled hours / weekly capacity |
//!
//! Capacity is spread uniformly over five days; partial weeks, holidays,
//! and per-day overrides are not modelled.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{CalendarAssignment, WorkWeek, Worker, WORKDAYS_PER_WEEK};

/// Hours a worker can take on any single workday.
pub fn daily_capacity(worker: &Worker) -> f64 {
    worker.weekly_capacity / WORKDAYS_PER_WEEK as f64
}

/// Hours booked in a (worker, date) cell.
pub fn assigned_hours(assignments: &[CalendarAssignment], worker_id: &str, date: NaiveDate) -> f64 {
    assignments
        .iter()
        .filter(|a| a.is_in_cell(worker_id, date))
        .map(|a| a.hours)
        .sum()
}

/// Hours still free for a worker on a date. Never negative.
pub fn available_hours(worker: &Worker, assignments: &[CalendarAssignment], date: NaiveDate) -> f64 {
    (daily_capacity(worker) - assigned_hours(assignments, &worker.id, date)).max(0.0)
}

/// Hours booked for a worker across a work week.
pub fn scheduled_hours(assignments: &[CalendarAssignment], worker_id: &str, week: WorkWeek) -> f64 {
    assignments
        .iter()
        .filter(|a| a.worker_id == worker_id && week.contains(a.date))
        .map(|a| a.hours)
        .sum()
}

/// One worker's load for a week.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerLoad {
    pub worker_id: String,
    /// Hours booked Mon..Fri.
    pub scheduled_hours: f64,
    /// Declared weekly capacity.
    pub weekly_capacity: f64,
    /// scheduled / capacity (0.0 when capacity is not positive).
    pub utilization: f64,
    /// Days where booked hours exceed the daily capacity.
    pub overbooked_days: Vec<NaiveDate>,
}

impl WorkerLoad {
    /// Hours left in the week (never negative).
    pub fn remaining_hours(&self) -> f64 {
        (self.weekly_capacity - self.scheduled_hours).max(0.0)
    }

    /// Whether any day or the week as a whole is over capacity.
    pub fn is_overbooked(&self) -> bool {
        !self.overbooked_days.is_empty() || self.scheduled_hours > self.weekly_capacity
    }
}

/// Week-level utilization report.
#[derive(Debug, Clone, Serialize)]
pub struct WeekUtilization {
    /// The week measured.
    pub week: WorkWeek,
    /// Per-worker loads, in roster order.
    pub loads: Vec<WorkerLoad>,
    /// Mean utilization across the listed workers.
    pub avg_utilization: f64,
}

impl WeekUtilization {
    /// Computes loads for the given workers over a week.
    pub fn calculate<'a, I>(workers: I, assignments: &[CalendarAssignment], week: WorkWeek) -> Self
    where
        I: IntoIterator<Item = &'a Worker>,
    {
        let loads: Vec<WorkerLoad> = workers
            .into_iter()
            .map(|worker| {
                let scheduled = scheduled_hours(assignments, &worker.id, week);
                let daily = daily_capacity(worker);
                let overbooked_days = week
                    .days()
                    .filter(|&date| assigned_hours(assignments, &worker.id, date) > daily + 1e-9)
                    .collect();
                let utilization = if worker.weekly_capacity > 0.0 {
                    scheduled / worker.weekly_capacity
                } else {
                    0.0
                };
                WorkerLoad {
                    worker_id: worker.id.clone(),
                    scheduled_hours: scheduled,
                    weekly_capacity: worker.weekly_capacity,
                    utilization,
                    overbooked_days,
                }
            })
            .collect();

        let avg_utilization = if loads.is_empty() {
            0.0
        } else {
            loads.iter().map(|l| l.utilization).sum::<f64>() / loads.len() as f64
        };

        Self {
            week,
            loads,
            avg_utilization,
        }
    }

    /// Load for a worker, if they were measured.
    pub fn load_for(&self, worker_id: &str) -> Option<&WorkerLoad> {
        self.loads.iter().find(|l| l.worker_id == worker_id)
    }

    /// Workers with at least one overbooked day or an overbooked week.
    pub fn overbooked(&self) -> Vec<&WorkerLoad> {
        self.loads.iter().filter(|l| l.is_overbooked()).collect()
    }
}
