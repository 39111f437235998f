//! Calendar generation, utilization queries, and the scheduling service.
//!
//! # Algorithm
//!
//! `AssignmentGenerator` expands each worker's stage → day allocations
//! into dated assignments over a Mon..Fri window. Sequential packing is
//! the default; independent packing (every stage from Monday) is kept
//! for planners who want stages stacked on the same days.
//!
//! # Utilization
//!
//! `utilization` answers "how many hours are left" for a worker-day and
//! summarizes a week per worker (`WeekUtilization`).
//!
//! # Service
//!
//! `WorkforceScheduler` ties roster, calendar, and generator together
//! and is the entry point for UI-driven mutations.

mod generator;
mod service;
pub mod utilization;

pub use generator::AssignmentGenerator;
pub use service::WorkforceScheduler;
pub use utilization::{WeekUtilization, WorkerLoad};
