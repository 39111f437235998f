//! Workforce capacity planning for the U-Engine ecosystem.
//!
//! Turns per-worker stage-day allocations into a dated weekly calendar,
//! supports drag-and-drop reassignment, and answers availability and
//! utilization queries for the planner grid.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Worker`, `Stage`, `DayCount`,
//!   `CalendarAssignment`, `WorkWeek`, date normalization
//! - **`roster`**: Capacity model (worker list and stage allocations)
//! - **`calendar`**: Authoritative assignment set with change observers
//! - **`scheduler`**: Generator, utilization queries, `WorkforceScheduler`
//! - **`validation`**: Input integrity checks (duplicate IDs, dangling refs)
//! - **`config`**: TOML-backed generator settings
//! - **`error`**: `RosterError` and `Result`
//!
//! # Architecture
//!
//! Roster and calendar are independent collections correlated only by
//! worker id. `WorkforceScheduler` owns both and is created once per
//! process; there is no global state. Persistence, authentication, and
//! rendering belong to the caller.
//!
//! # Logging
//!
//! Emits `tracing` events (generation summaries, moves, over-allocation
//! warnings). Installing a subscriber is left to the application.

pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod roster;
pub mod scheduler;
pub mod validation;

pub use error::{Result, RosterError};
