//! Calendar assignment model.
//!
//! An assignment books one worker onto one stage for some hours of a
//! single calendar day. Assignments reference workers by id only; the
//! roster and the calendar are independent collections.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Stage;

/// A worker × stage × day booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarAssignment {
    /// Assignment identifier.
    pub id: String,
    /// Assigned worker (weak reference).
    pub worker_id: String,
    /// Production stage worked.
    pub stage: Stage,
    /// Calendar day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Hours booked on that day.
    pub hours: f64,
    /// Production batch, set by manual assignment flows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
}

impl CalendarAssignment {
    /// Creates an assignment without a batch.
    pub fn new(
        id: impl Into<String>,
        worker_id: impl Into<String>,
        stage: Stage,
        date: NaiveDate,
        hours: f64,
    ) -> Self {
        Self {
            id: id.into(),
            worker_id: worker_id.into(),
            stage,
            date,
            hours,
            batch_id: None,
        }
    }

    /// Sets the production batch.
    pub fn with_batch(mut self, batch_id: impl Into<String>) -> Self {
        self.batch_id = Some(batch_id.into());
        self
    }

    /// Whether this assignment sits in the (worker, date) cell.
    #[inline]
    pub fn is_in_cell(&self, worker_id: &str, date: NaiveDate) -> bool {
        self.worker_id == worker_id && self.date == date
    }

    /// Content key ignoring the id: (worker, stage, date, hours).
    ///
    /// Two generations from the same roster produce equal keys even
    /// though their ids differ.
    pub fn content_key(&self) -> (&str, Stage, NaiveDate, u64) {
        (&self.worker_id, self.stage, self.date, self.hours.to_bits())
    }
}
