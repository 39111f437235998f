//! Workforce scheduling domain models.
//!
//! Provides the data types shared by the roster, the generator, and the
//! calendar.
//!
//! # Domain Mappings
//!
//! | u-roster | Shop floor |
//! |----------|------------|
//! | Worker | Operator on the headphone line |
//! | Stage | Line station (Sanding, Final Assembly, ...) |
//! | DayCount | Planned days at a station this week |
//! | CalendarAssignment | One booked day (or half day) in the planner grid |
//! | WorkWeek | Mon..Fri planning window |

mod assignment;
mod day_count;
mod stage;
mod week;
mod worker;

pub use assignment::CalendarAssignment;
pub use day_count::{DayCount, WORKDAYS_PER_WEEK};
pub use stage::Stage;
pub use week::{format_date, is_weekend, normalize_date, DateInput, WorkWeek, DATE_FORMAT};
pub use worker::{SkillLevel, Worker, DEFAULT_WEEKLY_CAPACITY};
