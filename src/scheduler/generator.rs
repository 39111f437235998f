//! Stage-day allocation → calendar assignment expansion.
//!
//! # Algorithm
//!
//! For each available worker, visit stages in production order.
//!
//! **Sequential packing** (default):
//! 1. Lay every stage's whole days onto consecutive weekdays, starting
//!    Monday and continuing where the previous stage stopped.
//! 2. Lay the half days into the half-day slots that follow, two per
//!    weekday.
//! 3. If the total exceeds one week, either reject the worker's plan or
//!    drop what does not fit (half days go first, then later stages).
//!
//! **Independent packing**: every stage restarts on Monday. `floor(days)`
//! whole days, then a half day at index `floor(days)`. Stages of the same
//! worker can land on the same weekday.
//!
//! Either way a stage yields exactly `floor(days)` full-day records and
//! at most one half-day record.
//!
//! # Ids
//! `{worker}-{stage_key}-{slot}-{seq}` where `slot` is the weekday index
//! (or `half`) and `seq` counts records per worker across all stages.
//! Ids are stable for a given roster snapshot but are not meant to be
//! globally unique across regenerations.
//!
//! # Complexity
//! O(w * s) where w = workers, s = stages (7).

use tracing::{debug, warn};

use crate::config::{OverflowPolicy, PackingMode, RosterConfig};
use crate::error::{Result, RosterError};
use crate::models::{CalendarAssignment, DayCount, Stage, WorkWeek, Worker};

/// Expands worker stage allocations into dated assignments.
#[derive(Debug, Clone, Default)]
pub struct AssignmentGenerator {
    config: RosterConfig,
}

/// Per-worker record builder carrying the id sequence.
struct WorkerRecords<'a> {
    worker: &'a Worker,
    week: WorkWeek,
    seq: u32,
    out: Vec<CalendarAssignment>,
}

impl<'a> WorkerRecords<'a> {
    fn new(worker: &'a Worker, week: WorkWeek) -> Self {
        Self {
            worker,
            week,
            seq: 0,
            out: Vec::new(),
        }
    }

    /// Pushes a record on weekday `day`. Returns false past Friday.
    fn push(&mut self, stage: Stage, day: u32, slot: &str, hours: f64) -> bool {
        let Some(date) = self.week.day(day) else {
            return false;
        };
        let id = format!("{}-{}-{}-{}", self.worker.id, stage.key(), slot, self.seq);
        self.seq += 1;
        self.out
            .push(CalendarAssignment::new(id, &self.worker.id, stage, date, hours));
        true
    }
}

impl AssignmentGenerator {
    /// Creates a generator with the given settings.
    ///
    /// Rejects configs with non-positive or non-finite hour values.
    pub fn new(config: RosterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active settings.
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Generates the full assignment set for a week.
    ///
    /// Unavailable workers are skipped. The result is meant to replace
    /// the whole calendar, not to be merged into it. With
    /// `OverflowPolicy::Reject`, the first over-allocated worker aborts
    /// generation.
    pub fn generate<'a, I>(&self, workers: I, week: WorkWeek) -> Result<Vec<CalendarAssignment>>
    where
        I: IntoIterator<Item = &'a Worker>,
    {
        let mut assignments = Vec::new();
        for worker in workers {
            if !worker.available {
                debug!(worker = %worker.id, "skipping unavailable worker");
                continue;
            }
            assignments.extend(self.generate_for_worker(worker, week)?);
        }
        Ok(assignments)
    }

    /// Generates one worker's assignments for a week, ignoring availability.
    pub fn generate_for_worker(
        &self,
        worker: &Worker,
        week: WorkWeek,
    ) -> Result<Vec<CalendarAssignment>> {
        let records = match self.config.packing {
            PackingMode::Sequential => self.pack_sequential(worker, week)?,
            PackingMode::Independent => self.pack_independent(worker, week),
        };
        debug!(
            worker = %worker.id,
            records = records.len(),
            week = %week.start(),
            "generated worker assignments"
        );
        Ok(records)
    }

    fn pack_sequential(&self, worker: &Worker, week: WorkWeek) -> Result<Vec<CalendarAssignment>> {
        let total = worker.total_allocated_halves();
        let limit = DayCount::FULL_WEEK.halves();
        if total > limit && self.config.overflow == OverflowPolicy::Reject {
            return Err(RosterError::AllocationExceedsWeek {
                worker_id: worker.id.clone(),
                allocated: worker.total_allocated_days(),
                limit: DayCount::FULL_WEEK.as_days(),
            });
        }

        let mut records = WorkerRecords::new(worker, week);
        let mut day = 0;
        let mut half_day_stages = Vec::new();

        for (&stage, &days) in &worker.stage_assignments {
            for _ in 0..days.full_days() {
                if !records.push(stage, day, &day.to_string(), self.config.full_day_hours) {
                    break;
                }
                day += 1;
            }
            if days.has_half_day() {
                half_day_stages.push(stage);
            }
        }

        let mut placed_halves = day * 2;
        for stage in half_day_stages {
            if !records.push(stage, placed_halves / 2, "half", self.config.half_day_hours) {
                break;
            }
            placed_halves += 1;
        }

        if total > limit {
            warn!(
                worker = %worker.id,
                allocated = worker.total_allocated_days(),
                dropped = (total - placed_halves) as f64 / 2.0,
                "clamped allocations to one work week"
            );
        }

        Ok(records.out)
    }

    fn pack_independent(&self, worker: &Worker, week: WorkWeek) -> Vec<CalendarAssignment> {
        let mut records = WorkerRecords::new(worker, week);

        for (&stage, &days) in &worker.stage_assignments {
            let full_days = days.full_days();
            for day in 0..full_days {
                records.push(stage, day, &day.to_string(), self.config.full_day_hours);
            }
            if days.has_half_day() {
                records.push(stage, full_days, "half", self.config.half_day_hours);
            }
        }

        records.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn week() -> WorkWeek {
        WorkWeek::containing(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap())
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn days(d: f64) -> DayCount {
        DayCount::from_days(d).unwrap()
    }

    fn total_hours(records: &[CalendarAssignment]) -> f64 {
        records.iter().map(|a| a.hours).sum()
    }

    fn independent() -> AssignmentGenerator {
        AssignmentGenerator::new(RosterConfig::default().with_packing(PackingMode::Independent))
            .unwrap()
    }

    #[test]
    fn test_full_week_two_stages() {
        let w = Worker::new("w1")
            .with_allocation(Stage::Intake, days(4.0))
            .with_allocation(Stage::Sanding, days(1.0));
        let records = AssignmentGenerator::default()
            .generate_for_worker(&w, week())
            .unwrap();

        let intake: Vec<_> = records.iter().filter(|a| a.stage == Stage::Intake).collect();
        assert_eq!(intake.len(), 4);
        let intake_days: Vec<_> = intake.iter().map(|a| a.date).collect();
        assert_eq!(intake_days, vec![day(10), day(11), day(12), day(13)]);
        assert!(intake.iter().all(|a| (a.hours - 8.0).abs() < 1e-10));

        let sanding: Vec<_> = records.iter().filter(|a| a.stage == Stage::Sanding).collect();
        assert_eq!(sanding.len(), 1);
        assert_eq!(sanding[0].date, day(14));
        assert!((sanding[0].hours - 8.0).abs() < 1e-10);

        assert!((total_hours(&records) - 40.0).abs() < 1e-10);
    }

    #[test]
    fn test_half_day_follows_full_days() {
        let w = Worker::new("w2").with_allocation(Stage::Finishing, days(2.5));
        let records = AssignmentGenerator::default()
            .generate_for_worker(&w, week())
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].date, day(10));
        assert_eq!(records[1].date, day(11));
        assert_eq!(records[2].date, day(12));
        assert!((records[2].hours - 4.0).abs() < 1e-10);
        assert!((total_hours(&records) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_two_half_days_share_a_day() {
        let w = Worker::new("w1")
            .with_allocation(Stage::Sanding, days(1.5))
            .with_allocation(Stage::Finishing, days(0.5));
        let records = AssignmentGenerator::default()
            .generate_for_worker(&w, week())
            .unwrap();

        assert_eq!(records.len(), 3);
        let tuesday: Vec<_> = records.iter().filter(|a| a.date == day(11)).collect();
        assert_eq!(tuesday.len(), 2);
        assert!((total_hours(&records) - 16.0).abs() < 1e-10);
    }

    #[test]
    fn test_ids() {
        let w = Worker::new("w1")
            .with_allocation(Stage::Intake, days(1.5))
            .with_allocation(Stage::FinalAssembly, days(1.0));
        let ids: Vec<_> = AssignmentGenerator::default()
            .generate_for_worker(&w, week())
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(
            ids,
            vec!["w1-intake-0-0", "w1-final_assembly-1-1", "w1-intake-half-2"]
        );
    }

    #[test]
    fn test_zero_allocation_yields_nothing() {
        let mut w = Worker::new("w1");
        w.stage_assignments.insert(Stage::Shipping, DayCount::ZERO);
        let records = AssignmentGenerator::default()
            .generate_for_worker(&w, week())
            .unwrap();
        assert!(records.is_empty());
        assert!(independent().generate_for_worker(&w, week()).unwrap().is_empty());
    }

    #[test]
    fn test_unavailable_workers_skipped() {
        let workers = vec![
            Worker::new("w1").with_allocation(Stage::Intake, days(2.0)),
            Worker::new("w2")
                .with_allocation(Stage::Intake, days(3.0))
                .with_available(false),
        ];
        let records = AssignmentGenerator::default()
            .generate(&workers, week())
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|a| a.worker_id == "w1"));
    }

    #[test]
    fn test_overflow_rejected() {
        let w = Worker::new("w1")
            .with_allocation(Stage::Intake, days(4.0))
            .with_allocation(Stage::Shipping, days(1.5));
        let err = AssignmentGenerator::default()
            .generate(std::iter::once(&w), week())
            .unwrap_err();
        assert_eq!(
            err,
            RosterError::AllocationExceedsWeek {
                worker_id: "w1".into(),
                allocated: 5.5,
                limit: 5.0,
            }
        );
    }

    #[test]
    fn test_overflow_clamped() {
        let w = Worker::new("w1")
            .with_allocation(Stage::Intake, days(4.5))
            .with_allocation(Stage::Sanding, days(2.0));
        let generator =
            AssignmentGenerator::new(RosterConfig::default().with_overflow(OverflowPolicy::Clamp))
                .unwrap();
        let records = generator.generate_for_worker(&w, week()).unwrap();

        assert_eq!(records.len(), 5);
        assert_eq!(records[4].stage, Stage::Sanding);
        assert_eq!(records[4].date, day(14));
        assert!((total_hours(&records) - 40.0).abs() < 1e-10);
    }

    #[test]
    fn test_independent_packing_collides() {
        let w = Worker::new("w1")
            .with_allocation(Stage::Intake, days(4.0))
            .with_allocation(Stage::Sanding, days(1.0));
        let records = independent().generate_for_worker(&w, week()).unwrap();

        let sanding = records.iter().find(|a| a.stage == Stage::Sanding).unwrap();
        assert_eq!(sanding.date, day(10));
        assert_eq!(records.iter().filter(|a| a.date == day(10)).count(), 2);
    }

    #[test]
    fn test_independent_half_day() {
        let w = Worker::new("w1").with_allocation(Stage::Finishing, days(2.5));
        let records = independent().generate_for_worker(&w, week()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].date, day(12));
        assert_eq!(records[2].id, "w1-finishing-half-2");
        assert!((records[2].hours - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_independent_ignores_overflow_policy() {
        let w = Worker::new("w1")
            .with_allocation(Stage::Intake, days(4.0))
            .with_allocation(Stage::Shipping, days(1.5));
        let generator = AssignmentGenerator::new(
            RosterConfig::default()
                .with_packing(PackingMode::Independent)
                .with_overflow(OverflowPolicy::Reject),
        )
        .unwrap();
        let records = generator.generate_for_worker(&w, week()).unwrap();

        assert_eq!(records.len(), 6);
        let monday: Vec<_> = records.iter().filter(|a| a.date == day(10)).collect();
        assert_eq!(monday.len(), 2);
        let tuesday_half = records
            .iter()
            .find(|a| a.stage == Stage::Shipping && a.date == day(11))
            .unwrap();
        assert!((tuesday_half.hours - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_rejects_bad_hour_config() {
        let mut config = RosterConfig::default();
        config.full_day_hours = -8.0;
        assert!(matches!(
            AssignmentGenerator::new(config),
            Err(RosterError::Config(_))
        ));

        let mut config = RosterConfig::default();
        config.half_day_hours = f64::NAN;
        assert!(matches!(
            AssignmentGenerator::new(config),
            Err(RosterError::Config(_))
        ));
    }

    #[test]
    fn test_custom_hours() {
        let mut config = RosterConfig::default();
        config.full_day_hours = 7.5;
        config.half_day_hours = 3.5;
        let w = Worker::new("w1").with_allocation(Stage::Intake, days(1.5));
        let records = AssignmentGenerator::new(config)
            .unwrap()
            .generate_for_worker(&w, week())
            .unwrap();
        assert!((total_hours(&records) - 11.0).abs() < 1e-10);
    }

    fn random_roster(rng: &mut StdRng, size: usize) -> Vec<Worker> {
        (0..size)
            .map(|i| {
                let mut w = Worker::new(format!("w{i}"));
                let mut remaining = 10u32;
                for stage in Stage::ALL {
                    if remaining == 0 || rng.random_bool(0.5) {
                        continue;
                    }
                    let halves = rng.random_range(0..=remaining.min(5));
                    remaining -= halves;
                    w.set_allocation(stage, DayCount::from_halves(halves));
                }
                w
            })
            .collect()
    }

    #[test]
    fn test_record_counts_per_stage() {
        let mut rng = StdRng::seed_from_u64(7);
        let roster = random_roster(&mut rng, 25);

        for generator in [AssignmentGenerator::default(), independent()] {
            let records = generator.generate(&roster, week()).unwrap();
            for w in &roster {
                for (&stage, &d) in &w.stage_assignments {
                    let mine: Vec<_> = records
                        .iter()
                        .filter(|a| a.worker_id == w.id && a.stage == stage)
                        .collect();
                    let full = mine.iter().filter(|a| (a.hours - 8.0).abs() < 1e-10).count();
                    let half = mine.iter().filter(|a| (a.hours - 4.0).abs() < 1e-10).count();
                    assert_eq!(full as u32, d.full_days());
                    assert_eq!(half == 1, d.has_half_day());
                    assert_eq!(full + half, mine.len());
                }
            }
        }
    }

    #[test]
    fn test_regeneration_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(99);
        let roster = random_roster(&mut rng, 40);
        let generator = AssignmentGenerator::default();

        let first = generator.generate(&roster, week()).unwrap();
        let second = generator.generate(&roster, week()).unwrap();
        assert_eq!(first.len(), second.len());

        let mut a: Vec<_> = first.iter().map(|x| x.content_key()).collect();
        let mut b: Vec<_> = second.iter().map(|x| x.content_key()).collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sequential_never_overbooks_a_day() {
        let mut rng = StdRng::seed_from_u64(3);
        let roster = random_roster(&mut rng, 40);
        let records = AssignmentGenerator::default()
            .generate(&roster, week())
            .unwrap();

        for w in &roster {
            for date in week().days() {
                let hours: f64 = records
                    .iter()
                    .filter(|a| a.is_in_cell(&w.id, date))
                    .map(|a| a.hours)
                    .sum();
                assert!(hours <= 8.0 + 1e-10, "{} overbooked on {date}", w.id);
            }
        }
    }
}
