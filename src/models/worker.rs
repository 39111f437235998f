//! Worker model.
//!
//! Workers are the shop-floor staff assigned to production stages. Each
//! carries a weekly hour capacity and a map of stage → day allocation
//! that drives calendar generation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{DayCount, Stage};

/// Default weekly capacity in hours.
pub const DEFAULT_WEEKLY_CAPACITY: f64 = 40.0;

/// A shop-floor worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    /// Unique worker identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Opaque photo reference (URL or storage key).
    pub photo: Option<String>,
    /// Stage the worker is best suited for. Free-form.
    pub primary_skill: String,
    /// Experience level. Display only, never a scheduling weight.
    pub skill_level: SkillLevel,
    /// Assignable hours per 5-day week.
    pub weekly_capacity: f64,
    /// Unavailable workers are left out of generation.
    pub available: bool,
    /// Days allocated per stage, in production order.
    pub stage_assignments: BTreeMap<Stage, DayCount>,
}

/// Ordinal experience level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SkillLevel {
    #[default]
    Novice,
    Intermediate,
    Expert,
}

impl SkillLevel {
    /// Numeric rank, 1..=3.
    pub fn rank(self) -> u8 {
        match self {
            SkillLevel::Novice => 1,
            SkillLevel::Intermediate => 2,
            SkillLevel::Expert => 3,
        }
    }
}

impl TryFrom<u8> for SkillLevel {
    type Error = String;

    fn try_from(rank: u8) -> Result<Self, Self::Error> {
        match rank {
            1 => Ok(SkillLevel::Novice),
            2 => Ok(SkillLevel::Intermediate),
            3 => Ok(SkillLevel::Expert),
            other => Err(format!("skill level must be 1..=3, got {other}")),
        }
    }
}

impl From<SkillLevel> for u8 {
    fn from(level: SkillLevel) -> Self {
        level.rank()
    }
}

impl Worker {
    /// Creates an available worker with the default capacity and no allocations.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            photo: None,
            primary_skill: String::new(),
            skill_level: SkillLevel::default(),
            weekly_capacity: DEFAULT_WEEKLY_CAPACITY,
            available: true,
            stage_assignments: BTreeMap::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the photo reference.
    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// Sets the primary skill.
    pub fn with_primary_skill(mut self, skill: impl Into<String>) -> Self {
        self.primary_skill = skill.into();
        self
    }

    /// Sets the skill level.
    pub fn with_skill_level(mut self, level: SkillLevel) -> Self {
        self.skill_level = level;
        self
    }

    /// Sets the weekly capacity (hours).
    pub fn with_weekly_capacity(mut self, hours: f64) -> Self {
        self.weekly_capacity = hours;
        self
    }

    /// Sets availability.
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Adds a stage allocation. Zero allocations are not stored.
    pub fn with_allocation(mut self, stage: Stage, days: DayCount) -> Self {
        self.set_allocation(stage, days);
        self
    }

    /// Replaces the allocation for a stage. Zero removes the entry.
    pub fn set_allocation(&mut self, stage: Stage, days: DayCount) {
        if days.is_zero() {
            self.stage_assignments.remove(&stage);
        } else {
            self.stage_assignments.insert(stage, days);
        }
    }

    /// Allocation for a stage (zero if absent).
    pub fn allocation(&self, stage: Stage) -> DayCount {
        self.stage_assignments
            .get(&stage)
            .copied()
            .unwrap_or(DayCount::ZERO)
    }

    /// Sum of all stage allocations, in days. May exceed a week.
    pub fn total_allocated_days(&self) -> f64 {
        self.total_allocated_halves() as f64 / 2.0
    }

    pub(crate) fn total_allocated_halves(&self) -> u32 {
        self.stage_assignments.values().map(|d| d.halves()).sum()
    }

    /// Whether allocations add up to more than one work week.
    pub fn is_over_allocated(&self) -> bool {
        self.total_allocated_halves() > DayCount::FULL_WEEK.halves()
    }

    /// The primary skill resolved against the stage taxonomy.
    pub fn primary_stage(&self) -> Option<Stage> {
        self.primary_skill.parse().ok()
    }
}
