//! Scheduler configuration.
//!
//! Read from TOML. Every field has a default, so an empty file (or no
//! file at all) yields the standard 8h/4h day with sequential packing:
//!
//! ```toml
//! full_day_hours = 8.0
//! half_day_hours = 4.0
//! packing = "sequential"   # or "independent"
//! overflow = "reject"      # or "clamp"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, RosterError};

/// How a worker's stage allocations are laid onto the week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingMode {
    /// Stages follow one another across Mon..Fri without overlap.
    #[default]
    Sequential,
    /// Every stage starts on Monday. Stages may stack on the same day.
    Independent,
}

/// What sequential packing does with allocations beyond one week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Fail generation with `AllocationExceedsWeek`.
    #[default]
    Reject,
    /// Drop whatever does not fit and log a warning.
    Clamp,
}

/// Generator and capacity settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Hours booked for a full day.
    #[serde(default = "default_full_day_hours")]
    pub full_day_hours: f64,
    /// Hours booked for a half day.
    #[serde(default = "default_half_day_hours")]
    pub half_day_hours: f64,
    #[serde(default)]
    pub packing: PackingMode,
    #[serde(default)]
    pub overflow: OverflowPolicy,
}

fn default_full_day_hours() -> f64 {
    8.0
}

fn default_half_day_hours() -> f64 {
    4.0
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            full_day_hours: default_full_day_hours(),
            half_day_hours: default_half_day_hours(),
            packing: PackingMode::default(),
            overflow: OverflowPolicy::default(),
        }
    }
}

impl RosterConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RosterConfig = toml::from_str(content)
            .map_err(|e| RosterError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RosterError::Config(format!(
                "Failed to read config file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Sets the packing mode.
    pub fn with_packing(mut self, packing: PackingMode) -> Self {
        self.packing = packing;
        self
    }

    /// Sets the overflow policy.
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Checks that hour values are positive and finite.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("full_day_hours", self.full_day_hours),
            ("half_day_hours", self.half_day_hours),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RosterError::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RosterConfig::default();
        assert!((config.full_day_hours - 8.0).abs() < 1e-10);
        assert!((config.half_day_hours - 4.0).abs() < 1e-10);
        assert_eq!(config.packing, PackingMode::Sequential);
        assert_eq!(config.overflow, OverflowPolicy::Reject);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = RosterConfig::from_toml_str("").unwrap();
        assert_eq!(config, RosterConfig::default());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            full_day_hours = 7.5
            packing = "independent"
            overflow = "clamp"
        "#;
        let config = RosterConfig::from_toml_str(toml).unwrap();
        assert!((config.full_day_hours - 7.5).abs() < 1e-10);
        assert!((config.half_day_hours - 4.0).abs() < 1e-10);
        assert_eq!(config.packing, PackingMode::Independent);
        assert_eq!(config.overflow, OverflowPolicy::Clamp);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            RosterConfig::from_toml_str("half_day_hours = 0.0"),
            Err(RosterError::Config(_))
        ));
        assert!(matches!(
            RosterConfig::from_toml_str("packing = \"diagonal\""),
            Err(RosterError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = RosterConfig::from_file("/definitely/not/here/roster.toml").unwrap_err();
        assert!(matches!(err, RosterError::Config(msg) if msg.contains("roster.toml")));
    }
}
