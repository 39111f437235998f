//! Production stage taxonomy.
//!
//! The headphone line runs through a fixed sequence of stages. Variant
//! order is production order, which is also the order the generator
//! visits a worker's allocations in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RosterError;

/// A production stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Incoming material and order intake.
    Intake,
    /// Wood cup sanding.
    Sanding,
    /// Staining, lacquer, and surface finishing.
    Finishing,
    /// Driver and cable sub-assemblies.
    #[serde(rename = "Sub-Assembly")]
    SubAssembly,
    /// Final headphone assembly.
    #[serde(rename = "Final Assembly")]
    FinalAssembly,
    /// Acoustic measurement and QC sign-off.
    #[serde(rename = "Acoustic QC")]
    AcousticQc,
    /// Packing and shipping.
    Shipping,
}

impl Stage {
    /// All stages in production order.
    pub const ALL: [Stage; 7] = [
        Stage::Intake,
        Stage::Sanding,
        Stage::Finishing,
        Stage::SubAssembly,
        Stage::FinalAssembly,
        Stage::AcousticQc,
        Stage::Shipping,
    ];

    /// Display name, as shown on the shop floor.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Intake => "Intake",
            Stage::Sanding => "Sanding",
            Stage::Finishing => "Finishing",
            Stage::SubAssembly => "Sub-Assembly",
            Stage::FinalAssembly => "Final Assembly",
            Stage::AcousticQc => "Acoustic QC",
            Stage::Shipping => "Shipping",
        }
    }

    /// Slug key used in generated assignment ids.
    pub fn key(self) -> &'static str {
        match self {
            Stage::Intake => "intake",
            Stage::Sanding => "sanding",
            Stage::Finishing => "finishing",
            Stage::SubAssembly => "sub_assembly",
            Stage::FinalAssembly => "final_assembly",
            Stage::AcousticQc => "acoustic_qc",
            Stage::Shipping => "shipping",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = RosterError;

    /// Accepts the display name or the slug key, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Stage::ALL
            .iter()
            .copied()
            .find(|stage| {
                stage.name().eq_ignore_ascii_case(needle) || stage.key().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| RosterError::UnknownStage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_parse() {
        assert_eq!("Final Assembly".parse::<Stage>(), Ok(Stage::FinalAssembly));
        assert_eq!("final_assembly".parse::<Stage>(), Ok(Stage::FinalAssembly));
        assert_eq!("acoustic qc".parse::<Stage>(), Ok(Stage::AcousticQc));
        assert_eq!(" Sanding ".parse::<Stage>(), Ok(Stage::Sanding));
        assert_eq!(
            "Painting".parse::<Stage>(),
            Err(RosterError::UnknownStage("Painting".into()))
        );
    }

    #[test]
    fn test_stage_order() {
        let mut shuffled = vec![Stage::Shipping, Stage::Intake, Stage::SubAssembly];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Stage::Intake, Stage::SubAssembly, Stage::Shipping]
        );
    }

    #[test]
    fn test_stage_serde_uses_display_name() {
        let json = serde_json::to_string(&Stage::SubAssembly).unwrap();
        assert_eq!(json, "\"Sub-Assembly\"");
        let back: Stage = serde_json::from_str("\"Acoustic QC\"").unwrap();
        assert_eq!(back, Stage::AcousticQc);
    }

    #[test]
    fn test_display_matches_name() {
        for stage in Stage::ALL {
            assert_eq!(stage.to_string(), stage.name());
        }
    }
}
