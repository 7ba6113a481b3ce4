//! Grade Tier Classification
//!
//! Three question-set variants, chosen once per session. Switching tiers
//! mid-session discards the answers collected so far.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Education level that selects the question set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeTier {
    /// Lower tier: short, household-oriented questions
    #[default]
    #[serde(alias = "lower")]
    MiddleSchool,

    /// Middle tier: adds diet detail, devices and deliveries
    #[serde(alias = "high")]
    HighSchool,

    /// Upper tier: adds flights, accommodation and car distance
    #[serde(alias = "upper")]
    College,
}

impl GradeTier {
    /// Get all tiers
    pub fn all() -> &'static [GradeTier] {
        &[GradeTier::MiddleSchool, GradeTier::HighSchool, GradeTier::College]
    }

    /// Key used in JSON tables and URLs
    pub fn key(&self) -> &'static str {
        match self {
            GradeTier::MiddleSchool => "middle_school",
            GradeTier::HighSchool => "high_school",
            GradeTier::College => "college",
        }
    }

    /// Friendly name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            GradeTier::MiddleSchool => "Middle School",
            GradeTier::HighSchool => "High School",
            GradeTier::College => "College",
        }
    }
}

impl fmt::Display for GradeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GradeTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "middle_school" | "lower" => Ok(GradeTier::MiddleSchool),
            "high_school" | "high" => Ok(GradeTier::HighSchool),
            "college" | "upper" => Ok(GradeTier::College),
            _ => Err(format!("unknown grade tier '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("lower".parse::<GradeTier>().unwrap(), GradeTier::MiddleSchool);
        assert_eq!("High-School".parse::<GradeTier>().unwrap(), GradeTier::HighSchool);
        assert_eq!("upper".parse::<GradeTier>().unwrap(), GradeTier::College);
        // "middle" is ambiguous between the lower tier and the middle tier
        assert!("middle".parse::<GradeTier>().is_err());
    }

    #[test]
    fn test_key_round_trips_through_from_str() {
        for tier in GradeTier::all() {
            assert_eq!(tier.key().parse::<GradeTier>().unwrap(), *tier);
        }
    }

    #[test]
    fn test_serde_alias() {
        let tier: GradeTier = serde_json::from_str("\"upper\"").unwrap();
        assert_eq!(tier, GradeTier::College);
        assert_eq!(serde_json::to_string(&tier).unwrap(), "\"college\"");
    }
}
