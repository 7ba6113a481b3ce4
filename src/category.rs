//! Emission categories
//!
//! Six fixed buckets every answer contributes to. A breakdown always carries
//! all six, even when a category was never touched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emission bucket an answer contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Housing,
    Transport,
    Food,
    Digital,
    Shopping,
    Misc,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 6] = [
        Category::Housing,
        Category::Transport,
        Category::Food,
        Category::Digital,
        Category::Shopping,
        Category::Misc,
    ];

    /// Key used in JSON tables and API payloads
    pub fn key(&self) -> &'static str {
        match self {
            Category::Housing => "housing",
            Category::Transport => "transport",
            Category::Food => "food",
            Category::Digital => "digital",
            Category::Shopping => "shopping",
            Category::Misc => "misc",
        }
    }

    /// Friendly name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Housing => "Housing",
            Category::Transport => "Transport",
            Category::Food => "Food",
            Category::Digital => "Digital",
            Category::Shopping => "Shopping",
            Category::Misc => "Misc",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.key() == key)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}
