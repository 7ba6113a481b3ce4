//! Tip Rule Catalog
//!
//! Each rule names the questions it watches (first answered one wins), a
//! trigger over the selected option label, and the fraction of that answer's
//! footprint the suggested change avoids. Flights use a flat amount instead,
//! since the behaviour is episodic rather than proportional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::TableError;
use crate::category::Category;

/// Default number of tips shown
pub const DEFAULT_TIP_CAP: usize = 5;

/// Fraction applied when a specific label is selected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelFraction {
    pub label: String,
    pub fraction: f64,
}

/// When a rule fires and how its impact is sized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TipTrigger {
    /// Fires for the listed labels; impact = scaled answer × fraction
    Options { fractions: Vec<LabelFraction> },

    /// Fires for any label not listed; impact = scaled answer × fraction
    AnyExcept { labels: Vec<String>, fraction: f64 },

    /// Fires for any label not in `unless`; impact = amount × country factor
    Flat {
        amount: f64,
        category: Category,
        #[serde(default)]
        unless: Vec<String>,
    },
}

/// A suggested behaviour change guarded by a trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipRule {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default = "default_emoji")]
    pub emoji: String,
    pub sources: Vec<String>,
    pub trigger: TipTrigger,
}

fn default_emoji() -> String {
    "💡".to_string()
}

fn default_cap() -> usize {
    DEFAULT_TIP_CAP
}

/// All tip rules, evaluated in order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipCatalog {
    #[serde(default = "default_cap")]
    pub cap: usize,
    pub rules: Vec<TipRule>,
}

impl TipCatalog {
    /// Built-in tip rules
    pub fn builtin() -> Self {
        Self {
            cap: DEFAULT_TIP_CAP,
            rules: builtin_rules(),
        }
    }

    /// Load tip rules from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read tip catalog: {:?}", path))?;

        let catalog: TipCatalog = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse tip catalog JSON")?;

        catalog.validate()
            .with_context(|| format!("Invalid tip catalog: {:?}", path))?;

        Ok(catalog)
    }

    /// Fractions must lie in (0, 1], flat amounts must be positive
    pub fn validate(&self) -> Result<(), TableError> {
        if self.cap == 0 {
            return Err(TableError::ZeroTipCap);
        }
        for rule in &self.rules {
            if rule.sources.is_empty() {
                return Err(TableError::NoTipSources(rule.id.clone()));
            }
            let invalid = |value: f64| !value.is_finite() || value <= 0.0;
            let bad = match &rule.trigger {
                TipTrigger::Options { fractions } => fractions
                    .iter()
                    .map(|f| f.fraction)
                    .find(|&f| invalid(f) || f > 1.0),
                TipTrigger::AnyExcept { fraction, .. } => {
                    Some(*fraction).filter(|&f| invalid(f) || f > 1.0)
                }
                TipTrigger::Flat { amount, .. } => Some(*amount).filter(|&a| invalid(a)),
            };
            if let Some(value) = bad {
                return Err(TableError::InvalidTipWeight {
                    tip_id: rule.id.clone(),
                    value,
                });
            }
        }
        Ok(())
    }
}

impl Default for TipCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ============================================================================
// EMBEDDED TIP RULES
// ============================================================================

fn options(pairs: &[(&str, f64)]) -> TipTrigger {
    TipTrigger::Options {
        fractions: pairs
            .iter()
            .map(|(label, fraction)| LabelFraction {
                label: label.to_string(),
                fraction: *fraction,
            })
            .collect(),
    }
}

fn rule(
    id: &str,
    emoji: &str,
    title: &str,
    description: &str,
    sources: &[&str],
    trigger: TipTrigger,
) -> TipRule {
    TipRule {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        emoji: emoji.to_string(),
        sources: sources.iter().map(|s| s.to_string()).collect(),
        trigger,
    }
}

fn builtin_rules() -> Vec<TipRule> {
    vec![
        rule(
            "reduce_ac",
            "❄️",
            "Cut AC/heater by ~1 hour each day",
            "Set 24–26°C, use a fan first, close doors/windows. Small habits, easy comfort.",
            &["ac_use", "room_cooling", "home_cooling"],
            options(&[("1–4 hrs/day", 0.20), ("> 4 hrs/day", 0.25)]),
        ),
        rule(
            "commute_active",
            "🚶‍♀️",
            "Swap 2 commute days for walking/cycling/transit",
            "Walk part way, cycle/e-scooter, or take bus/metro. Try park-and-ride or carpool once.",
            &["campus_commute", "school_commute"],
            options(&[("Car/Motorbike", 0.40), ("Car or motorbike", 0.40), ("Car ride", 0.40)]),
        ),
        rule(
            "diet_shift",
            "🥦",
            "Go meat-free 3 days each week",
            "Plan simple meals: beans/lentils, paneer/tofu, veggie stir-fries. Swap some red meat for eggs/chicken.",
            &["diet"],
            options(&[("Mixed (some meat)", 0.25), ("Meat often (several times/week)", 0.35)]),
        ),
        rule(
            "red_meat_cut",
            "🍔➡️🥚",
            "Halve your red-meat meals",
            "Replace half with chicken/eggs/beans. Same protein, cheaper, lower impact.",
            &["red_meat"],
            TipTrigger::AnyExcept {
                labels: vec!["0–1 meals/week".to_string()],
                fraction: 0.50,
            },
        ),
        rule(
            "stream_smart",
            "📥",
            "Download or use SD on phone",
            "Download shows you rewatch. Turn off autoplay at night.",
            &["online_stream", "screen_time"],
            options(&[("Over 10 hrs", 0.30), ("Over 5 hrs", 0.30), ("> 5 hrs/day", 0.30)]),
        ),
        rule(
            "stream_smart",
            "📥",
            "Stream smarter on mobile",
            "Use SD on phone/tablet and download long videos.",
            &["online_stream", "screen_time"],
            options(&[("4–10 hrs", 0.20), ("2–5 hrs", 0.20), ("2–5 hrs/day", 0.20)]),
        ),
        rule(
            "thrift_refurb",
            "♻️",
            "Skip one new item this term (choose thrift/refurb)",
            "Thrift first, repair if possible, or borrow/share. Many items feel new after a clean/case.",
            &["shopping", "clothes_buy", "device_upgrades"],
            options(&[
                ("Monthly", 0.30),
                ("Monthly splurge", 0.30),
                ("Every 2–3 months", 0.30),
                ("2–3 years", 0.30),
                ("Under 2 years", 0.30),
            ]),
        ),
        rule(
            "skip_short_flight",
            "🚄",
            "Replace one short flight with train/bus",
            "Pick rail/bus once this year. Often cheaper and faster door-to-door.",
            &["short_flights"],
            TipTrigger::Flat {
                amount: 0.20,
                category: Category::Transport,
                unless: vec!["0".to_string()],
            },
        ),
        rule(
            "skip_long_flight",
            "🗺️",
            "Avoid one long flight this year",
            "Combine trips or choose a closer destination once this year.",
            &["long_flights"],
            TipTrigger::Flat {
                amount: 0.90,
                category: Category::Transport,
                unless: vec!["0".to_string()],
            },
        ),
        rule(
            "shower_short",
            "⏱️🚿",
            "Shorten showers by 3–5 minutes",
            "Set a timer, turn water off while soaping, and use a low-flow shower head if you can.",
            &["shower_length"],
            options(&[("5–10 min", 0.25), ("Over 10 min", 0.40)]),
        ),
        rule(
            "laundry_cold",
            "🧺❄️",
            "Wash clothes in cold water",
            "Cold cycles clean most daily clothes and save energy. Use warm only for very soiled loads.",
            &["laundry_temp"],
            options(&[("Warm", 0.40), ("Hot", 0.70)]),
        ),
        rule(
            "reuse",
            "👜",
            "Carry a bottle and bag",
            "Keep a metal/plastic bottle and a foldable tote in your backpack. Say no to bottles/bags.",
            &["single_use"],
            options(&[("Sometimes", 0.60), ("Often", 0.60)]),
        ),
        rule(
            "trip_chain",
            "🤝🛣️",
            "Carpool and combine errands",
            "Share rides with classmates and do several errands in one loop to cut extra trips.",
            &["ride_share"],
            TipTrigger::AnyExcept {
                labels: vec!["Often (weekly)".to_string()],
                fraction: 0.40,
            },
        ),
    ]
}
