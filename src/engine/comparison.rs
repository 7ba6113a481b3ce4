//! Tree-Equivalent & Comparison Metrics
//!
//! Derived scalars for presenting a total against fixed references.

use serde::{Deserialize, Serialize};

use crate::utils::capped_percent;

/// CO₂ one tree absorbs per year (tons)
pub const TREE_ABSORPTION_TONS_PER_YEAR: f64 = 0.021;

/// Per-person annual climate target (tons)
pub const CLIMATE_TARGET_TONS: f64 = 2.0;

/// Global student average (tons)
pub const STUDENT_AVERAGE_TONS: f64 = 3.5;

/// Footprint that fills the mountain illustration (tons)
pub const MOUNTAIN_SCALE_TONS: f64 = 15.0;

/// Trees needed to absorb `total_tons` in a year
pub fn trees_to_offset(total_tons: f64) -> u64 {
    if !(total_tons > 0.0) || !total_tons.is_finite() {
        return 0;
    }
    let total_kg = total_tons * 1000.0;
    let per_tree_kg = TREE_ABSORPTION_TONS_PER_YEAR * 1000.0;
    // Tolerance keeps exact multiples (0.042 t → 2 trees) from rounding up
    (total_kg / per_tree_kg - 1e-9).ceil().max(0.0) as u64
}

/// Where a total sits relative to the references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    WithinTarget,
    BelowAverage,
    AboveAverage,
}

impl Standing {
    pub fn classify(total_tons: f64) -> Self {
        if total_tons <= CLIMATE_TARGET_TONS {
            Standing::WithinTarget
        } else if total_tons <= STUDENT_AVERAGE_TONS {
            Standing::BelowAverage
        } else {
            Standing::AboveAverage
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Standing::WithinTarget => "Excellent! You're at or below the climate target.",
            Standing::BelowAverage => {
                "You're around average for students globally. Small changes can get you to the target."
            }
            Standing::AboveAverage => {
                "You're above the student average. The tips below can help you cut emissions fast."
            }
        }
    }
}

/// One reference bar: how full it is for the current total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceBar {
    pub label: String,
    pub reference_tons: f64,
    /// Whole percent, capped at 100
    pub percent: u32,
    /// Whether being below the reference is the goal
    pub lower_is_better: bool,
}

impl ReferenceBar {
    fn new(label: &str, reference_tons: f64, total_tons: f64, lower_is_better: bool) -> Self {
        Self {
            label: label.to_string(),
            reference_tons,
            percent: capped_percent(total_tons, reference_tons),
            lower_is_better,
        }
    }
}

/// Presentation metrics for a total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub trees_to_offset: u64,
    pub climate_target: ReferenceBar,
    pub student_average: ReferenceBar,
    pub standing: Standing,
    pub message: String,
    pub mountain_height_percent: f64,
}

/// Share of the mountain illustration filled, 0..=100
pub fn mountain_height_percent(total_tons: f64) -> f64 {
    if !(total_tons > 0.0) || !total_tons.is_finite() {
        return 0.0;
    }
    (total_tons / MOUNTAIN_SCALE_TONS * 100.0).min(100.0)
}

/// Compare a total against the fixed references
pub fn compare(total_tons: f64) -> Comparison {
    let standing = Standing::classify(total_tons);
    Comparison {
        trees_to_offset: trees_to_offset(total_tons),
        climate_target: ReferenceBar::new("Climate Target (2.0)", CLIMATE_TARGET_TONS, total_tons, true),
        student_average: ReferenceBar::new("Global Student Avg (3.5)", STUDENT_AVERAGE_TONS, total_tons, false),
        standing,
        message: standing.message().to_string(),
        mountain_height_percent: mountain_height_percent(total_tons),
    }
}
