//! Static configuration tables
//!
//! - Question bank: one question table per grade tier
//! - Country factors: per-category multipliers with a fallback profile
//! - Tip rules: triggers and reduction fractions for suggested changes
//!
//! All tables are built in and can be replaced from JSON at startup.
//! They are validated once and never mutated afterwards.

pub mod grade_tier;
pub mod questions;
mod builtin_questions;
pub mod country_factors;
pub mod tip_rules;

use thiserror::Error;

use crate::category::Category;

// Re-export commonly used types
pub use grade_tier::GradeTier;
pub use questions::{Question, QuestionBank, QuestionOption};
pub use country_factors::{normalize_code, CountryProfile, CountrySummary, FactorTable, GLOBAL_COUNTRY_CODE};
pub use tip_rules::{LabelFraction, TipCatalog, TipRule, TipTrigger, DEFAULT_TIP_CAP};

/// Table validation failures
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("duplicate question id '{question_id}' in {tier} table")]
    DuplicateQuestion { tier: GradeTier, question_id: String },

    #[error("question '{question_id}' in {tier} table has no options")]
    NoOptions { tier: GradeTier, question_id: String },

    #[error("option '{label}' of question '{question_id}' has invalid value {value} (must be finite and >= 0)")]
    InvalidOptionValue {
        question_id: String,
        label: String,
        value: f64,
    },

    #[error("country '{country}' has invalid {category} factor {factor}")]
    InvalidFactor {
        country: String,
        category: Category,
        factor: f64,
    },

    #[error("country '{0}' is listed more than once")]
    DuplicateCountry(String),

    #[error("fallback country '{0}' is not in the factor table")]
    MissingFallback(String),

    #[error("tip '{tip_id}' has invalid weight {value}")]
    InvalidTipWeight { tip_id: String, value: f64 },

    #[error("tip '{0}' has no source questions")]
    NoTipSources(String),

    #[error("tip cap must be at least 1")]
    ZeroTipCap,
}
