//! Question Bank
//!
//! One question table per grade tier. Each option carries a unitless
//! contribution to its question's category, before country scaling.
//!
//! Tables are built in (see `builtin_questions`) and may be replaced by a JSON
//! file of the same shape:
//!
//! ```json
//! {
//!   "middle_school": [
//!     { "id": "diet", "category": "food", "title": "Your usual diet",
//!       "options": [ { "label": "Mixed (some meat)", "value": 0.28, "emoji": "🍳" } ] }
//!   ],
//!   "high_school": [],
//!   "college": []
//! }
//! ```

use anyhow::{Context, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::builtin_questions;
use super::grade_tier::GradeTier;
use super::TableError;
use crate::category::Category;

/// A single selectable answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

/// A lifestyle question contributing to exactly one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub options: Vec<QuestionOption>,
}

impl Question {
    /// Find an option by its exact label
    pub fn option_by_label(&self, label: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.label == label)
    }
}

/// Question tables for all grade tiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    middle_school: Vec<Question>,
    high_school: Vec<Question>,
    college: Vec<Question>,
}

impl QuestionBank {
    /// Built-in question tables
    pub fn builtin() -> Self {
        Self {
            middle_school: builtin_questions::build(builtin_questions::MIDDLE_SCHOOL),
            high_school: builtin_questions::build(builtin_questions::HIGH_SCHOOL),
            college: builtin_questions::build(builtin_questions::COLLEGE),
        }
    }

    /// Load question tables from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read question bank: {:?}", path))?;

        let bank: QuestionBank = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse question bank JSON")?;

        bank.validate()
            .with_context(|| format!("Invalid question bank: {:?}", path))?;

        Ok(bank)
    }

    /// Questions for a tier, in presentation order
    pub fn questions(&self, tier: GradeTier) -> &[Question] {
        match tier {
            GradeTier::MiddleSchool => &self.middle_school,
            GradeTier::HighSchool => &self.high_school,
            GradeTier::College => &self.college,
        }
    }

    /// Look up one question of a tier
    pub fn question(&self, tier: GradeTier, id: &str) -> Option<&Question> {
        self.questions(tier).iter().find(|q| q.id == id)
    }

    /// Check every tier: unique ids, non-empty options, finite non-negative values
    pub fn validate(&self) -> Result<(), TableError> {
        for tier in GradeTier::all() {
            let mut seen = FxHashSet::default();
            for question in self.questions(*tier) {
                if !seen.insert(question.id.as_str()) {
                    return Err(TableError::DuplicateQuestion {
                        tier: *tier,
                        question_id: question.id.clone(),
                    });
                }
                if question.options.is_empty() {
                    return Err(TableError::NoOptions {
                        tier: *tier,
                        question_id: question.id.clone(),
                    });
                }
                for option in &question.options {
                    if !option.value.is_finite() || option.value < 0.0 {
                        return Err(TableError::InvalidOptionValue {
                            question_id: question.id.clone(),
                            label: option.label.clone(),
                            value: option.value,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_bank_is_valid() {
        let bank = QuestionBank::builtin();
        assert!(bank.validate().is_ok());
        assert_eq!(bank.questions(GradeTier::MiddleSchool).len(), 16);
        assert_eq!(bank.questions(GradeTier::HighSchool).len(), 17);
        assert_eq!(bank.questions(GradeTier::College).len(), 22);
    }

    #[test]
    fn test_question_lookup() {
        let bank = QuestionBank::builtin();
        let q = bank.question(GradeTier::College, "long_flights").unwrap();
        assert_eq!(q.category, Category::Transport);
        assert_eq!(q.option_by_label("> 1").unwrap().value, 1.6);
        assert!(bank.question(GradeTier::MiddleSchool, "long_flights").is_none());
    }

    #[test]
    fn test_negative_value_rejected() {
        let mut bank = QuestionBank::builtin();
        bank.middle_school[0].options[0].value = -0.1;
        match bank.validate() {
            Err(TableError::InvalidOptionValue { question_id, .. }) => {
                assert_eq!(question_id, "school_commute");
            }
            other => panic!("expected InvalidOptionValue, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_question_rejected() {
        let mut bank = QuestionBank::builtin();
        let dup = bank.college[0].clone();
        bank.college.push(dup);
        assert!(matches!(
            bank.validate(),
            Err(TableError::DuplicateQuestion { tier: GradeTier::College, .. })
        ));
    }

    #[test]
    fn test_json_shape_round_trips() {
        let bank = QuestionBank::builtin();
        let json = serde_json::to_string(&bank).unwrap();
        let parsed: QuestionBank = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.questions(GradeTier::HighSchool), bank.questions(GradeTier::HighSchool));
    }
}
