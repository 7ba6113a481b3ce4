//! Answers and option selection
//!
//! An answer records the chosen option together with its category, captured at
//! selection time so category totals never need to re-join the question table.

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::category::Category;
use crate::tables::{GradeTier, Question, QuestionBank, QuestionOption};
use crate::utils::non_negative;

/// Option offered on every question in addition to its own options
pub const NOT_APPLICABLE_LABEL: &str = "This doesn't apply to me";
const NOT_APPLICABLE_EMOJI: &str = "🚫";

/// Selected option for one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default)]
    pub label: String,
    pub value: f64,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl Answer {
    /// Capture an option of a question
    pub fn from_option(question: &Question, option: &QuestionOption) -> Self {
        Self {
            label: option.label.clone(),
            value: option.value,
            category: question.category,
            emoji: option.emoji.clone(),
        }
    }

    /// "Doesn't apply" answer: counts as answered, contributes 0
    pub fn not_applicable(question: &Question) -> Self {
        Self {
            label: NOT_APPLICABLE_LABEL.to_string(),
            value: 0.0,
            category: question.category,
            emoji: Some(NOT_APPLICABLE_EMOJI.to_string()),
        }
    }

    pub fn is_not_applicable(&self) -> bool {
        self.label == NOT_APPLICABLE_LABEL
    }

    /// Value used by the engine (negative or non-finite counts as 0)
    pub fn effective_value(&self) -> f64 {
        non_negative(self.value)
    }
}

/// How a caller picks an option: by position or by exact label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    Index(usize),
    Label(String),
}

impl From<usize> for Selection {
    fn from(index: usize) -> Self {
        Selection::Index(index)
    }
}

impl From<&str> for Selection {
    fn from(label: &str) -> Self {
        Selection::Label(label.to_string())
    }
}

/// Rejected selections and raw answers
#[derive(Debug, Error, PartialEq)]
pub enum AnswerError {
    #[error("question '{question_id}' is not part of the {tier} question set")]
    UnknownQuestion { tier: GradeTier, question_id: String },

    #[error("option index {index} is out of range for question '{question_id}' ({count} options)")]
    OptionOutOfRange {
        question_id: String,
        index: usize,
        count: usize,
    },

    #[error("question '{question_id}' has no option labelled '{label}'")]
    UnknownOption { question_id: String, label: String },

    #[error("answer to '{question_id}' has invalid value {value} (must be finite and >= 0)")]
    InvalidValue { question_id: String, value: f64 },
}

/// Resolve a selection against the question bank
///
/// Index `options.len()` and the label [`NOT_APPLICABLE_LABEL`] select the
/// shared "doesn't apply" option, unless the question defines that label itself.
pub fn select(
    bank: &QuestionBank,
    tier: GradeTier,
    question_id: &str,
    selection: &Selection,
) -> Result<Answer, AnswerError> {
    let question = bank
        .question(tier, question_id)
        .ok_or_else(|| AnswerError::UnknownQuestion {
            tier,
            question_id: question_id.to_string(),
        })?;

    let count = question.options.len();
    match selection {
        Selection::Index(index) if *index == count => Ok(Answer::not_applicable(question)),
        Selection::Index(index) => question
            .options
            .get(*index)
            .map(|option| Answer::from_option(question, option))
            .ok_or_else(|| AnswerError::OptionOutOfRange {
                question_id: question_id.to_string(),
                index: *index,
                count: count + 1,
            }),
        Selection::Label(label) => match question.option_by_label(label) {
            Some(option) => Ok(Answer::from_option(question, option)),
            None if label == NOT_APPLICABLE_LABEL => Ok(Answer::not_applicable(question)),
            None => Err(AnswerError::UnknownOption {
                question_id: question_id.to_string(),
                label: label.clone(),
            }),
        },
    }
}

/// Answers keyed by question id, iterated in id order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, Answer>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, replacing any previous one for the same question
    pub fn insert(&mut self, question_id: impl Into<String>, answer: Answer) -> Option<Answer> {
        self.0.insert(question_id.into(), answer)
    }

    /// Record an answer and return the stored entry
    pub fn set(&mut self, question_id: impl Into<String>, answer: Answer) -> &Answer {
        match self.0.entry(question_id.into()) {
            btree_map::Entry::Occupied(mut entry) => {
                entry.insert(answer);
                entry.into_mut()
            }
            btree_map::Entry::Vacant(entry) => entry.insert(answer),
        }
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.0.get(question_id)
    }

    pub fn remove(&mut self, question_id: &str) -> Option<Answer> {
        self.0.remove(question_id)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Answer> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, String, Answer> {
        self.0.iter_mut()
    }

    /// Reject negative or non-finite raw values
    pub fn validate(&self) -> Result<(), AnswerError> {
        for (question_id, answer) in &self.0 {
            if !answer.value.is_finite() || answer.value < 0.0 {
                return Err(AnswerError::InvalidValue {
                    question_id: question_id.clone(),
                    value: answer.value,
                });
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a AnswerSet {
    type Item = (&'a String, &'a Answer);
    type IntoIter = btree_map::Iter<'a, String, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Answer)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (K, Answer)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
