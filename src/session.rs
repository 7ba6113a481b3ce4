//! Quiz session state
//!
//! A session holds the chosen tier, the country the caller resolved, and the
//! answers collected one question at a time. Changing tier or restarting
//! discards the answers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::answers::{select, Answer, AnswerError, AnswerSet, Selection};
use crate::tables::{GradeTier, QuestionBank, GLOBAL_COUNTRY_CODE};

/// Seconds a typical student spends per question
pub const SECONDS_PER_QUESTION: u32 = 6;

/// Progress through the tier's questions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuizProgress {
    pub answered: usize,
    pub total: usize,
    pub percent: u32,
    pub seconds_remaining: u32,
}

/// One user's quiz in progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSession {
    pub tier: GradeTier,
    pub country: String,
    pub answers: AnswerSet,
}

impl QuizSession {
    pub fn new(tier: GradeTier, country: impl Into<String>) -> Self {
        Self {
            tier,
            country: country.into(),
            answers: AnswerSet::new(),
        }
    }

    /// Switch tier; answers are discarded when the tier actually changes
    pub fn set_tier(&mut self, tier: GradeTier) {
        if tier != self.tier {
            self.tier = tier;
            self.answers.clear();
        }
    }

    pub fn set_country(&mut self, country: impl Into<String>) {
        self.country = country.into();
    }

    /// Answer one question of the current tier
    pub fn answer(
        &mut self,
        bank: &QuestionBank,
        question_id: &str,
        selection: &Selection,
    ) -> Result<&Answer, AnswerError> {
        let answer = select(bank, self.tier, question_id, selection)?;
        Ok(self.answers.set(question_id, answer))
    }

    /// Start over with the same tier and country
    pub fn reset(&mut self) {
        self.answers.clear();
    }

    /// Answered count against the tier's questions
    pub fn progress(&self, bank: &QuestionBank) -> QuizProgress {
        let questions = bank.questions(self.tier);
        let total = questions.len();
        let answered = questions
            .iter()
            .filter(|q| self.answers.contains(&q.id))
            .count();
        let percent = if total == 0 {
            100
        } else {
            ((answered as f64 / total as f64) * 100.0).round() as u32
        };

        QuizProgress {
            answered,
            total,
            percent,
            seconds_remaining: (total - answered) as u32 * SECONDS_PER_QUESTION,
        }
    }
}

/// Wire form of a session: selections are resolved against the bank, raw
/// answers are taken as given after validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub tier: GradeTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default)]
    pub selections: BTreeMap<String, Selection>,
    #[serde(default)]
    pub answers: AnswerSet,
}

impl SessionRequest {
    /// Build a session; `default_country` applies when no country was sent
    ///
    /// Raw answers must name questions of the request's tier and take that
    /// question's category, whatever category they were sent with.
    /// Selections win over raw answers for the same question.
    pub fn into_session(
        self,
        bank: &QuestionBank,
        default_country: &str,
    ) -> Result<QuizSession, AnswerError> {
        let tier = self.tier;
        let mut answers = self.answers;
        answers.validate()?;

        for (question_id, answer) in answers.iter_mut() {
            let question = bank
                .question(tier, question_id)
                .ok_or_else(|| AnswerError::UnknownQuestion {
                    tier,
                    question_id: question_id.clone(),
                })?;
            answer.category = question.category;
        }

        let country = self
            .country
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| default_country.to_string());

        let mut session = QuizSession {
            tier,
            country,
            answers,
        };
        for (question_id, selection) in &self.selections {
            session.answer(bank, question_id, selection)?;
        }
        Ok(session)
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(GradeTier::default(), GLOBAL_COUNTRY_CODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    #[test]
    fn test_progress() {
        let bank = QuestionBank::builtin();
        let mut session = QuizSession::new(GradeTier::MiddleSchool, "IN");
        let start = session.progress(&bank);
        assert_eq!(start.answered, 0);
        assert_eq!(start.total, 16);
        assert_eq!(start.seconds_remaining, 96);

        session.answer(&bank, "diet", &Selection::Index(0)).unwrap();
        session.answer(&bank, "bulbs", &"Mixed".into()).unwrap();
        let p = session.progress(&bank);
        assert_eq!(p.answered, 2);
        assert_eq!(p.percent, 13);
        assert_eq!(p.seconds_remaining, 84);
    }

    #[test]
    fn test_reanswer_replaces() {
        let bank = QuestionBank::builtin();
        let mut session = QuizSession::new(GradeTier::MiddleSchool, "GL");
        session.answer(&bank, "diet", &Selection::Index(0)).unwrap();
        let answer = session.answer(&bank, "diet", &Selection::Index(2)).unwrap();
        assert_eq!(answer.label, "Meat often (several times/week)");
        assert_eq!(session.answers.len(), 1);
    }

    #[test]
    fn test_tier_change_resets_answers() {
        let bank = QuestionBank::builtin();
        let mut session = QuizSession::new(GradeTier::HighSchool, "GL");
        session.answer(&bank, "ac_use", &Selection::Index(1)).unwrap();

        session.set_tier(GradeTier::HighSchool);
        assert_eq!(session.answers.len(), 1);

        session.set_tier(GradeTier::College);
        assert!(session.answers.is_empty());
    }

    #[test]
    fn test_request_defaults_country_and_resolves_selections() {
        let bank = QuestionBank::builtin();
        let json = r#"{
            "tier": "upper",
            "selections": { "diet": 2, "long_flights": "1" }
        }"#;
        let request: SessionRequest = serde_json::from_str(json).unwrap();
        let session = request.into_session(&bank, "GL").unwrap();
        assert_eq!(session.tier, GradeTier::College);
        assert_eq!(session.country, "GL");
        assert_eq!(session.answers.get("long_flights").unwrap().category, Category::Transport);
        assert_eq!(session.answers.len(), 2);
    }

    #[test]
    fn test_request_rejects_answers_outside_the_tier() {
        let bank = QuestionBank::builtin();
        let json = r#"{
            "tier": "middle_school",
            "answers": { "long_flights": { "label": "> 1", "value": 1.6, "category": "transport" } }
        }"#;
        let request: SessionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.into_session(&bank, "GL"),
            Err(AnswerError::UnknownQuestion {
                tier: GradeTier::MiddleSchool,
                question_id: "long_flights".to_string(),
            })
        );
    }

    #[test]
    fn test_raw_answer_takes_question_category() {
        let bank = QuestionBank::builtin();
        let json = r#"{
            "tier": "college",
            "country": "IN",
            "answers": {
                "diet": { "label": "Meat often (several times/week)", "value": 0.6, "category": "transport" }
            }
        }"#;
        let request: SessionRequest = serde_json::from_str(json).unwrap();
        let session = request.into_session(&bank, "GL").unwrap();
        assert_eq!(session.answers.get("diet").unwrap().category, Category::Food);
    }

    #[test]
    fn test_not_applicable_counts_as_answered() {
        let bank = QuestionBank::builtin();
        let mut session = QuizSession::new(GradeTier::MiddleSchool, "GL");
        session.answer(&bank, "diet", &Selection::Index(3)).unwrap();
        session
            .answer(&bank, "bulbs", &crate::answers::NOT_APPLICABLE_LABEL.into())
            .unwrap();

        let p = session.progress(&bank);
        assert_eq!(p.answered, 2);
        assert_eq!(p.seconds_remaining, 84);
    }

    #[test]
    fn test_request_rejects_negative_raw_answer() {
        let bank = QuestionBank::builtin();
        let json = r#"{
            "tier": "college",
            "country": "US",
            "answers": { "bulbs": { "value": -0.02, "category": "housing" } }
        }"#;
        let request: SessionRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(
            request.into_session(&bank, "GL"),
            Err(AnswerError::InvalidValue { .. })
        ));
    }
}
