//! Breakdown Computation
//!
//! Sums scaled answer contributions into the six category accumulators.
//!
//! Algorithm:
//! 1. Start every category at 0
//! 2. For each question of the tier that has an answer, scale the answer value
//!    by the active country's multiplier for the question's category
//! 3. Add into that category's accumulator
//!
//! Unanswered questions, answers to questions outside the tier, negative and
//! non-finite values all contribute 0. Unknown country codes use the fallback
//! profile. The computation never fails.

use serde::{Deserialize, Serialize};

use crate::answers::AnswerSet;
use crate::category::Category;
use crate::tables::{CountryProfile, FactorTable, Question};
use crate::utils::round_to;

/// Scaled emissions per category (tCO₂e/year)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub housing: f64,
    pub transport: f64,
    pub food: f64,
    pub digital: f64,
    pub shopping: f64,
    pub misc: f64,
}

impl Breakdown {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Housing => self.housing,
            Category::Transport => self.transport,
            Category::Food => self.food,
            Category::Digital => self.digital,
            Category::Shopping => self.shopping,
            Category::Misc => self.misc,
        }
    }

    fn slot(&mut self, category: Category) -> &mut f64 {
        match category {
            Category::Housing => &mut self.housing,
            Category::Transport => &mut self.transport,
            Category::Food => &mut self.food,
            Category::Digital => &mut self.digital,
            Category::Shopping => &mut self.shopping,
            Category::Misc => &mut self.misc,
        }
    }

    pub fn add(&mut self, category: Category, amount: f64) {
        *self.slot(category) += amount;
    }

    /// Sum over all six categories
    pub fn total(&self) -> f64 {
        Category::ALL.iter().fold(0.0, |acc, c| acc + self.get(*c))
    }

    /// All six categories in display order
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    /// Category with the largest share (first in display order on ties)
    pub fn largest(&self) -> Option<(Category, f64)> {
        self.iter()
            .filter(|(_, v)| *v > 0.0)
            .fold(None, |best, (c, v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((c, v)),
            })
    }

    /// Copy rounded for display
    pub fn rounded(&self, places: u32) -> Breakdown {
        let mut out = Breakdown::default();
        for (category, value) in self.iter() {
            *out.slot(category) = round_to(value, places);
        }
        out
    }
}

/// Compute the breakdown for one tier's questions against a resolved profile
pub fn breakdown_for_profile(
    answers: &AnswerSet,
    questions: &[Question],
    profile: &CountryProfile,
) -> Breakdown {
    let mut breakdown = Breakdown::default();

    for question in questions {
        let Some(answer) = answers.get(&question.id) else {
            continue;
        };
        let scaled = answer.effective_value() * profile.factor(question.category);
        breakdown.add(question.category, scaled);
    }

    breakdown
}

/// Compute the per-category breakdown
///
/// `country_code` is resolved against `factors`; unknown codes fall back to
/// the table's default profile.
pub fn compute_breakdown(
    answers: &AnswerSet,
    questions: &[Question],
    factors: &FactorTable,
    country_code: &str,
) -> Breakdown {
    breakdown_for_profile(answers, questions, factors.resolve(country_code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::Answer;
    use crate::tables::QuestionOption;
    use approx::assert_relative_eq;

    fn question(id: &str, category: Category) -> Question {
        Question {
            id: id.to_string(),
            category,
            title: id.to_string(),
            options: vec![QuestionOption {
                label: "only".to_string(),
                value: 0.0,
                emoji: None,
            }],
        }
    }

    fn answer(value: f64, category: Category) -> Answer {
        Answer {
            label: "only".to_string(),
            value,
            category,
            emoji: None,
        }
    }

    fn sample() -> (AnswerSet, Vec<Question>) {
        let questions = vec![
            question("q1", Category::Transport),
            question("q2", Category::Housing),
        ];
        let answers = [
            ("q1", answer(0.1, Category::Transport)),
            ("q2", answer(0.05, Category::Housing)),
        ]
        .into_iter()
        .collect();
        (answers, questions)
    }

    #[test]
    fn test_us_scaling() {
        let (answers, questions) = sample();
        let b = compute_breakdown(&answers, &questions, &FactorTable::builtin(), "US");
        assert_relative_eq!(b.transport, 0.12, epsilon = 1e-12);
        assert_relative_eq!(b.housing, 0.055, epsilon = 1e-12);
        assert_eq!(b.food, 0.0);
        assert_eq!(b.digital, 0.0);
        assert_eq!(b.shopping, 0.0);
        assert_eq!(b.misc, 0.0);
        assert_relative_eq!(b.total(), 0.175, epsilon = 1e-9);
    }

    #[test]
    fn test_unknown_country_matches_global() {
        let (answers, questions) = sample();
        let factors = FactorTable::builtin();
        assert_eq!(
            compute_breakdown(&answers, &questions, &factors, "ZZ"),
            compute_breakdown(&answers, &questions, &factors, "GL")
        );
    }

    #[test]
    fn test_answers_outside_the_tier_are_ignored() {
        let (mut answers, questions) = sample();
        answers.insert("stray", answer(5.0, Category::Food));
        let b = compute_breakdown(&answers, &questions, &FactorTable::builtin(), "GL");
        assert_eq!(b.food, 0.0);
        assert_relative_eq!(b.total(), 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_value_contributes_nothing() {
        let (mut answers, questions) = sample();
        answers.insert("q2", answer(-0.5, Category::Housing));
        let b = compute_breakdown(&answers, &questions, &FactorTable::builtin(), "GL");
        assert_eq!(b.housing, 0.0);
    }

    #[test]
    fn test_largest_and_rounded() {
        let (answers, questions) = sample();
        let b = compute_breakdown(&answers, &questions, &FactorTable::builtin(), "US");
        assert_eq!(b.largest().map(|(c, _)| c), Some(Category::Transport));
        assert_relative_eq!(b.rounded(1).transport, 0.1, epsilon = 1e-12);
        assert_eq!(Breakdown::default().largest(), None);
    }
}
