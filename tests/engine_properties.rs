// Engine property tests
//
// Purpose: check the engine invariants over many generated sessions drawn
// from the built-in tables
// Run with: cargo test --test engine_properties

use approx::assert_relative_eq;
use footprint_scorer::engine::{compute_breakdown, derive_tips, TIP_IMPACT_EPSILON};
use footprint_scorer::tables::{CountryProfile, FactorTable, Question, QuestionOption};
use footprint_scorer::{
    Answer, AnswerSet, Category, FootprintScorer, GradeTier, QuestionBank, QuizSession, Selection,
    TipCatalog,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const COUNTRIES: &[&str] = &["US", "IN", "GB", "AU", "DE", "GL", "ZZ", ""];

/// Random partial sessions across all tiers and countries
fn random_sessions(count: usize, seed: u64) -> Vec<QuizSession> {
    let bank = QuestionBank::builtin();
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|_| {
            let tier = GradeTier::all()[rng.gen_range(0..3)];
            let country = COUNTRIES[rng.gen_range(0..COUNTRIES.len())];
            let mut session = QuizSession::new(tier, country);
            for question in bank.questions(tier) {
                if rng.gen_bool(0.7) {
                    // Upper bound selects the shared "doesn't apply" option
                    let index = rng.gen_range(0..=question.options.len());
                    session
                        .answer(&bank, &question.id, &Selection::Index(index))
                        .unwrap();
                }
            }
            session
        })
        .collect()
}

fn raw(value: f64, category: Category) -> Answer {
    Answer {
        label: String::new(),
        value,
        category,
        emoji: None,
    }
}

fn plain_question(id: &str, category: Category) -> Question {
    Question {
        id: id.to_string(),
        category,
        title: id.to_string(),
        options: vec![QuestionOption {
            label: "any".to_string(),
            value: 0.0,
            emoji: None,
        }],
    }
}

// ============================================================================
// Section 1: Breakdown properties
// ============================================================================

#[test]
fn test_determinism() {
    let scorer = FootprintScorer::builtin();
    for session in random_sessions(200, 7) {
        assert_eq!(scorer.score(&session), scorer.score(&session));
    }
}

#[test]
fn test_additivity() {
    let scorer = FootprintScorer::builtin();
    for session in random_sessions(500, 11) {
        let result = scorer.score(&session);
        let sum: f64 = result.breakdown.iter().map(|(_, v)| v).sum();
        assert_relative_eq!(sum, result.total, epsilon = 1e-9);
        assert!(result.breakdown.iter().all(|(_, v)| v >= 0.0));
    }
}

#[test]
fn test_unknown_country_equals_default() {
    let bank = QuestionBank::builtin();
    let factors = FactorTable::builtin();
    for session in random_sessions(200, 13) {
        let questions = bank.questions(session.tier);
        assert_eq!(
            compute_breakdown(&session.answers, questions, &factors, "ZZ"),
            compute_breakdown(&session.answers, questions, &factors, "GL")
        );
    }
}

#[test]
fn test_monotonicity() {
    let bank = QuestionBank::builtin();
    let factors = FactorTable::builtin();
    let mut rng = StdRng::seed_from_u64(17);

    for session in random_sessions(200, 19) {
        let questions = bank.questions(session.tier);
        let before = compute_breakdown(&session.answers, questions, &factors, &session.country).total();

        let Some(unanswered) = questions.iter().find(|q| !session.answers.contains(&q.id)) else {
            continue;
        };
        let mut extended = session.clone();
        let index = rng.gen_range(0..unanswered.options.len());
        extended
            .answer(&bank, &unanswered.id, &Selection::Index(index))
            .unwrap();

        let after = compute_breakdown(&extended.answers, questions, &factors, &extended.country).total();
        assert!(after >= before, "{} < {}", after, before);
    }
}

// ============================================================================
// Section 2: Tip properties
// ============================================================================

#[test]
fn test_tip_cap_threshold_and_order() {
    let scorer = FootprintScorer::builtin();
    let cap = scorer.tips().cap;

    for session in random_sessions(500, 23) {
        let plan = scorer.score(&session).tips;
        assert!(plan.tips.len() <= cap);
        for tip in &plan.tips {
            assert!(tip.impact > TIP_IMPACT_EPSILON);
        }
        for pair in plan.tips.windows(2) {
            assert!(pair[0].impact >= pair[1].impact);
        }
        let mut ids: Vec<&str> = plan.tips.iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), plan.tips.len());
    }
}

#[test]
fn test_combined_savings_clamped() {
    let scorer = FootprintScorer::builtin();
    for session in random_sessions(300, 29) {
        let result = scorer.score(&session);
        let plan = &result.tips;
        let sum: f64 = plan.tips.iter().map(|t| t.impact).sum();
        assert_relative_eq!(plan.combined_savings, sum, epsilon = 1e-12);
        assert_relative_eq!(
            plan.footprint_after_all,
            (result.total - sum).max(0.0),
            epsilon = 1e-12
        );
    }
}

// ============================================================================
// Section 3: Worked examples
// ============================================================================

#[test]
fn test_us_example() {
    let questions = vec![
        plain_question("q1", Category::Transport),
        plain_question("q2", Category::Housing),
    ];
    let answers: AnswerSet = [
        ("q1", raw(0.1, Category::Transport)),
        ("q2", raw(0.05, Category::Housing)),
    ]
    .into_iter()
    .collect();
    let factors = FactorTable::builtin();

    let b = compute_breakdown(&answers, &questions, &factors, "US");
    assert_relative_eq!(b.transport, 0.12, epsilon = 1e-12);
    assert_relative_eq!(b.housing, 0.055, epsilon = 1e-12);
    assert_eq!(b.food, 0.0);
    assert_eq!(b.digital, 0.0);
    assert_eq!(b.shopping, 0.0);
    assert_eq!(b.misc, 0.0);
    assert_relative_eq!(b.total(), 0.175, epsilon = 1e-9);

    // Same answers, unknown country: identical to the explicit default
    assert_eq!(
        compute_breakdown(&answers, &questions, &factors, "QQ"),
        compute_breakdown(&answers, &questions, &factors, "GL")
    );
}

#[test]
fn test_ac_tip_example() {
    let answers: AnswerSet = [(
        "ac_use",
        Answer {
            label: "> 4 hrs/day".to_string(),
            value: 0.5,
            category: Category::Housing,
            emoji: None,
        },
    )]
    .into_iter()
    .collect();

    let factors = FactorTable::new(
        vec![CountryProfile {
            code: "GL".to_string(),
            name: "Global Avg".to_string(),
            flag: String::new(),
            factors: Category::ALL.iter().map(|c| (*c, 1.0)).collect(),
        }],
        "GL",
    )
    .unwrap();

    let plan = derive_tips(&answers, &factors, "GL", 0.5, &TipCatalog::builtin());
    assert_eq!(plan.tips.len(), 1);
    assert_eq!(plan.tips[0].id, "reduce_ac");
    assert_relative_eq!(plan.tips[0].impact, 0.125, epsilon = 1e-12);
}

#[test]
fn test_clean_habits_yield_no_tips() {
    let scorer = FootprintScorer::builtin();
    let mut session = QuizSession::new(GradeTier::College, "GB");
    for question in scorer.questions().questions(GradeTier::College) {
        session
            .answer(scorer.questions(), &question.id, &Selection::Index(0))
            .unwrap();
    }
    // First option of every college question is the low-impact habit
    let result = scorer.score(&session);
    assert!(result.tips.is_empty());
    assert_eq!(result.tips.footprint_after_all, result.total);
}
