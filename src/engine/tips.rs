//! Tip Derivation & Ranking
//!
//! Evaluates every rule of the catalog against the answers, sizes each fired
//! tip, then filters, ranks, deduplicates and caps the list.
//!
//! Impact sizing:
//! - `options` / `any_except`: scaled answer value × reduction fraction
//! - `flat`: fixed amount × country multiplier for the rule's category
//!
//! Pipeline:
//! 1. Discard impacts that round (3 decimals) to ≤ 0.001
//! 2. Stable sort by impact, highest first (rule order breaks ties)
//! 3. Keep the first occurrence of each tip id
//! 4. Truncate to the catalog cap
//!
//! The combined saving is a plain sum of the shown impacts. Tips that reduce
//! the same category are not netted against each other.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::answers::{Answer, AnswerSet};
use crate::tables::{CountryProfile, FactorTable, TipCatalog, TipRule, TipTrigger};
use crate::utils::{percent_of, round_to};

/// Impacts at or below this (after rounding to 3 decimals) are not shown
pub const TIP_IMPACT_EPSILON: f64 = 0.001;

/// Message for callers to show when no tip fired
pub const NO_TIPS_MESSAGE: &str = "Great choices! We couldn't find obvious quick wins based on your answers. \
Try exploring more low-impact options in daily life.";

/// A suggested change with its estimated saving (tCO₂e/year)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tip {
    pub id: String,
    pub title: String,
    pub description: String,
    pub emoji: String,
    pub impact: f64,
    /// Share of the total footprint, whole percent
    pub percent_of_total: u32,
    /// Footprint if only this tip is followed
    pub total_if_only_this: f64,
    pub source_question: String,
}

/// Ranked, capped tips with the combined estimate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TipPlan {
    pub tips: Vec<Tip>,
    pub combined_savings: f64,
    pub footprint_after_all: f64,
    pub combined_percent: u32,
}

impl TipPlan {
    pub fn is_empty(&self) -> bool {
        self.tips.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tips.len()
    }
}

/// A fired rule before ranking
#[derive(Debug, Clone)]
struct Candidate<'a> {
    rule: &'a TipRule,
    source: &'a str,
    impact: f64,
}

/// First answered source question of a rule ("doesn't apply" answers are skipped)
fn source_answer<'a>(rule: &'a TipRule, answers: &'a AnswerSet) -> Option<(&'a str, &'a Answer)> {
    rule.sources.iter().find_map(|id| {
        answers
            .get(id)
            .filter(|a| !a.is_not_applicable())
            .map(|a| (id.as_str(), a))
    })
}

/// Impact of one rule, or None when it does not fire
fn evaluate_rule(rule: &TipRule, answer: &Answer, profile: &CountryProfile) -> Option<f64> {
    let scaled = || answer.effective_value() * profile.factor(answer.category);

    match &rule.trigger {
        TipTrigger::Options { fractions } => fractions
            .iter()
            .find(|f| f.label == answer.label)
            .map(|f| scaled() * f.fraction),
        TipTrigger::AnyExcept { labels, fraction } => {
            if labels.iter().any(|l| *l == answer.label) {
                None
            } else {
                Some(scaled() * fraction)
            }
        }
        TipTrigger::Flat { amount, category, unless } => {
            if unless.iter().any(|l| *l == answer.label) {
                None
            } else {
                Some(amount * profile.factor(*category))
            }
        }
    }
}

/// Whether an impact is large enough to show
pub fn is_material(impact: f64) -> bool {
    round_to(impact, 3) > TIP_IMPACT_EPSILON
}

/// Derive tips against a resolved country profile
pub fn tips_for_profile(
    answers: &AnswerSet,
    profile: &CountryProfile,
    total: f64,
    catalog: &TipCatalog,
) -> TipPlan {
    let mut candidates: SmallVec<[Candidate; 16]> = catalog
        .rules
        .iter()
        .filter_map(|rule| {
            let (source, answer) = source_answer(rule, answers)?;
            let impact = evaluate_rule(rule, answer, profile)?;
            Some(Candidate { rule, source, impact })
        })
        .filter(|c| is_material(c.impact))
        .collect();

    // sort_by is stable, so equal impacts keep rule order
    candidates.sort_by(|a, b| b.impact.total_cmp(&a.impact));

    let mut tips: Vec<Tip> = Vec::with_capacity(catalog.cap.min(candidates.len()));
    for candidate in &candidates {
        if tips.len() >= catalog.cap {
            break;
        }
        if tips.iter().any(|t| t.id == candidate.rule.id) {
            continue;
        }
        tips.push(Tip {
            id: candidate.rule.id.clone(),
            title: candidate.rule.title.clone(),
            description: candidate.rule.description.clone(),
            emoji: candidate.rule.emoji.clone(),
            impact: candidate.impact,
            percent_of_total: percent_of(candidate.impact, total),
            total_if_only_this: (total - candidate.impact).max(0.0),
            source_question: candidate.source.to_string(),
        });
    }

    let combined_savings = tips.iter().fold(0.0, |acc, t| acc + t.impact);

    TipPlan {
        combined_percent: percent_of(combined_savings, total),
        footprint_after_all: (total - combined_savings).max(0.0),
        combined_savings,
        tips,
    }
}

/// Derive the ranked tip plan
///
/// `total` is the footprint the tips are measured against, normally the
/// breakdown total for the same answers and country.
pub fn derive_tips(
    answers: &AnswerSet,
    factors: &FactorTable,
    country_code: &str,
    total: f64,
    catalog: &TipCatalog,
) -> TipPlan {
    tips_for_profile(answers, factors.resolve(country_code), total, catalog)
}
