//! Footprint Scorer - Main coordinator for scoring quiz sessions
//!
//! Owns the static tables and runs the engine for a session: resolve the
//! country profile once, compute the breakdown, derive tips from its total,
//! then attach the comparison metrics.
//! Includes both single and parallel (Rayon) batch scoring.

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::answers::AnswerError;
use crate::config::EngineConfig;
use crate::engine::{breakdown_for_profile, compare, tips_for_profile, Breakdown, Comparison, TipPlan};
use crate::session::{QuizSession, SessionRequest};
use crate::tables::{CountrySummary, FactorTable, GradeTier, QuestionBank, TipCatalog};

/// Scored session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintResult {
    pub tier: GradeTier,
    /// Code as supplied by the caller
    pub requested_country: String,
    /// Profile actually applied (the fallback for unknown codes)
    pub country: CountrySummary,
    pub breakdown: Breakdown,
    pub total: f64,
    pub comparison: Comparison,
    pub tips: TipPlan,
    pub answered: usize,
    pub question_count: usize,
}

/// Main footprint scorer
pub struct FootprintScorer {
    questions: QuestionBank,
    factors: FactorTable,
    tips: TipCatalog,
}

impl FootprintScorer {
    /// Scorer over explicit tables
    pub fn new(questions: QuestionBank, factors: FactorTable, tips: TipCatalog) -> Self {
        Self { questions, factors, tips }
    }

    /// Scorer over the built-in tables
    pub fn builtin() -> Self {
        Self::new(QuestionBank::builtin(), FactorTable::builtin(), TipCatalog::builtin())
    }

    /// Load tables, using built-ins for any override not configured
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        info!("Initializing footprint scorer");

        let questions = match &config.questions_path {
            Some(path) => QuestionBank::load(path)
                .with_context(|| format!("Loading questions from {:?}", path))?,
            None => QuestionBank::builtin(),
        };
        let factors = match &config.countries_path {
            Some(path) => FactorTable::load(path)
                .with_context(|| format!("Loading country factors from {:?}", path))?,
            None => FactorTable::builtin(),
        };
        let tips = match &config.tips_path {
            Some(path) => TipCatalog::load(path)
                .with_context(|| format!("Loading tip rules from {:?}", path))?,
            None => TipCatalog::builtin(),
        };

        info!(
            middle_school = questions.questions(GradeTier::MiddleSchool).len(),
            high_school = questions.questions(GradeTier::HighSchool).len(),
            college = questions.questions(GradeTier::College).len(),
            countries = factors.profiles().len(),
            fallback = %factors.fallback().code,
            tip_rules = tips.rules.len(),
            tip_cap = tips.cap,
            "Footprint scorer initialized"
        );

        Ok(Self { questions, factors, tips })
    }

    pub fn questions(&self) -> &QuestionBank {
        &self.questions
    }

    pub fn factors(&self) -> &FactorTable {
        &self.factors
    }

    pub fn tips(&self) -> &TipCatalog {
        &self.tips
    }

    /// Score a session
    pub fn score(&self, session: &QuizSession) -> FootprintResult {
        let questions = self.questions.questions(session.tier);
        let profile = self.factors.resolve(&session.country);

        let breakdown = breakdown_for_profile(&session.answers, questions, profile);
        let total = breakdown.total();
        let tips = tips_for_profile(&session.answers, profile, total, &self.tips);
        let answered = questions
            .iter()
            .filter(|q| session.answers.contains(&q.id))
            .count();

        debug!(
            tier = %session.tier,
            requested = %session.country,
            country = %profile.code,
            answered,
            total,
            tips = tips.len(),
            "Scored session"
        );

        FootprintResult {
            tier: session.tier,
            requested_country: session.country.clone(),
            country: CountrySummary::from(profile),
            breakdown,
            total,
            comparison: compare(total),
            tips,
            answered,
            question_count: questions.len(),
        }
    }

    /// Build a session from a request and score it
    pub fn score_request(
        &self,
        request: SessionRequest,
        default_country: &str,
    ) -> Result<FootprintResult, AnswerError> {
        let session = request.into_session(&self.questions, default_country)?;
        Ok(self.score(&session))
    }

    /// Score many sessions IN PARALLEL
    ///
    /// Sessions are independent and the tables are read-only, so results come
    /// back in input order.
    pub fn score_many_parallel(&self, sessions: &[QuizSession]) -> Vec<FootprintResult> {
        sessions.par_iter().map(|s| self.score(s)).collect()
    }
}

impl Default for FootprintScorer {
    fn default() -> Self {
        Self::builtin()
    }
}
