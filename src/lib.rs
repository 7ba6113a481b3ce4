//! Student Footprint Scorer
//!
//! Quiz-style carbon-footprint estimation for students: grade-tier question
//! sets, country-scaled category breakdowns, ranked reduction tips and
//! comparison metrics.
//!
//! Layout:
//! - `tables/`: question bank, country factors, tip rules (built in or JSON)
//! - `engine/`: pure breakdown, tip ranking and comparison functions
//! - `scorer`: coordinator owning the tables, with parallel batch scoring
//! - `report/`: Markdown and JSON formatters
//! - `api_server`, `country`, `snapshot`: HTTP surface (feature `api`)

pub mod utils;
pub mod category;
pub mod tables;
pub mod answers;
pub mod engine;
pub mod session;
pub mod config;
pub mod scorer;
pub mod report;

#[cfg(feature = "api")]
pub mod country;
#[cfg(feature = "api")]
pub mod snapshot;
#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use category::Category;
pub use tables::{FactorTable, GradeTier, QuestionBank, TableError, TipCatalog};
pub use answers::{Answer, AnswerError, AnswerSet, Selection};
pub use engine::{compute_breakdown, derive_tips, Breakdown, Comparison, Tip, TipPlan};
pub use session::{QuizProgress, QuizSession, SessionRequest};
pub use config::{EngineConfig, ServerConfig};
pub use scorer::{FootprintResult, FootprintScorer};
pub use report::{JsonFormatter, MarkdownFormatter};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppError, AppState};
#[cfg(feature = "api")]
pub use snapshot::{FootprintSnapshot, SnapshotStore};
