//! Utility modules for footprint scoring
//!
//! Shared functionality used by the engine and the report formatters:
//! - Rounding: presentation-boundary rounding and percentage helpers

pub mod rounding;

// Re-export commonly used helpers
pub use rounding::{capped_percent, non_negative, percent_of, round_to};
