//! Emissions engine
//!
//! Pure, synchronous functions. No I/O, no logging, no shared state: the
//! country is resolved by the caller and passed in on every call, so repeated
//! calls with the same inputs return identical results.

pub mod breakdown;
pub mod tips;
pub mod comparison;

pub use breakdown::{breakdown_for_profile, compute_breakdown, Breakdown};
pub use tips::{derive_tips, is_material, tips_for_profile, Tip, TipPlan, NO_TIPS_MESSAGE, TIP_IMPACT_EPSILON};
pub use comparison::{
    compare, mountain_height_percent, trees_to_offset, Comparison, ReferenceBar, Standing,
    CLIMATE_TARGET_TONS, STUDENT_AVERAGE_TONS, TREE_ABSORPTION_TONS_PER_YEAR,
};
