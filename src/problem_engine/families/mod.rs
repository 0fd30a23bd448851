//! Family generators grouped by the tier that unlocks them.
//!
//! Every word-problem generator has the same shape:
//!
//! ```ignore
//! pub fn generate_<family><R: Rng>(rng: &mut R, tier: DifficultyTier) -> Problem
//! ```
//!
//! Arithmetic additionally takes the operator and the player level. Raw
//! output may still fail the validity filter; `generator.rs` wraps these
//! calls in the bounded retry loop.

/// +, -, ×, ÷
pub mod arithmetic;
/// Percentage, distance/rate/time, discounts
pub mod easy;
/// Fraction-of, averages
pub mod medium;
/// Ratio/speed, algebra, geometry
pub mod hard;
/// Probability, sequences
pub mod legend;

use rand::Rng;

use crate::problem_engine::models::{DifficultyTier, Problem, ProblemFamily};

/// One unfiltered draw from `family`.
pub fn generate_raw<R: Rng>(
    rng: &mut R,
    family: ProblemFamily,
    tier: DifficultyTier,
    level: u32,
) -> Problem {
    match family {
        ProblemFamily::Arithmetic(op) => arithmetic::generate(rng, op, tier, level),
        ProblemFamily::Percentage     => easy::generate_percentage(rng, tier),
        ProblemFamily::Distance       => easy::generate_distance(rng, tier),
        ProblemFamily::Discount       => easy::generate_discount(rng, tier),
        ProblemFamily::Fraction       => medium::generate_fraction(rng, tier),
        ProblemFamily::Average        => medium::generate_average(rng, tier),
        ProblemFamily::RatioSpeed     => hard::generate_ratio_speed(rng, tier),
        ProblemFamily::Algebra        => hard::generate_algebra(rng, tier),
        ProblemFamily::Geometry       => hard::generate_geometry(rng, tier),
        ProblemFamily::Probability    => legend::generate_probability(rng, tier),
        ProblemFamily::Sequence       => legend::generate_sequence(rng, tier),
    }
}
