//! Families unlocked at Legend: probability and number sequences.

use rand::Rng;

use crate::problem_engine::{
    helpers::pick,
    models::{DifficultyTier, Problem},
};

// ---------------------------------------------------------------------------
// Probability
// ---------------------------------------------------------------------------

/// Bag sizes that divide 100, so chances are whole percentages.
fn bag_sizes(tier: DifficultyTier) -> &'static [u32] {
    match tier {
        DifficultyTier::Easy | DifficultyTier::Medium => &[4, 5, 10, 20],
        DifficultyTier::Hard   => &[4, 5, 10, 20, 25],
        DifficultyTier::Legend => &[4, 5, 10, 20, 25, 50],
    }
}

pub fn generate_probability<R: Rng>(rng: &mut R, tier: DifficultyTier) -> Problem {
    let scale = tier.scale();
    match rng.gen_range(0..3) {
        0 => {
            let total = pick(rng, bag_sizes(tier));
            let red = rng.gen_range(1..total);
            Problem::new(
                format!(
                    "A bag holds {red} red and {} blue marbles. If you pick one without \
                     looking, what is the percent chance that it is red?",
                    total - red
                ),
                (red * 100 / total) as f64,
            )
        }
        1 => {
            let rolls = 6 * rng.gen_range(2..=10 * scale);
            let face = rng.gen_range(1..=6);
            Problem::new(
                format!(
                    "A fair six-sided die is rolled {rolls} times. How many times would \
                     you expect to roll a {face}?"
                ),
                (rolls / 6) as f64,
            )
        }
        _ => {
            let sections = pick(rng, &[4, 5, 8, 10]);
            let blue = rng.gen_range(1..sections);
            let spins = sections * rng.gen_range(2..=5 * scale);
            Problem::new(
                format!(
                    "A spinner has {sections} equal sections and {blue} of them are blue. \
                     If you spin it {spins} times, how many times do you expect to land on blue?"
                ),
                (spins / sections * blue) as f64,
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Sequences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Pattern {
    Rising,
    Falling,
    Geometric,
    Squares,
}

fn patterns_for(tier: DifficultyTier) -> &'static [Pattern] {
    match tier {
        DifficultyTier::Easy | DifficultyTier::Medium => &[Pattern::Rising],
        DifficultyTier::Hard   => &[Pattern::Rising, Pattern::Falling, Pattern::Geometric],
        DifficultyTier::Legend => &[Pattern::Falling, Pattern::Geometric, Pattern::Squares],
    }
}

/// Shows four terms and asks for the fifth. Every term is positive.
pub fn generate_sequence<R: Rng>(rng: &mut R, tier: DifficultyTier) -> Problem {
    let scale = tier.scale();
    let (terms, next): (Vec<u32>, u32) = match pick(rng, patterns_for(tier)) {
        Pattern::Rising => {
            let start = rng.gen_range(1..=10 * scale);
            let step = rng.gen_range(2..=3 + scale * 3);
            ((0..4).map(|i| start + i * step).collect(), start + 4 * step)
        }
        Pattern::Falling => {
            let step = rng.gen_range(2..=3 + scale * 3);
            let next = rng.gen_range(1..=10 * scale);
            let start = next + 4 * step;
            ((0..4).map(|i| start - i * step).collect(), next)
        }
        Pattern::Geometric => {
            let start = rng.gen_range(1..=5);
            let ratio: u32 = rng.gen_range(2..=3);
            ((0..4).map(|i| start * ratio.pow(i)).collect(), start * ratio.pow(4))
        }
        Pattern::Squares => {
            let base = rng.gen_range(1..=6);
            let offset = rng.gen_range(0..=5);
            let term = |i: u32| (base + i) * (base + i) + offset;
            ((0..4).map(term).collect(), term(4))
        }
    };
    let shown = terms.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", ");
    Problem::new(format!("What number comes next: {shown}, ...?"), next as f64)
}
