//! Families unlocked at Medium: fraction-of and averages.

use rand::Rng;
use tracing::debug;

use crate::problem_engine::{
    helpers::{gcd, join_numbers, pick, pick_amount, pick_multiple},
    models::{DifficultyTier, Problem},
};

// ---------------------------------------------------------------------------
// Fraction of a quantity
// ---------------------------------------------------------------------------

/// "What is `num`/`den` of `total`?" with the exact answer.
pub fn fraction_of(num: u32, den: u32, total: u32) -> Problem {
    Problem::new(
        format!("What is {num}/{den} of {total}?"),
        (num * total) as f64 / den as f64,
    )
}

pub fn generate_fraction<R: Rng>(rng: &mut R, tier: DifficultyTier) -> Problem {
    let (den, lo, hi) = match tier {
        DifficultyTier::Easy   => (pick(rng, &[2, 4]), 4, 40),
        DifficultyTier::Medium => (pick(rng, &[2, 3, 4, 5]), 10, 100),
        DifficultyTier::Hard   => (rng.gen_range(2..=8), 20, 240),
        DifficultyTier::Legend => (rng.gen_range(2..=12), 24, 600),
    };
    let raw_num = rng.gen_range(1..den);
    let g = gcd(raw_num, den);
    let (num, den) = (raw_num / g, den / g);

    let mut total = pick_amount(rng, tier, lo, hi);
    if total % den != 0 {
        let step = if tier.prefers_round_numbers() {
            den * 5 / gcd(den, 5)
        } else {
            den
        };
        match pick_multiple(rng, step, lo, hi) {
            Some(t) => total = t,
            None => {
                debug!(num, den, "no whole total in range, using 1/2 of 10");
                return fraction_of(1, 2, 10);
            }
        }
    }

    let answer = (num * total / den) as f64;
    let question = match rng.gen_range(0..3) {
        0 => format!("What is {num}/{den} of {total}?"),
        1 => format!(
            "A class has {total} pupils and {num}/{den} of them play football. \
             How many pupils play football?"
        ),
        _ => format!(
            "A ribbon is {total} cm long. You cut off {num}/{den} of it. \
             How many centimetres did you cut off?"
        ),
    };
    Problem::new(question, answer)
}

// ---------------------------------------------------------------------------
// Averages
// ---------------------------------------------------------------------------

/// Mean of `values`, rounded to the nearest whole number.
pub fn rounded_mean(values: &[u32]) -> f64 {
    let sum: u32 = values.iter().sum();
    (sum as f64 / values.len() as f64).round()
}

pub fn generate_average<R: Rng>(rng: &mut R, tier: DifficultyTier) -> Problem {
    let (count, lo, hi) = match tier {
        DifficultyTier::Easy   => (3, 10, 50),
        DifficultyTier::Medium => (3, 40, 100),
        DifficultyTier::Hard   => (4, 50, 100),
        DifficultyTier::Legend => (5, 60, 200),
    };

    // Legend sometimes asks for the missing value instead of the mean.
    if tier == DifficultyTier::Legend && rng.gen_bool(0.4) {
        let known: Vec<u32> = (0..count - 1).map(|_| rng.gen_range(lo..=hi)).collect();
        let mean = rng.gen_range(lo..=hi);
        let missing = (mean * count) as i64 - known.iter().map(|&v| v as i64).sum::<i64>();
        return Problem::new(
            format!(
                "The average of {count} numbers is {mean}. {} of them are {}. \
                 What is the remaining number?",
                known.len(),
                join_numbers(&known)
            ),
            missing as f64,
        );
    }

    let values: Vec<u32> = (0..count).map(|_| pick_amount(rng, tier, lo, hi)).collect();
    let answer = rounded_mean(&values);
    let question = if rng.gen_bool(0.5) {
        format!(
            "Maya's test scores are {}. What is her average score, \
             rounded to the nearest whole number?",
            join_numbers(&values)
        )
    } else {
        format!(
            "A shop sold {} books over {count} days. What is the average number sold \
             per day, rounded to the nearest whole number?",
            join_numbers(&values)
        )
    };
    Problem::new(question, answer)
}
