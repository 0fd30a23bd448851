//! Families unlocked at Easy: percentage, distance/rate/time, discounts.

use rand::Rng;
use tracing::debug;

use crate::problem_engine::{
    helpers::{format_number, gcd, pick, pick_amount, pick_multiple},
    models::{DifficultyTier, Problem},
};

// ---------------------------------------------------------------------------
// Percentage
// ---------------------------------------------------------------------------

const EASY_PERCENTS: [u32; 4] = [10, 20, 25, 50];
const MEDIUM_PERCENTS: [u32; 9] = [5, 10, 15, 20, 25, 30, 40, 50, 75];

fn percent_value(percent: u32, total: u32) -> f64 {
    (percent * total) as f64 / 100.0
}

/// Step that every total must be a multiple of for `percent`% to be whole.
fn whole_percent_step(percent: u32, round_numbers: bool) -> u32 {
    let step = 100 / gcd(percent, 100);
    if round_numbers {
        step * 5 / gcd(step, 5)
    } else {
        step
    }
}

/// Totals drawn for each tier.
fn total_range(tier: DifficultyTier) -> (u32, u32) {
    match tier {
        DifficultyTier::Easy   => (20, 200),
        DifficultyTier::Medium => (40, 400),
        DifficultyTier::Hard   => (50, 500),
        DifficultyTier::Legend => (100, 2000),
    }
}

pub fn generate_percentage<R: Rng>(rng: &mut R, tier: DifficultyTier) -> Problem {
    let percent = match tier {
        DifficultyTier::Easy   => pick(rng, &EASY_PERCENTS),
        DifficultyTier::Medium => pick(rng, &MEDIUM_PERCENTS),
        DifficultyTier::Hard   => rng.gen_range(5..=95),
        DifficultyTier::Legend => rng.gen_range(1..=99),
    };
    let (lo, hi) = total_range(tier);
    let total = pick_amount(rng, tier, lo, hi);
    percentage_problem(rng, tier, percent, total)
}

/// "`percent`% of `total`" in one of the templates, with the exact answer.
///
/// A total that would give a fractional answer is re-drawn as a multiple of
/// the whole-percent step inside the tier's range, or 100 if none fits.
pub fn percentage_problem<R: Rng>(
    rng: &mut R,
    tier: DifficultyTier,
    percent: u32,
    total: u32,
) -> Problem {
    let mut total = total;
    if (percent * total) % 100 != 0 {
        let (lo, hi) = total_range(tier);
        let step = whole_percent_step(percent, tier.prefers_round_numbers());
        total = match pick_multiple(rng, step, lo, hi) {
            Some(t) => t,
            None => {
                debug!(percent, step, "no whole total in range, using 100");
                100
            }
        };
    }

    let answer = percent_value(percent, total);
    let question = match rng.gen_range(0..3) {
        0 => format!("What is {percent}% of {total}?"),
        1 => format!(
            "A school has {total} students and {percent}% of them walk to school. \
             How many students walk to school?"
        ),
        _ => format!(
            "A tank holds {total} litres of water. If {percent}% of the water is used, \
             how many litres were used?"
        ),
    };
    Problem::new(question, answer)
}

// ---------------------------------------------------------------------------
// Distance / rate / time
// ---------------------------------------------------------------------------

/// Solves for distance exactly; time and speed quotients are rounded to the
/// nearest whole number (at least 1).
pub fn generate_distance<R: Rng>(rng: &mut R, tier: DifficultyTier) -> Problem {
    let (speed_lo, speed_hi, max_hours) = match tier {
        DifficultyTier::Easy   => (20, 60, 4),
        DifficultyTier::Medium => (30, 90, 6),
        DifficultyTier::Hard   => (35, 120, 8),
        DifficultyTier::Legend => (45, 150, 10),
    };
    let speed = pick_amount(rng, tier, speed_lo, speed_hi);
    let hours = rng.gen_range(1..=max_hours);
    let exact = tier.prefers_round_numbers();

    match rng.gen_range(0..3) {
        0 => Problem::new(
            format!(
                "A car travels at {speed} km/h for {hours} hours. \
                 How many kilometres does it cover?"
            ),
            (speed * hours) as f64,
        ),
        1 => {
            let distance = if exact {
                speed * hours
            } else {
                rng.gen_range(speed..=speed * max_hours)
            };
            let time = (distance as f64 / speed as f64).round().max(1.0);
            Problem::new(
                format!(
                    "A train covers {distance} km at {speed} km/h. How many hours does \
                     the trip take, rounded to the nearest hour?"
                ),
                time,
            )
        }
        _ => {
            let distance = if exact {
                speed * hours
            } else {
                rng.gen_range(speed..=speed * max_hours)
            };
            let rate = (distance as f64 / hours as f64).round().max(1.0);
            Problem::new(
                format!(
                    "A cyclist rides {distance} km in {hours} hours. What is the average \
                     speed in km/h, rounded to the nearest whole number?"
                ),
                rate,
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Money / discount
// ---------------------------------------------------------------------------

const EASY_DISCOUNTS: [u32; 4] = [10, 20, 25, 50];
const MEDIUM_DISCOUNTS: [u32; 7] = [10, 15, 20, 25, 30, 40, 50];
const STACKED_DISCOUNTS: [u32; 3] = [10, 20, 25];

fn dollars(value: f64) -> String {
    let s = format_number(value);
    if s.contains('.') && s.split('.').nth(1).map_or(false, |d| d.len() == 1) {
        format!("${s}0")
    } else {
        format!("${s}")
    }
}

/// Sale prices may land on cents; the validity filter regenerates those.
pub fn generate_discount<R: Rng>(rng: &mut R, tier: DifficultyTier) -> Problem {
    let (price, discount) = match tier {
        DifficultyTier::Easy   => (pick_amount(rng, tier, 20, 100), pick(rng, &EASY_DISCOUNTS)),
        DifficultyTier::Medium => (pick_amount(rng, tier, 20, 200), pick(rng, &MEDIUM_DISCOUNTS)),
        DifficultyTier::Hard   => (rng.gen_range(15..=300), rng.gen_range(1..=12) * 5),
        DifficultyTier::Legend => (rng.gen_range(40..=500), rng.gen_range(2..=10) * 5),
    };

    if tier == DifficultyTier::Legend && rng.gen_bool(0.5) {
        let extra = pick(rng, &STACKED_DISCOUNTS);
        let cents = price * (100 - discount) * (100 - extra);
        return Problem::new(
            format!(
                "A bike costs {}. It is marked down {discount}%, and then a coupon takes \
                 another {extra}% off the reduced price. What is the final price in dollars?",
                dollars(price as f64)
            ),
            cents as f64 / 10_000.0,
        );
    }

    let saved = (price * discount) as f64 / 100.0;
    if rng.gen_bool(0.5) {
        Problem::new(
            format!(
                "A jacket costs {}. It is on sale for {discount}% off. \
                 What is the sale price in dollars?",
                dollars(price as f64)
            ),
            price as f64 - saved,
        )
    } else {
        Problem::new(
            format!(
                "Headphones priced at {} are discounted by {discount}%. \
                 How many dollars do you save?",
                dollars(price as f64)
            ),
            saved,
        )
    }
}
