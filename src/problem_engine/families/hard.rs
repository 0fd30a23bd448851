//! Families unlocked at Hard: ratio/speed, one-variable algebra, geometry.

use rand::Rng;

use crate::problem_engine::{
    helpers::{format_number, pick, pick_amount},
    models::{DifficultyTier, Problem},
};

// ---------------------------------------------------------------------------
// Ratio and proportional speed
// ---------------------------------------------------------------------------

const RATIO_PAIRS: [(&str, &str, &str); 3] = [
    ("cats", "dogs", "animals at the shelter"),
    ("red", "blue", "marbles in the jar"),
    ("boys", "girls", "students in the club"),
];

/// Legend asks about fractional journey times (quarter hours).
const QUARTER_HOURS: [f64; 6] = [0.5, 1.25, 1.5, 2.25, 2.5, 3.75];

pub fn generate_ratio_speed<R: Rng>(rng: &mut R, tier: DifficultyTier) -> Problem {
    let scale = tier.scale();
    if rng.gen_bool(0.5) {
        let a = rng.gen_range(1..=3 + scale * 2);
        let b = rng.gen_range(1..=3 + scale * 2);
        let multiplier = rng.gen_range(2..=5 * scale + 5);
        let total = (a + b) * multiplier;
        let (first, second, things) = pick(rng, &RATIO_PAIRS);
        let (asked, answer) = if rng.gen_bool(0.5) {
            (first, a * multiplier)
        } else {
            (second, b * multiplier)
        };
        return Problem::new(
            format!(
                "The ratio of {first} to {second} is {a}:{b}. There are {total} {things} \
                 in total. How many are {asked}?"
            ),
            answer as f64,
        );
    }

    let speed = pick_amount(rng, tier, 20, 20 * scale + 40);
    let hours = rng.gen_range(2..=5);
    let distance = speed * hours;
    let later = if tier == DifficultyTier::Legend {
        pick(rng, &QUARTER_HOURS)
    } else {
        rng.gen_range(1..=8) as f64
    };
    Problem::new(
        format!(
            "A delivery van drives {distance} km in {hours} hours. At the same speed, \
             how many kilometres does it drive in {} hours?",
            format_number(later)
        ),
        speed as f64 * later,
    )
}

// ---------------------------------------------------------------------------
// Algebra
// ---------------------------------------------------------------------------

/// Linear equation with a whole, positive solution.
pub fn generate_algebra<R: Rng>(rng: &mut R, tier: DifficultyTier) -> Problem {
    let x = rng.gen_range(2..=10 * tier.scale() + 10);
    match tier {
        DifficultyTier::Easy | DifficultyTier::Medium => {
            let a = rng.gen_range(1..=20 * tier.scale());
            Problem::new(format!("Solve for x: x + {a} = {}", x + a), x as f64)
        }
        DifficultyTier::Hard => {
            let a = rng.gen_range(2..=9);
            let b = rng.gen_range(1..=50);
            let c = a * x + b;
            if rng.gen_bool(0.5) {
                Problem::new(format!("Solve for x: {a}x + {b} = {c}"), x as f64)
            } else {
                Problem::new(
                    format!(
                        "I think of a number, multiply it by {a} and add {b}. \
                         The result is {c}. What is my number?"
                    ),
                    x as f64,
                )
            }
        }
        DifficultyTier::Legend => {
            let a: u32 = rng.gen_range(3..=12);
            if rng.gen_bool(0.5) {
                let b = rng.gen_range(1..=30);
                Problem::new(format!("Solve for x: {a}(x + {b}) = {}", a * (x + b)), x as f64)
            } else {
                // Keep the right-hand side positive.
                let b = rng.gen_range(1..=(a * x - 1).min(30));
                Problem::new(format!("Solve for x: {a}x - {b} = {}", a * x - b), x as f64)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Shape {
    RectangleArea,
    RectanglePerimeter,
    SquareArea,
    TriangleArea,
    TrapezoidArea,
    MissingSide,
}

fn shapes_for(tier: DifficultyTier) -> &'static [Shape] {
    match tier {
        DifficultyTier::Easy | DifficultyTier::Medium => {
            &[Shape::RectangleArea, Shape::RectanglePerimeter, Shape::SquareArea]
        }
        DifficultyTier::Hard => &[
            Shape::RectangleArea,
            Shape::RectanglePerimeter,
            Shape::SquareArea,
            Shape::TriangleArea,
        ],
        DifficultyTier::Legend => &[
            Shape::RectanglePerimeter,
            Shape::TriangleArea,
            Shape::TrapezoidArea,
            Shape::MissingSide,
        ],
    }
}

/// Triangle and trapezoid areas may end in .5, which the filter accepts.
pub fn generate_geometry<R: Rng>(rng: &mut R, tier: DifficultyTier) -> Problem {
    let (lo, hi) = match tier {
        DifficultyTier::Easy   => (2, 12),
        DifficultyTier::Medium => (3, 20),
        DifficultyTier::Hard   => (4, 30),
        DifficultyTier::Legend => (5, 50),
    };
    let w = rng.gen_range(lo..=hi);
    let h = rng.gen_range(lo..=hi);

    match pick(rng, shapes_for(tier)) {
        Shape::RectangleArea => Problem::new(
            format!("A garden is {w} m long and {h} m wide. What is its area in square metres?"),
            (w * h) as f64,
        ),
        Shape::RectanglePerimeter => Problem::new(
            format!(
                "A fence goes around a field {w} m long and {h} m wide. \
                 How many metres of fence are needed?"
            ),
            (2 * (w + h)) as f64,
        ),
        Shape::SquareArea => Problem::new(
            format!("A square tile has sides of {w} cm. What is its area in square centimetres?"),
            (w * w) as f64,
        ),
        Shape::TriangleArea => Problem::new(
            format!("A triangle has a base of {w} cm and a height of {h} cm. What is its area?"),
            (w * h) as f64 / 2.0,
        ),
        Shape::TrapezoidArea => {
            let top = rng.gen_range(lo..=hi);
            Problem::new(
                format!(
                    "A trapezoid has parallel sides of {w} cm and {top} cm and a height of \
                     {h} cm. What is its area?"
                ),
                ((w + top) * h) as f64 / 2.0,
            )
        }
        Shape::MissingSide => Problem::new(
            format!(
                "A rectangle has an area of {} square metres and a width of {w} m. \
                 How long is it?",
                w * h
            ),
            h as f64,
        ),
    }
}
