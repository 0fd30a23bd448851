//! Shared operand pickers and text helpers used by every family generator.
//!
//! Family modules focus on the arithmetic of their templates; picking
//! tier-scaled numbers, snapping totals onto whole-number steps and joining
//! number lists live here.

use rand::Rng;

use crate::problem_engine::models::DifficultyTier;

/// Uniform integer in `lo..=hi`; at Easy/Medium the value is a multiple of 5.
///
/// `lo` and `hi` are widened to the nearest multiples of 5 inside the range
/// when round numbers are preferred. Ranges without a multiple of 5 fall back
/// to a plain draw.
pub fn pick_amount<R: Rng>(rng: &mut R, tier: DifficultyTier, lo: u32, hi: u32) -> u32 {
    if tier.prefers_round_numbers() {
        pick_multiple(rng, 5, lo, hi).unwrap_or_else(|| rng.gen_range(lo..=hi))
    } else {
        rng.gen_range(lo..=hi)
    }
}

/// Uniform multiple of `step` in `lo..=hi`, or `None` if there is none.
pub fn pick_multiple<R: Rng>(rng: &mut R, step: u32, lo: u32, hi: u32) -> Option<u32> {
    if step == 0 {
        return None;
    }
    let first = (lo + step - 1) / step;
    let last = hi / step;
    if first > last {
        return None;
    }
    Some(rng.gen_range(first..=last) * step)
}

/// Pick one element of a non-empty constant table.
pub fn pick<R: Rng, T: Copy>(rng: &mut R, choices: &[T]) -> T {
    choices[rng.gen_range(0..choices.len())]
}

pub fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Format a value that is a multiple of 0.25 without trailing zeros.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let s = format!("{:.2}", value);
        s.trim_end_matches('0').to_string()
    }
}

/// "3, 7, 11 and 15"
pub fn join_numbers(values: &[u32]) -> String {
    match values {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let head = init.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ");
            format!("{head} and {last}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn round_amounts_at_easy_and_medium() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let v = pick_amount(&mut rng, DifficultyTier::Easy, 12, 98);
            assert_eq!(v % 5, 0);
            assert!((15..=95).contains(&v));
        }
    }

    #[test]
    fn multiples_respect_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(pick_multiple(&mut rng, 7, 8, 13), None);
        for _ in 0..100 {
            let v = pick_multiple(&mut rng, 6, 10, 50).unwrap();
            assert_eq!(v % 6, 0);
            assert!((12..=48).contains(&v));
        }
    }

    #[test]
    fn numbers_are_formatted_compactly() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(8.75), "8.75");
        assert_eq!(format_number(0.25), "0.25");
    }

    #[test]
    fn number_lists_read_naturally() {
        assert_eq!(join_numbers(&[4]), "4");
        assert_eq!(join_numbers(&[1, 2]), "1 and 2");
        assert_eq!(join_numbers(&[3, 7, 11, 15]), "3, 7, 11 and 15");
    }

    #[test]
    fn gcd_basics() {
        assert_eq!(gcd(25, 100), 25);
        assert_eq!(gcd(35, 100), 5);
        assert_eq!(gcd(7, 100), 1);
    }
}
