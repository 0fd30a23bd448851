//! Distractor Generator: three plausible wrong answers plus a uniform shuffle.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::problem_engine::models::OptionSet;

/// Candidate draws before switching to the deterministic fill.
const MAX_DRAWS: usize = 500;

const QUARTER_OFFSETS: [f64; 3] = [0.25, 0.5, 0.75];

/// Build the four-option set for `correct`.
///
/// Every option is positive, all four are distinct, `correct` appears once,
/// and its slot is uniformly random.
pub fn make_options<R: Rng>(rng: &mut R, correct: f64) -> OptionSet {
    let mut options = Vec::with_capacity(4);
    options.push(correct);

    let fractional = correct.fract() != 0.0;
    let mut draws = 0;
    while options.len() < 4 && draws < MAX_DRAWS {
        draws += 1;
        let candidate = if fractional {
            fractional_candidate(rng, correct)
        } else {
            whole_candidate(rng, correct)
        };
        if candidate > 0.0 && !options.contains(&candidate) {
            options.push(candidate);
        }
    }

    // Tiny answers can exhaust the candidate space; pad upwards.
    let mut step = 1.0;
    while options.len() < 4 {
        let candidate = correct + step;
        if !options.contains(&candidate) {
            options.push(candidate);
        }
        step += 1.0;
    }

    options.shuffle(rng);
    OptionSet::new([options[0], options[1], options[2], options[3]])
}

/// Whole answers: `correct ± [1, range]` with `range = max(3, ⌊0.3·correct⌋)`.
fn whole_candidate<R: Rng>(rng: &mut R, correct: f64) -> f64 {
    let range = ((correct * 0.3).floor() as i64).max(3);
    let delta = rng.gen_range(1..=range) as f64;
    if rng.gen_bool(0.5) {
        correct + delta
    } else {
        correct - delta
    }
}

/// Quarter answers: swap the fractional part, or shift the integer part by
/// one and take any quarter offset.
fn fractional_candidate<R: Rng>(rng: &mut R, correct: f64) -> f64 {
    let whole = correct.trunc();
    let frac = correct - whole;
    if rng.gen_bool(0.5) {
        let others: Vec<f64> = QUARTER_OFFSETS.iter().copied().filter(|&o| o != frac).collect();
        whole + others[rng.gen_range(0..others.len())]
    } else {
        let shift = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        whole + shift + QUARTER_OFFSETS[rng.gen_range(0..QUARTER_OFFSETS.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_valid(set: &OptionSet, correct: f64) {
        let values = set.values();
        assert_eq!(values.iter().filter(|&&v| v == correct).count(), 1, "{values:?}");
        assert!(values.iter().all(|&v| v > 0.0), "{values:?}");
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert_ne!(values[i], values[j], "{values:?}");
            }
        }
    }

    #[test]
    fn whole_answers_get_nearby_whole_distractors() {
        let mut rng = StdRng::seed_from_u64(11);
        for correct in [1.0, 2.0, 5.0, 17.0, 60.0, 450.0] {
            for _ in 0..50 {
                let set = make_options(&mut rng, correct);
                assert_valid(&set, correct);
                let range = ((correct * 0.3).floor()).max(3.0);
                for v in set.iter() {
                    assert_eq!(v.fract(), 0.0);
                    assert!((v - correct).abs() <= range.max(3.0), "{v} too far from {correct}");
                }
            }
        }
    }

    #[test]
    fn quarter_answers_get_quarter_distractors() {
        let mut rng = StdRng::seed_from_u64(12);
        for correct in [0.25, 0.5, 3.75, 18.5, 99.25] {
            for _ in 0..50 {
                let set = make_options(&mut rng, correct);
                assert_valid(&set, correct);
                for v in set.iter() {
                    assert_eq!((v * 4.0).fract(), 0.0);
                    assert_ne!(v.fract(), 0.0, "{v} should keep a quarter part");
                    assert!((v.trunc() - correct.trunc()).abs() <= 1.0);
                }
            }
        }
    }

    #[test]
    fn answer_of_one_still_gets_three_distractors() {
        let mut rng = StdRng::seed_from_u64(13);
        let set = make_options(&mut rng, 1.0);
        assert_valid(&set, 1.0);
        let mut sorted = set.values().to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(sorted, vec![1.0, 2.0, 3.0, 4.0]);
    }
}
