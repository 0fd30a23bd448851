use rand::Rng;

use crate::problem_engine::{
    difficulty::addition_operand_count,
    models::{DifficultyTier, Operator, Problem},
};

/// Upper bound for addends: `20 + 5·level`, multiplied by the tier scale.
fn addend_max(tier: DifficultyTier, level: u32) -> u32 {
    (20 + level * 5) * tier.scale()
}

fn factor_max(tier: DifficultyTier, level: u32) -> u32 {
    6 + level / 2 + (tier.scale() - 1) * 3
}

pub fn generate<R: Rng>(rng: &mut R, op: Operator, tier: DifficultyTier, level: u32) -> Problem {
    let level = level.max(1);
    match op {
        Operator::Add => {
            let max = addend_max(tier, level);
            let operands: Vec<u32> = (0..addition_operand_count(level))
                .map(|_| rng.gen_range(1..=max))
                .collect();
            let answer: u32 = operands.iter().sum();
            let question = operands
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" + ");
            Problem::new(question, answer as f64)
        }
        Operator::Sub => {
            let top = 14 + (30 + level * 5) * tier.scale();
            let a = rng.gen_range(15..=top);
            let b = rng.gen_range(1..a);
            Problem::new(format!("{a} - {b}"), (a - b) as f64)
        }
        Operator::Mul => {
            let max = factor_max(tier, level);
            let a = rng.gen_range(1..=max);
            let b = rng.gen_range(1..=max);
            Problem::new(format!("{a} × {b}"), (a * b) as f64)
        }
        Operator::Div => {
            let quotient = rng.gen_range(1..=(8 + level + (tier.scale() - 1) * 4));
            let divisor = rng.gen_range(1..=(6 + level / 2 + (tier.scale() - 1) * 2));
            let dividend = quotient * divisor;
            Problem::new(format!("{dividend} ÷ {divisor}"), quotient as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn operands(question: &str, symbol: &str) -> Vec<u32> {
        question.split(symbol).map(|s| s.trim().parse().unwrap()).collect()
    }

    #[test]
    fn easy_level_one_addition_uses_two_operands_up_to_25() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let p = generate(&mut rng, Operator::Add, DifficultyTier::Easy, 1);
            let ops = operands(&p.question, "+");
            assert_eq!(ops.len(), 2);
            assert!(ops.iter().all(|v| (1..=25).contains(v)), "{}", p.question);
            assert_eq!(p.answer, ops.iter().sum::<u32>() as f64);
        }
    }

    #[test]
    fn level_three_addition_has_three_operands() {
        let mut rng = StdRng::seed_from_u64(6);
        let p = generate(&mut rng, Operator::Add, DifficultyTier::Medium, 3);
        assert_eq!(operands(&p.question, "+").len(), 3);
    }

    #[test]
    fn subtraction_never_goes_below_one() {
        let mut rng = StdRng::seed_from_u64(7);
        for tier in DifficultyTier::ALL {
            for _ in 0..300 {
                let p = generate(&mut rng, Operator::Sub, tier, 6);
                let ops = operands(&p.question, "-");
                assert_eq!(p.answer, (ops[0] - ops[1]) as f64);
                assert!(p.answer >= 1.0);
            }
        }
    }

    #[test]
    fn division_is_exact() {
        let mut rng = StdRng::seed_from_u64(8);
        for tier in DifficultyTier::ALL {
            for _ in 0..300 {
                let p = generate(&mut rng, Operator::Div, tier, 10);
                let ops = operands(&p.question, "÷");
                assert_eq!(ops[0] % ops[1], 0);
                assert_eq!(p.answer, (ops[0] / ops[1]) as f64);
            }
        }
    }

    #[test]
    fn harder_tiers_allow_larger_products() {
        assert!(factor_max(DifficultyTier::Legend, 9) > factor_max(DifficultyTier::Easy, 9));
        assert!(addend_max(DifficultyTier::Hard, 2) > addend_max(DifficultyTier::Medium, 2));
    }
}
