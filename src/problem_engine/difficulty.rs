//! Difficulty Resolver: time budget → tier, level → operator set, and the
//! eligible word-problem families per tier.

use std::time::Duration;

use crate::problem_engine::models::{DifficultyTier, GameMode, Operator, ProblemFamily};

/// Map a time budget (seconds) to a tier.
///
/// `>= 20` Easy, `>= 15` Medium, `>= 12` Hard, anything shorter is Legend.
/// Pure and total; larger budgets never resolve to a harder tier.
pub fn resolve_tier(time_budget: u32) -> DifficultyTier {
    match time_budget {
        20.. => DifficultyTier::Easy,
        15.. => DifficultyTier::Medium,
        12.. => DifficultyTier::Hard,
        _    => DifficultyTier::Legend,
    }
}

/// Arithmetic operators unlocked at `level`. Grows monotonically.
///
/// Levels 1-4 are addition only (3-4 use three operands, see
/// [`addition_operand_count`]); subtraction joins at 5, multiplication at 7,
/// division at 9.
pub fn operators_for_level(level: u32) -> &'static [Operator] {
    match level {
        0..=4 => &[Operator::Add],
        5..=6 => &[Operator::Add, Operator::Sub],
        7..=8 => &[Operator::Add, Operator::Sub, Operator::Mul],
        _     => &[Operator::Add, Operator::Sub, Operator::Mul, Operator::Div],
    }
}

/// Number of addends for an addition problem at `level`.
pub fn addition_operand_count(level: u32) -> usize {
    match level {
        3..=4 => 3,
        _     => 2,
    }
}

/// Word-problem families eligible at `tier`; each tier's list extends the
/// previous one (Easy ⊂ Medium ⊂ Hard ⊂ Legend).
pub fn problem_types_for_difficulty(tier: DifficultyTier) -> Vec<ProblemFamily> {
    let unlocked = match tier {
        DifficultyTier::Easy   => 3,
        DifficultyTier::Medium => 5,
        DifficultyTier::Hard   => 8,
        DifficultyTier::Legend => ProblemFamily::WORD_FAMILIES.len(),
    };
    ProblemFamily::WORD_FAMILIES[..unlocked].to_vec()
}

/// Families the dispatcher may draw from for `mode` at this tier/level.
pub fn eligible_families(mode: GameMode, tier: DifficultyTier, level: u32) -> Vec<ProblemFamily> {
    match mode {
        GameMode::Arithmetic => operators_for_level(level)
            .iter()
            .map(|&op| ProblemFamily::Arithmetic(op))
            .collect(),
        GameMode::WordProblem => problem_types_for_difficulty(tier),
    }
}

/// Per-round countdown. Word problems get twice the budget, at least 15s.
pub fn round_duration(mode: GameMode, time_budget: u32) -> Duration {
    let secs = match mode {
        GameMode::Arithmetic  => time_budget,
        GameMode::WordProblem => time_budget.saturating_mul(2).max(15),
    };
    Duration::from_secs(u64::from(secs))
}
