//! Crate-wide tests for `math_drill_gen`.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! # Coverage
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Validity | 10,000 arithmetic answers per tier are quarter multiples; word answers too |
//! | Option sets | Four distinct positive values, answer present exactly once, every family and tier |
//! | Fairness | Correct slot is uniform across 4,000 draws (chi-square, 3 dof) |
//! | Difficulty | `resolve_tier` monotonic and idempotent; family lists nest across tiers |
//! | Scenarios | Easy level-1 addition; 25% of 240 at Hard without regeneration; three strikes end a session |
//! | Determinism | Same seed gives identical problem, options and id |
//! | Structural | Id prefixes, string keys, fallback for unknown keys |

use rand::{rngs::StdRng, SeedableRng};

use crate::problem_engine::{
    difficulty::eligible_families,
    families::easy::percentage_problem,
    validity::{generate_conforming, is_usable},
    choose_family, generate_by_key, generate_problem, is_conforming, next_problem,
    problem_types_for_difficulty, resolve_tier, DifficultyTier, GameMode, GeneratedProblem,
    Operator, ProblemFamily, ProblemRequest,
};
use crate::session::{GamePhase, Session};
use crate::store::{identity::StaticIdentity, memory::MemoryStore, record_session, ScoreStore};
use crate::{GameConfig, Identity};

// ── helpers ──────────────────────────────────────────────────────────────────

const OPERATORS: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

/// Every family, arithmetic first.
fn all_families() -> Vec<ProblemFamily> {
    OPERATORS
        .iter()
        .map(|&op| ProblemFamily::Arithmetic(op))
        .chain(ProblemFamily::WORD_FAMILIES)
        .collect()
}

fn gen(family: ProblemFamily, tier: DifficultyTier, level: u32, seed: u64) -> GeneratedProblem {
    generate_problem(ProblemRequest::new(family).tier(tier).level(level).seed(seed))
}

fn assert_valid_options(g: &GeneratedProblem) {
    let values = g.options.values();
    let answer = g.problem.answer;
    assert!(
        values.iter().all(|&v| v > 0.0 && is_conforming(v)),
        "{}: non-positive or non-quarter option in {values:?}",
        g.problem_id
    );
    for i in 0..4 {
        for j in (i + 1)..4 {
            assert_ne!(values[i], values[j], "{}: duplicate option in {values:?}", g.problem_id);
        }
    }
    let hits = values.iter().filter(|&&v| v == answer).count();
    assert_eq!(hits, 1, "{}: answer {answer} not present exactly once in {values:?}", g.problem_id);
}

// ── validity ─────────────────────────────────────────────────────────────────

#[test]
fn ten_thousand_arithmetic_answers_conform_on_every_tier() {
    for tier in DifficultyTier::ALL {
        let mut rng = StdRng::seed_from_u64(tier.time_budget() as u64);
        for i in 0..10_000u32 {
            let level = 1 + i % 12;
            let family = choose_family(&mut rng, GameMode::Arithmetic, tier, level);
            let g = next_problem(&mut rng, family, tier, level);
            assert!(
                (g.problem.answer * 4.0).fract() == 0.0,
                "{tier}: {} = {} is not a quarter multiple",
                g.problem.question,
                g.problem.answer
            );
            assert!(g.problem.answer > 0.0);
        }
    }
}

#[test]
fn word_answers_conform_on_every_tier() {
    for tier in DifficultyTier::ALL {
        for family in problem_types_for_difficulty(tier) {
            for seed in 0..300 {
                let g = gen(family, tier, 1, seed);
                assert!(is_usable(g.problem.answer), "{family} at {tier}: {}", g.problem.answer);
                assert!(!g.problem.question.is_empty());
            }
        }
    }
}

// ── option sets ──────────────────────────────────────────────────────────────

#[test]
fn option_sets_are_valid_for_every_family_and_tier() {
    for family in all_families() {
        for tier in DifficultyTier::ALL {
            for seed in 0..100 {
                assert_valid_options(&gen(family, tier, 1 + (seed % 10) as u32, seed));
            }
        }
    }
}

#[test]
fn correct_slot_is_uniform() {
    const SAMPLES: usize = 4000;
    // chi-square, 3 degrees of freedom, p = 0.001
    const CRITICAL: f64 = 16.27;

    let mut counts = [0usize; 4];
    for seed in 0..SAMPLES as u64 {
        let g = generate_problem(
            ProblemRequest::new(GameMode::WordProblem).tier(DifficultyTier::Legend).seed(seed),
        );
        let slot = g.options.position_of(g.problem.answer).unwrap();
        counts[slot] += 1;
    }

    let expected = SAMPLES as f64 / 4.0;
    let chi2: f64 = counts
        .iter()
        .map(|&c| (c as f64 - expected).powi(2) / expected)
        .sum();
    assert!(chi2 < CRITICAL, "slot counts {counts:?} give chi-square {chi2:.2}");
}

// ── difficulty ───────────────────────────────────────────────────────────────

#[test]
fn resolve_tier_is_monotonic_and_idempotent() {
    let mut previous = resolve_tier(0);
    for budget in 0..=120 {
        let tier = resolve_tier(budget);
        assert_eq!(tier, resolve_tier(budget));
        // Easy < Medium < Hard < Legend, so longer budgets may only get easier.
        assert!(tier <= previous, "budget {budget} resolved to harder {tier} after {previous}");
        previous = tier;
    }
}

#[test]
fn family_lists_nest_across_tiers() {
    for pair in DifficultyTier::ALL.windows(2) {
        let easier = problem_types_for_difficulty(pair[0]);
        let harder = problem_types_for_difficulty(pair[1]);
        assert!(harder.len() > easier.len(), "{} does not grow past {}", pair[1], pair[0]);
        assert!(easier.iter().all(|f| harder.contains(f)));
    }
    assert_eq!(problem_types_for_difficulty(DifficultyTier::Legend).len(), 10);
}

// ── scenarios ────────────────────────────────────────────────────────────────

#[test]
fn easy_level_one_is_two_operand_addition() {
    assert_eq!(
        eligible_families(GameMode::Arithmetic, resolve_tier(20), 1),
        vec![ProblemFamily::Arithmetic(Operator::Add)]
    );

    for seed in 0..500 {
        let g = generate_problem(
            ProblemRequest::new(GameMode::Arithmetic).tier(resolve_tier(20)).level(1).seed(seed),
        );
        assert_eq!(g.family, ProblemFamily::Arithmetic(Operator::Add));
        let operands: Vec<u32> = g
            .problem
            .question
            .split(" + ")
            .map(|s| s.trim().parse().unwrap())
            .collect();
        assert_eq!(operands.len(), 2);
        assert!(operands.iter().all(|v| (1..=25).contains(v)), "{operands:?}");
        assert_eq!(g.problem.answer, operands.iter().sum::<u32>() as f64);
        assert_eq!(g.problem.answer.fract(), 0.0);
        assert!(g.options.iter().all(|v| v.fract() == 0.0));
        assert_valid_options(&g);
    }
}

#[test]
fn hard_percentage_of_240_passes_the_filter_first_time() {
    let mut rng = StdRng::seed_from_u64(240);
    let mut attempts = 0;
    let problem = generate_conforming(&mut rng, ProblemFamily::Percentage, |rng| {
        attempts += 1;
        percentage_problem(rng, DifficultyTier::Hard, 25, 240)
    });
    assert_eq!(attempts, 1);
    assert_eq!(problem.answer, 60.0);
    assert!(problem.question.contains("25%") && problem.question.contains("240"));
}

#[test]
fn session_ends_after_three_strikes_and_saves_once() {
    let store = MemoryStore::new();
    let player = StaticIdentity::signed_in(Identity::new("p1", "Player One"));
    let mut session = Session::new(GameConfig::new(GameMode::WordProblem, 15).seed(11));

    let mut saved = 0;
    let mut misses = 0u32;
    while session.phase() == GamePhase::Playing {
        let round = session.start_round().unwrap();
        let report = if round.id % 3 == 0 {
            misses += 1;
            session.time_out(round.id).unwrap()
        } else {
            session.submit_answer(round.id, round.answer(), 2).unwrap()
        };
        if let Some(summary) = report.summary {
            assert_eq!(summary.total_questions, summary.correct_answers + misses);
            record_session(&player, &store, &summary).unwrap();
            saved += 1;
        }
    }

    assert_eq!(misses, 3);
    assert_eq!(saved, 1);
    let board = store.leaderboard(50).unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].best_score, session.state().score);
}

// ── determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_seed_produces_identical_problem() {
    for family in all_families() {
        for tier in DifficultyTier::ALL {
            let a = gen(family, tier, 6, 12345);
            let b = gen(family, tier, 6, 12345);
            assert_eq!(a.problem_id, b.problem_id, "id mismatch for {family}");
            assert_eq!(a.problem,    b.problem,    "problem mismatch for {family}");
            assert_eq!(a.options,    b.options,    "options mismatch for {family}");
        }
    }
}

#[test]
fn different_seeds_vary() {
    let questions: std::collections::HashSet<String> = (0..20)
        .map(|seed| gen(ProblemFamily::Percentage, DifficultyTier::Hard, 1, seed).problem.question)
        .collect();
    assert!(questions.len() > 1);
}

#[test]
fn entropy_smoke_test() {
    let g = generate_problem(ProblemRequest::new(GameMode::WordProblem).tier(DifficultyTier::Legend));
    assert_valid_options(&g);
}

// ── structural ───────────────────────────────────────────────────────────────

#[test]
fn problem_ids_carry_family_prefix() {
    let expected = [
        (ProblemFamily::Arithmetic(Operator::Add), "AD-"),
        (ProblemFamily::Arithmetic(Operator::Sub), "SU-"),
        (ProblemFamily::Arithmetic(Operator::Mul), "MU-"),
        (ProblemFamily::Arithmetic(Operator::Div), "DI-"),
        (ProblemFamily::Percentage,                "PC-"),
        (ProblemFamily::Distance,                  "DR-"),
        (ProblemFamily::Discount,                  "DC-"),
        (ProblemFamily::Fraction,                  "FR-"),
        (ProblemFamily::Average,                   "AV-"),
        (ProblemFamily::RatioSpeed,                "RS-"),
        (ProblemFamily::Algebra,                   "AL-"),
        (ProblemFamily::Geometry,                  "GE-"),
        (ProblemFamily::Probability,               "PR-"),
        (ProblemFamily::Sequence,                  "SQ-"),
    ];
    for (family, prefix) in expected {
        let id = gen(family, DifficultyTier::Medium, 3, 1).problem_id;
        assert!(id.starts_with(prefix), "{family}: {id}");
        assert_eq!(id.len(), prefix.len() + 8);
    }
}

#[test]
fn family_keys_round_trip() {
    for family in all_families() {
        assert_eq!(family.key().parse::<ProblemFamily>().unwrap(), family);
    }
}

#[test]
fn unknown_key_falls_back_instead_of_failing() {
    let mut rng = StdRng::seed_from_u64(3);
    let g = generate_by_key(&mut rng, "trigonometry", GameMode::Arithmetic, DifficultyTier::Easy, 1);
    assert_eq!(g.problem.answer, 2.0);
    assert_valid_options(&g);

    let g = generate_by_key(&mut rng, "geometry", GameMode::WordProblem, DifficultyTier::Hard, 1);
    assert_eq!(g.family, ProblemFamily::Geometry);
}
