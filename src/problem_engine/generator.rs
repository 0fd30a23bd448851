use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use tracing::warn;

use crate::problem_engine::{
    difficulty::eligible_families,
    distractors::make_options,
    families,
    helpers::pick,
    models::{
        DifficultyTier, FamilySelector, GameMode, GeneratedProblem, Operator, ProblemFamily,
        ProblemRequest,
    },
    validity::{fallback_problem, generate_conforming},
};

/// Generate a unique problem ID from family + rng.
fn make_problem_id(family: ProblemFamily, rng: &mut impl RngCore) -> String {
    let prefix = match family {
        ProblemFamily::Arithmetic(Operator::Add) => "AD",
        ProblemFamily::Arithmetic(Operator::Sub) => "SU",
        ProblemFamily::Arithmetic(Operator::Mul) => "MU",
        ProblemFamily::Arithmetic(Operator::Div) => "DI",
        ProblemFamily::Percentage                => "PC",
        ProblemFamily::Distance                  => "DR",
        ProblemFamily::Discount                  => "DC",
        ProblemFamily::Fraction                  => "FR",
        ProblemFamily::Average                   => "AV",
        ProblemFamily::RatioSpeed                => "RS",
        ProblemFamily::Algebra                   => "AL",
        ProblemFamily::Geometry                  => "GE",
        ProblemFamily::Probability               => "PR",
        ProblemFamily::Sequence                  => "SQ",
    };
    format!("{}-{:08X}", prefix, rng.next_u32())
}

/// Pick a family uniformly from those eligible for `mode` at this tier/level.
pub fn choose_family<R: Rng>(
    rng: &mut R,
    mode: GameMode,
    tier: DifficultyTier,
    level: u32,
) -> ProblemFamily {
    let eligible = eligible_families(mode, tier, level);
    pick(rng, &eligible)
}

/// One round's worth of output for an explicit family: a conforming problem
/// and its shuffled option set.
pub fn next_problem<R: Rng>(
    rng: &mut R,
    family: ProblemFamily,
    tier: DifficultyTier,
    level: u32,
) -> GeneratedProblem {
    let problem_id = make_problem_id(family, rng);
    let problem = generate_conforming(rng, family, |rng| {
        families::generate_raw(rng, family, tier, level)
    });
    let options = make_options(rng, problem.answer);
    GeneratedProblem { problem_id, family, tier, problem, options }
}

/// Core dispatch: resolves the selector, then generates.
pub fn generate_problem(request: ProblemRequest) -> GeneratedProblem {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };

    let family = match request.selector {
        FamilySelector::Family(family) => family,
        FamilySelector::Mode(mode) => choose_family(&mut rng, mode, request.tier, request.level),
    };
    next_problem(&mut rng, family, request.tier, request.level)
}

/// String-keyed entry point. Unknown keys get the fallback problem for `mode`
/// instead of an error, so a bad key never ends a round.
pub fn generate_by_key<R: Rng>(
    rng: &mut R,
    key: &str,
    mode: GameMode,
    tier: DifficultyTier,
    level: u32,
) -> GeneratedProblem {
    match key.parse::<ProblemFamily>() {
        Ok(family) => next_problem(rng, family, tier, level),
        Err(err) => {
            warn!(%err, "falling back to the default problem");
            let family = match mode {
                GameMode::Arithmetic  => ProblemFamily::Arithmetic(Operator::Add),
                GameMode::WordProblem => ProblemFamily::Percentage,
            };
            let problem = fallback_problem(mode);
            let options = make_options(rng, problem.answer);
            GeneratedProblem {
                problem_id: make_problem_id(family, rng),
                family,
                tier,
                problem,
                options,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_selector_respects_eligibility() {
        for seed in 0..200 {
            let g = generate_problem(
                ProblemRequest::new(GameMode::WordProblem).tier(DifficultyTier::Easy).seed(seed),
            );
            assert!(
                matches!(
                    g.family,
                    ProblemFamily::Percentage | ProblemFamily::Distance | ProblemFamily::Discount
                ),
                "{:?} is not an Easy family",
                g.family
            );
        }
    }

    #[test]
    fn level_one_arithmetic_is_addition_only() {
        for seed in 0..100 {
            let g = generate_problem(ProblemRequest::new(GameMode::Arithmetic).seed(seed));
            assert_eq!(g.family, ProblemFamily::Arithmetic(Operator::Add));
            assert!(g.problem_id.starts_with("AD-"));
        }
    }

    #[test]
    fn unknown_key_uses_fallback() {
        let mut rng = StdRng::seed_from_u64(4);
        let g = generate_by_key(&mut rng, "calculus", GameMode::Arithmetic, DifficultyTier::Hard, 3);
        assert_eq!(g.problem, fallback_problem(GameMode::Arithmetic));
        assert!(g.options.contains(2.0));
    }

    #[test]
    fn known_key_dispatches() {
        let mut rng = StdRng::seed_from_u64(4);
        let g = generate_by_key(&mut rng, "geometry", GameMode::WordProblem, DifficultyTier::Hard, 1);
        assert_eq!(g.family, ProblemFamily::Geometry);
        assert!(g.problem_id.starts_with("GE-"));
    }
}
