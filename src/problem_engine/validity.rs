//! Answer Validity Filter and the bounded regeneration loop around it.

use rand::Rng;
use tracing::{debug, warn};

use crate::problem_engine::models::{GameMode, Problem, ProblemFamily};

/// Attempts before a family gives up and the fallback problem is used.
pub const MAX_ATTEMPTS: usize = 50;

/// True iff `answer * 4` is an integer: whole numbers and .25/.5/.75.
pub fn is_conforming(answer: f64) -> bool {
    if !answer.is_finite() {
        return false;
    }
    let quarters = answer * 4.0;
    quarters.fract() == 0.0
}

/// Gate used by generation: conforming and strictly positive.
pub fn is_usable(answer: f64) -> bool {
    is_conforming(answer) && answer > 0.0
}

/// Fixed problem that always passes the filter.
pub fn fallback_problem(mode: GameMode) -> Problem {
    match mode {
        GameMode::Arithmetic => Problem::new("1 + 1", 2.0),
        GameMode::WordProblem => Problem::new(
            "Sam has 2 apples and buys 2 more. How many apples does Sam have now?",
            4.0,
        ),
    }
}

/// Run `generate` until it yields a usable answer, at most [`MAX_ATTEMPTS`]
/// times, then fall back to [`fallback_problem`].
pub fn generate_conforming<R, F>(rng: &mut R, family: ProblemFamily, mut generate: F) -> Problem
where
    R: Rng,
    F: FnMut(&mut R) -> Problem,
{
    for attempt in 1..=MAX_ATTEMPTS {
        let candidate = generate(rng);
        if is_usable(candidate.answer) {
            return candidate;
        }
        debug!(%family, attempt, answer = candidate.answer, "rejected non-conforming answer");
    }
    warn!(%family, attempts = MAX_ATTEMPTS, "no conforming answer, using fallback problem");
    fallback_problem(family.mode())
}
