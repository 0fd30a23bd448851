//! # math_drill_gen
//!
//! A deterministic generator for timed arithmetic and word-problem quizzes,
//! plus the session driver and score store that sit around it.
//!
//! Every generated problem comes with exactly four distinct, positive
//! options whose answer is a multiple of 0.25, and the correct option lands
//! in each position equally often.
//!
//! ## How it works
//!
//! 1. The time budget picks a [`DifficultyTier`] ([`resolve_tier`]); shorter
//!    budgets are harder.
//! 2. A family is drawn from those eligible for the mode: arithmetic
//!    operators unlock with player level, word-problem families with tier.
//! 3. The family generator builds a question and exact answer. Answers that
//!    are not quarter multiples are regenerated a bounded number of times
//!    before a fixed fallback problem is used.
//! 4. Three distractors are drawn near the answer and the four options are
//!    shuffled.
//!
//! ## Key features
//!
//! - **Deterministic**: `rng_seed: Some(u64)` reproduces the same problem,
//!   options and id.
//! - **Two modes**: [`GameMode::Arithmetic`] and [`GameMode::WordProblem`]
//!   (ten families from percentages up to number sequences).
//! - **Sessions**: [`Session`] tracks score, combo, level and strikes, and
//!   emits one [`SessionSummary`] when the third strike lands.
//! - **Leaderboard**: [`ScoreStore`] implementations keep per-player profiles
//!   ranked by best score.
//!
//! ## Quick start
//!
//! ```rust
//! use math_drill_gen::{
//!     generate_problem, DifficultyTier, GameMode, Operator, ProblemFamily, ProblemRequest,
//! };
//!
//! // Any family eligible for the mode, Easy tier, level 1, fresh entropy:
//! let g = generate_problem(ProblemRequest::new(GameMode::WordProblem));
//! println!("Q: {}", g.problem.question);
//!
//! // One specific family, fully reproducible:
//! let g = generate_problem(
//!     ProblemRequest::new(ProblemFamily::Arithmetic(Operator::Mul))
//!         .tier(DifficultyTier::Hard)
//!         .level(9)
//!         .seed(42),
//! );
//! assert!(g.options.contains(g.problem.answer));
//! for value in g.options.iter() {
//!     let mark = if value == g.problem.answer { "+" } else { " " };
//!     println!("[{mark}] {value}");
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod problem_engine;
pub mod session;
pub mod store;

pub use config::{AppConfig, GameConfig};
pub use error::{ConfigError, QuizError, StoreError};
pub use problem_engine::{
    generate_by_key, generate_problem, resolve_tier, round_duration, DifficultyTier,
    FamilySelector, GameMode, GeneratedProblem, Operator, OptionSet, Problem, ProblemFamily,
    ProblemRequest,
};
pub use session::{Countdown, GamePhase, Round, RoundOutcome, RoundReport, Session, SessionState};
pub use store::{
    identity::{Identity, IdentityProvider, StaticIdentity},
    json_file::JsonFileStore,
    memory::MemoryStore,
    models::{ProfileSummary, SessionSummary, UserProfile},
    record_session, ScoreStore,
};

#[cfg(test)]
mod tests;
