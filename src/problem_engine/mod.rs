//! Core problem engine: tier resolution, family generators, the validity
//! filter and distractor generation.
//!
//! ## Module overview
//!
//! | Module        | Purpose |
//! |---------------|---------|
//! | `models`      | Shared types: modes, tiers, families, problems, option sets |
//! | `difficulty`  | Time budget → tier, level → operators, eligible families per tier |
//! | `validity`    | Quarter-multiple answer filter and bounded regeneration |
//! | `distractors` | Three plausible wrong answers plus a uniform shuffle |
//! | `helpers`     | Operand pickers and text formatting shared by families |
//! | `generator`   | Entry point `generate_problem()`, dispatches to families |
//! | `families`    | Family generators grouped by the tier that unlocks them |

pub mod difficulty;
pub mod distractors;
pub mod families;
pub mod generator;
pub mod helpers;
pub mod models;
pub mod validity;

pub use difficulty::{
    eligible_families, operators_for_level, problem_types_for_difficulty, resolve_tier,
    round_duration,
};
pub use distractors::make_options;
pub use generator::{choose_family, generate_by_key, generate_problem, next_problem};
pub use models::{
    DifficultyTier, FamilySelector, GameMode, GeneratedProblem, Operator, OptionSet, Problem,
    ProblemFamily, ProblemRequest,
};
pub use validity::{fallback_problem, is_conforming};
