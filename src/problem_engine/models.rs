use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

// ---------------------------------------------------------------------------
// Game mode / difficulty
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[serde(rename = "arithmetic")]
    Arithmetic,
    #[serde(rename = "wordProblem")]
    WordProblem,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Arithmetic  => write!(f, "arithmetic"),
            GameMode::WordProblem => write!(f, "wordProblem"),
        }
    }
}

impl FromStr for GameMode {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "arithmetic" | "math"                         => Ok(GameMode::Arithmetic),
            "wordProblem" | "word" | "word-problem"       => Ok(GameMode::WordProblem),
            other => Err(QuizError::UnknownMode(other.to_string())),
        }
    }
}

/// Ordered by increasing challenge: `Easy < Medium < Hard < Legend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
    Legend,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 4] = [
        DifficultyTier::Easy,
        DifficultyTier::Medium,
        DifficultyTier::Hard,
        DifficultyTier::Legend,
    ];

    /// Canonical time budget (seconds) of this tier; resolves back to `self`.
    pub fn time_budget(self) -> u32 {
        match self {
            DifficultyTier::Easy   => 20,
            DifficultyTier::Medium => 15,
            DifficultyTier::Hard   => 12,
            DifficultyTier::Legend => 10,
        }
    }

    /// Small integer used to scale operand ranges (Easy = 1 .. Legend = 4).
    pub fn scale(self) -> u32 {
        match self {
            DifficultyTier::Easy   => 1,
            DifficultyTier::Medium => 2,
            DifficultyTier::Hard   => 3,
            DifficultyTier::Legend => 4,
        }
    }

    /// Easy and Medium keep prices, totals and speeds on multiples of 5.
    pub fn prefers_round_numbers(self) -> bool {
        matches!(self, DifficultyTier::Easy | DifficultyTier::Medium)
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyTier::Easy   => write!(f, "Easy"),
            DifficultyTier::Medium => write!(f, "Medium"),
            DifficultyTier::Hard   => write!(f, "Hard"),
            DifficultyTier::Legend => write!(f, "Legend"),
        }
    }
}

// ---------------------------------------------------------------------------
// Problem families
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "×",
            Operator::Div => "÷",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProblemFamily {
    Arithmetic(Operator),
    Percentage,
    Distance,
    Discount,
    Fraction,
    Average,
    RatioSpeed,
    Algebra,
    Geometry,
    Probability,
    Sequence,
}

impl ProblemFamily {
    /// Every word-problem family in unlock order.
    pub const WORD_FAMILIES: [ProblemFamily; 10] = [
        ProblemFamily::Percentage,
        ProblemFamily::Distance,
        ProblemFamily::Discount,
        ProblemFamily::Fraction,
        ProblemFamily::Average,
        ProblemFamily::RatioSpeed,
        ProblemFamily::Algebra,
        ProblemFamily::Geometry,
        ProblemFamily::Probability,
        ProblemFamily::Sequence,
    ];

    pub fn mode(self) -> GameMode {
        match self {
            ProblemFamily::Arithmetic(_) => GameMode::Arithmetic,
            _ => GameMode::WordProblem,
        }
    }

    /// Stable lowercase key, also accepted by `FromStr`.
    pub fn key(self) -> &'static str {
        match self {
            ProblemFamily::Arithmetic(Operator::Add) => "addition",
            ProblemFamily::Arithmetic(Operator::Sub) => "subtraction",
            ProblemFamily::Arithmetic(Operator::Mul) => "multiplication",
            ProblemFamily::Arithmetic(Operator::Div) => "division",
            ProblemFamily::Percentage  => "percentage",
            ProblemFamily::Distance    => "distance",
            ProblemFamily::Discount    => "discount",
            ProblemFamily::Fraction    => "fraction",
            ProblemFamily::Average     => "average",
            ProblemFamily::RatioSpeed  => "ratio",
            ProblemFamily::Algebra     => "algebra",
            ProblemFamily::Geometry    => "geometry",
            ProblemFamily::Probability => "probability",
            ProblemFamily::Sequence    => "sequence",
        }
    }
}

impl fmt::Display for ProblemFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProblemFamily::Arithmetic(Operator::Add) => "Addition",
            ProblemFamily::Arithmetic(Operator::Sub) => "Subtraction",
            ProblemFamily::Arithmetic(Operator::Mul) => "Multiplication",
            ProblemFamily::Arithmetic(Operator::Div) => "Division",
            ProblemFamily::Percentage  => "Percentage",
            ProblemFamily::Distance    => "Distance, Rate & Time",
            ProblemFamily::Discount    => "Money & Discounts",
            ProblemFamily::Fraction    => "Fraction Of",
            ProblemFamily::Average     => "Averages",
            ProblemFamily::RatioSpeed  => "Ratio & Speed",
            ProblemFamily::Algebra     => "Algebra",
            ProblemFamily::Geometry    => "Geometry",
            ProblemFamily::Probability => "Probability",
            ProblemFamily::Sequence    => "Sequences",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ProblemFamily {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let family = match s.trim().to_ascii_lowercase().as_str() {
            "addition" | "add" | "+"                => ProblemFamily::Arithmetic(Operator::Add),
            "subtraction" | "sub" | "-"             => ProblemFamily::Arithmetic(Operator::Sub),
            "multiplication" | "mul" | "*" | "×"    => ProblemFamily::Arithmetic(Operator::Mul),
            "division" | "div" | "/" | "÷"          => ProblemFamily::Arithmetic(Operator::Div),
            "percentage" | "percent"                => ProblemFamily::Percentage,
            "distance"                              => ProblemFamily::Distance,
            "discount" | "money"                    => ProblemFamily::Discount,
            "fraction"                              => ProblemFamily::Fraction,
            "average"                               => ProblemFamily::Average,
            "ratio" | "speed"                       => ProblemFamily::RatioSpeed,
            "algebra"                               => ProblemFamily::Algebra,
            "geometry"                              => ProblemFamily::Geometry,
            "probability"                           => ProblemFamily::Probability,
            "sequence"                              => ProblemFamily::Sequence,
            _ => return Err(QuizError::UnknownFamily(s.to_string())),
        };
        Ok(family)
    }
}

// ---------------------------------------------------------------------------
// Generated output
// ---------------------------------------------------------------------------

/// One question and its exact answer (always a multiple of 0.25).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub question: String,
    pub answer: f64,
}

impl Problem {
    pub fn new(question: impl Into<String>, answer: f64) -> Self {
        Problem { question: question.into(), answer }
    }
}

/// Exactly four distinct positive choices, one of which is the answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSet {
    values: [f64; 4],
}

impl OptionSet {
    pub(crate) fn new(values: [f64; 4]) -> Self {
        OptionSet { values }
    }

    pub fn values(&self) -> &[f64; 4] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Slot holding `value`, if any.
    pub fn position_of(&self, value: f64) -> Option<usize> {
        self.values.iter().position(|&v| v == value)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.position_of(value).is_some()
    }
}

/// What to generate: one specific family, or any family eligible for a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FamilySelector {
    Family(ProblemFamily),
    Mode(GameMode),
}

impl From<ProblemFamily> for FamilySelector {
    fn from(family: ProblemFamily) -> Self {
        FamilySelector::Family(family)
    }
}

impl From<GameMode> for FamilySelector {
    fn from(mode: GameMode) -> Self {
        FamilySelector::Mode(mode)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemRequest {
    pub selector: FamilySelector,
    pub tier: DifficultyTier,
    /// Player level, 1-based. Scales arithmetic operands and operator set.
    pub level: u32,
    pub rng_seed: Option<u64>,
}

impl ProblemRequest {
    /// Level 1, Easy, entropy-seeded.
    pub fn new(selector: impl Into<FamilySelector>) -> Self {
        ProblemRequest {
            selector: selector.into(),
            tier: DifficultyTier::Easy,
            level: 1,
            rng_seed: None,
        }
    }

    pub fn tier(mut self, tier: DifficultyTier) -> Self {
        self.tier = tier;
        self
    }

    pub fn level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedProblem {
    /// `<family prefix>-<8 hex digits>`, e.g. `PC-1A2B3C4D`.
    pub problem_id: String,
    pub family: ProblemFamily,
    pub tier: DifficultyTier,
    pub problem: Problem,
    pub options: OptionSet,
}
