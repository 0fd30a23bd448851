//! Round lifecycle: `Playing` until the strike limit, then `GameOver`.
//!
//! One round is in flight at a time. Each round has an id and every
//! resolution (answer or timeout) must name it. A resolution for a round that
//! is no longer current is rejected, so a late timeout can never strike a
//! round the player already answered.

use std::time::{Duration, Instant};

use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::QuizError;
use crate::problem_engine::{
    choose_family, next_problem, round_duration, DifficultyTier, GeneratedProblem,
};
use crate::session::state::SessionState;
use crate::store::models::SessionSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    GameOver,
}

/// A problem on screen, waiting for a selection or its countdown.
#[derive(Debug, Clone)]
pub struct Round {
    pub id: u64,
    pub generated: GeneratedProblem,
    pub time_limit: Duration,
}

impl Round {
    pub fn answer(&self) -> f64 {
        self.generated.problem.answer
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoundOutcome {
    Correct { points: u64, leveled_up: bool },
    Incorrect { correct_answer: f64 },
    TimedOut { correct_answer: f64 },
}

impl RoundOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, RoundOutcome::Correct { .. })
    }
}

/// How a round resolved. `summary` is set on the round that ends the game
/// and only on that one.
#[derive(Debug, Clone)]
pub struct RoundReport {
    pub round_id: u64,
    pub outcome: RoundOutcome,
    pub state: SessionState,
    pub summary: Option<SessionSummary>,
}

pub struct Session {
    config: GameConfig,
    tier: DifficultyTier,
    state: SessionState,
    phase: GamePhase,
    rng: StdRng,
    next_round_id: u64,
    current: Option<Round>,
    total_questions: u32,
    correct_answers: u32,
    started: Instant,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let tier = config.tier();
        info!(mode = %config.mode, tier = %tier, budget = config.time_budget, "session started");
        Session {
            config,
            tier,
            state: SessionState::default(),
            phase: GamePhase::Playing,
            rng,
            next_round_id: 1,
            current: None,
            total_questions: 0,
            correct_answers: 0,
            started: Instant::now(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.current.as_ref()
    }

    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    /// Generate the next problem and put it in flight.
    pub fn start_round(&mut self) -> Result<Round, QuizError> {
        if self.phase == GamePhase::GameOver {
            return Err(QuizError::GameOver);
        }
        if let Some(round) = &self.current {
            return Err(QuizError::RoundInFlight(round.id));
        }

        let level = self.state.level;
        let family = choose_family(&mut self.rng, self.config.mode, self.tier, level);
        let generated = next_problem(&mut self.rng, family, self.tier, level);
        let round = Round {
            id: self.next_round_id,
            generated,
            time_limit: round_duration(self.config.mode, self.config.time_budget),
        };
        self.next_round_id += 1;

        debug!(
            round_id = round.id,
            problem_id = %round.generated.problem_id,
            family = %family,
            level,
            "round started"
        );
        self.current = Some(round.clone());
        Ok(round)
    }

    /// Resolve the current round with the player's choice. `seconds_left` is
    /// capped at the round's time limit.
    pub fn submit_answer(
        &mut self,
        round_id: u64,
        selected: f64,
        seconds_left: u32,
    ) -> Result<RoundReport, QuizError> {
        let round = self.take_round(round_id)?;
        let limit = u32::try_from(round.time_limit.as_secs()).unwrap_or(u32::MAX);
        let seconds_left = seconds_left.min(limit);

        let outcome = if (selected - round.answer()).abs() < 1e-9 {
            let (points, leveled_up) = self.state.record_correct(seconds_left);
            self.correct_answers += 1;
            if leveled_up {
                info!(level = self.state.level, score = self.state.score, "level up");
            }
            RoundOutcome::Correct { points, leveled_up }
        } else {
            self.state.record_miss();
            RoundOutcome::Incorrect { correct_answer: round.answer() }
        };
        Ok(self.finish_round(round.id, outcome))
    }

    /// Resolve the current round as a timeout.
    pub fn time_out(&mut self, round_id: u64) -> Result<RoundReport, QuizError> {
        let round = self.take_round(round_id)?;
        self.state.record_miss();
        Ok(self.finish_round(round.id, RoundOutcome::TimedOut { correct_answer: round.answer() }))
    }

    /// Start over with the same config; the rng stream carries on.
    pub fn reset(&mut self) {
        self.state = SessionState::default();
        self.phase = GamePhase::Playing;
        self.current = None;
        self.total_questions = 0;
        self.correct_answers = 0;
        self.started = Instant::now();
        debug!("session reset");
    }

    fn take_round(&mut self, round_id: u64) -> Result<Round, QuizError> {
        if self.phase == GamePhase::GameOver {
            return Err(QuizError::GameOver);
        }
        let current = self.current.as_ref().ok_or(QuizError::NoActiveRound)?.id;
        if current != round_id {
            return Err(QuizError::StaleRound { got: round_id, current });
        }
        self.current.take().ok_or(QuizError::NoActiveRound)
    }

    fn finish_round(&mut self, round_id: u64, outcome: RoundOutcome) -> RoundReport {
        self.total_questions += 1;
        debug!(
            round_id,
            correct = outcome.is_correct(),
            score = self.state.score,
            strikes = self.state.strikes,
            "round resolved"
        );

        let summary = if self.state.is_over() {
            self.phase = GamePhase::GameOver;
            let summary = self.summary();
            info!(
                score = summary.score,
                level = summary.level_reached,
                questions = summary.total_questions,
                "game over"
            );
            Some(summary)
        } else {
            None
        };

        RoundReport { round_id, outcome, state: self.state.clone(), summary }
    }

    fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.state.score,
            level_reached: self.state.level,
            best_combo: self.state.best_combo,
            mode: self.config.mode,
            time_budget: self.config.time_budget,
            total_questions: self.total_questions,
            correct_answers: self.correct_answers,
            duration_seconds: self.started.elapsed().as_secs(),
            finished_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem_engine::GameMode;

    fn session(mode: GameMode, seed: u64) -> Session {
        Session::new(GameConfig::new(mode, 20).seed(seed))
    }

    fn wrong_option(round: &Round) -> f64 {
        round
            .generated
            .options
            .iter()
            .find(|&v| v != round.answer())
            .expect("option sets hold three distractors")
    }

    #[test]
    fn three_strikes_end_the_game_with_one_summary() {
        let mut s = session(GameMode::Arithmetic, 7);
        let mut summaries = Vec::new();
        let mut misses = 0;

        for i in 0.. {
            let round = s.start_round().unwrap();
            let report = if i % 2 == 0 {
                s.submit_answer(round.id, round.answer(), 5).unwrap()
            } else if i % 3 == 0 {
                misses += 1;
                s.time_out(round.id).unwrap()
            } else {
                misses += 1;
                s.submit_answer(round.id, wrong_option(&round), 5).unwrap()
            };
            summaries.extend(report.summary);
            if s.phase() == GamePhase::GameOver {
                break;
            }
        }

        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(misses, 3);
        assert_eq!(summary.total_questions, summary.correct_answers + misses);
        assert_eq!(summary.mode, GameMode::Arithmetic);
        assert!(matches!(s.start_round(), Err(QuizError::GameOver)));
    }

    #[test]
    fn correct_answer_scores_and_builds_combo() {
        let mut s = session(GameMode::Arithmetic, 1);
        let round = s.start_round().unwrap();
        let report = s.submit_answer(round.id, round.answer(), 4).unwrap();

        assert_eq!(report.outcome, RoundOutcome::Correct { points: 150 + 25 + 40, leveled_up: false });
        assert_eq!(report.state.combo, 1);
        assert!(report.summary.is_none());
    }

    #[test]
    fn seconds_left_is_capped_by_the_round() {
        let mut s = session(GameMode::Arithmetic, 2);
        let round = s.start_round().unwrap();
        let report = s.submit_answer(round.id, round.answer(), 999).unwrap();
        // budget 20s
        assert_eq!(report.outcome, RoundOutcome::Correct { points: 150 + 25 + 200, leveled_up: false });
    }

    #[test]
    fn only_one_round_in_flight() {
        let mut s = session(GameMode::WordProblem, 3);
        let round = s.start_round().unwrap();
        assert!(matches!(s.start_round(), Err(QuizError::RoundInFlight(id)) if id == round.id));
    }

    #[test]
    fn late_timeout_cannot_strike_an_answered_round() {
        let mut s = session(GameMode::Arithmetic, 4);
        let first = s.start_round().unwrap();
        s.submit_answer(first.id, first.answer(), 3).unwrap();

        assert!(matches!(s.time_out(first.id), Err(QuizError::NoActiveRound)));

        let second = s.start_round().unwrap();
        assert!(matches!(
            s.time_out(first.id),
            Err(QuizError::StaleRound { got, current }) if got == first.id && current == second.id
        ));
        assert_eq!(s.state().strikes, 0);
    }

    #[test]
    fn word_rounds_get_the_longer_countdown() {
        let mut s = Session::new(GameConfig::new(GameMode::WordProblem, 10).seed(5));
        assert_eq!(s.tier(), DifficultyTier::Legend);
        let round = s.start_round().unwrap();
        assert_eq!(round.time_limit, Duration::from_secs(20));
    }

    #[test]
    fn same_seed_same_rounds() {
        let mut a = session(GameMode::WordProblem, 99);
        let mut b = session(GameMode::WordProblem, 99);
        for _ in 0..5 {
            let ra = a.start_round().unwrap();
            let rb = b.start_round().unwrap();
            assert_eq!(ra.generated.problem_id, rb.generated.problem_id);
            assert_eq!(ra.generated.problem, rb.generated.problem);
            a.submit_answer(ra.id, ra.answer(), 1).unwrap();
            b.submit_answer(rb.id, rb.answer(), 1).unwrap();
        }
    }

    #[test]
    fn reset_starts_a_fresh_game() {
        let mut s = session(GameMode::Arithmetic, 6);
        for _ in 0..3 {
            let round = s.start_round().unwrap();
            s.time_out(round.id).unwrap();
        }
        assert_eq!(s.phase(), GamePhase::GameOver);

        s.reset();
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.state(), &SessionState::default());
        assert_eq!(s.total_questions(), 0);
        assert!(s.start_round().is_ok());
    }
}
