use serde::{Deserialize, Serialize};

/// Misses allowed before the session ends.
pub const STRIKE_LIMIT: u32 = 3;
/// Score interval that earns a level.
pub const LEVEL_STEP: u64 = 1000;

const BASE_POINTS: u64 = 150;
const COMBO_BONUS: u64 = 100;
const LEVEL_BONUS: u64 = 25;
const TIME_BONUS: u64 = 10;

/// Score, strikes, level and combo for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u64,
    pub strikes: u32,
    pub strike_limit: u32,
    pub level: u32,
    pub combo: u32,
    pub best_combo: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState {
            score: 0,
            strikes: 0,
            strike_limit: STRIKE_LIMIT,
            level: 1,
            combo: 0,
            best_combo: 0,
        }
    }
}

impl SessionState {
    /// `150 + (combo / 5)·100 + level·25 + seconds_left·10`, using the streak
    /// before this answer.
    pub fn points_for(&self, seconds_left: u32) -> u64 {
        BASE_POINTS
            + u64::from(self.combo / 5) * COMBO_BONUS
            + u64::from(self.level) * LEVEL_BONUS
            + u64::from(seconds_left) * TIME_BONUS
    }

    /// Apply a correct answer. Returns the points awarded and whether the
    /// score crossed a multiple of [`LEVEL_STEP`].
    pub fn record_correct(&mut self, seconds_left: u32) -> (u64, bool) {
        let points = self.points_for(seconds_left);
        let before = self.score;
        self.score += points;
        self.combo += 1;
        self.best_combo = self.best_combo.max(self.combo);

        let leveled_up = self.score / LEVEL_STEP > before / LEVEL_STEP;
        if leveled_up {
            self.level += 1;
        }
        (points, leveled_up)
    }

    /// Apply a wrong answer or timeout. Returns true when this strike ends
    /// the session.
    pub fn record_miss(&mut self) -> bool {
        self.best_combo = self.best_combo.max(self.combo);
        self.combo = 0;
        self.strikes += 1;
        self.is_over()
    }

    pub fn is_over(&self) -> bool {
        self.strikes >= self.strike_limit
    }
}
