use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::problem_engine::models::GameMode;
use crate::store::identity::Identity;

/// What a finished session reports to the score store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u64,
    pub level_reached: u32,
    pub best_combo: u32,
    pub mode: GameMode,
    pub time_budget: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub duration_seconds: u64,
    pub finished_at: DateTime<Utc>,
}

impl SessionSummary {
    /// Share of correct answers in percent; 0 for an empty session.
    pub fn accuracy(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        f64::from(self.correct_answers) * 100.0 / f64::from(self.total_questions)
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub display_name: String,
    pub best_score: u64,
    pub best_level: u32,
    pub best_combo: u32,
    pub total_games_played: u32,
    pub accuracy_percentage: f64,
}

/// Per-user aggregate over every saved session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub display_name: String,
    pub total_games_played: u32,
    pub total_time_played: u64,
    pub best_score: u64,
    pub best_level: u32,
    pub best_combo: u32,
    pub total_questions: u64,
    pub correct_answers: u64,
    /// Store sequence number of the save that set `best_score`.
    pub best_score_seq: u64,
}

impl UserProfile {
    fn new(identity: &Identity) -> Self {
        UserProfile {
            user_id: identity.user_id.clone(),
            display_name: identity.display_name.clone(),
            total_games_played: 0,
            total_time_played: 0,
            best_score: 0,
            best_level: 0,
            best_combo: 0,
            total_questions: 0,
            correct_answers: 0,
            best_score_seq: 0,
        }
    }

    fn absorb(&mut self, summary: &SessionSummary, seq: u64) {
        if self.total_games_played == 0 || summary.score > self.best_score {
            self.best_score = summary.score;
            self.best_score_seq = seq;
        }
        self.total_games_played += 1;
        self.total_time_played += summary.duration_seconds;
        self.best_level = self.best_level.max(summary.level_reached);
        self.best_combo = self.best_combo.max(summary.best_combo);
        self.total_questions += u64::from(summary.total_questions);
        self.correct_answers += u64::from(summary.correct_answers);
    }

    pub fn accuracy_percentage(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        self.correct_answers as f64 * 100.0 / self.total_questions as f64
    }

    pub fn to_summary(&self) -> ProfileSummary {
        ProfileSummary {
            display_name: self.display_name.clone(),
            best_score: self.best_score,
            best_level: self.best_level,
            best_combo: self.best_combo,
            total_games_played: self.total_games_played,
            accuracy_percentage: self.accuracy_percentage(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub seq: u64,
    pub user_id: String,
    pub summary: SessionSummary,
}

/// Everything a store persists: raw scores plus the derived profiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreBook {
    pub next_seq: u64,
    pub profiles: BTreeMap<String, UserProfile>,
    pub scores: Vec<ScoreRecord>,
}

impl ScoreBook {
    pub fn record(&mut self, identity: &Identity, summary: &SessionSummary) {
        let seq = self.next_seq;
        self.next_seq += 1;

        let profile = self
            .profiles
            .entry(identity.user_id.clone())
            .or_insert_with(|| UserProfile::new(identity));
        profile.display_name = identity.display_name.clone();
        profile.absorb(summary, seq);

        self.scores.push(ScoreRecord {
            seq,
            user_id: identity.user_id.clone(),
            summary: summary.clone(),
        });
    }

    /// Best score first; ties go to whoever reached that score earlier.
    pub fn leaderboard(&self, limit: usize) -> Vec<ProfileSummary> {
        let mut ranked: Vec<&UserProfile> = self.profiles.values().collect();
        ranked.sort_by(|a, b| {
            b.best_score
                .cmp(&a.best_score)
                .then(a.best_score_seq.cmp(&b.best_score_seq))
        });
        ranked.into_iter().take(limit).map(UserProfile::to_summary).collect()
    }

    /// A user's sessions, newest first.
    pub fn user_scores(&self, user_id: &str) -> Vec<SessionSummary> {
        self.scores
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.summary.clone())
            .collect()
    }
}
