//! Score persistence and leaderboard collaborators.
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Session summaries, per-user profiles, leaderboard rows |
//! | `identity`  | Who is signed in |
//! | `memory`    | In-process store |
//! | `json_file` | Single-file JSON store |

pub mod identity;
pub mod json_file;
pub mod memory;
pub mod models;

use tracing::{info, warn};

use crate::error::StoreError;
use identity::{Identity, IdentityProvider};
use models::{ProfileSummary, SessionSummary};

pub trait ScoreStore: Send + Sync {
    fn save_session_summary(
        &self,
        identity: &Identity,
        summary: &SessionSummary,
    ) -> Result<(), StoreError>;

    /// At most `limit` profiles, best score first.
    fn leaderboard(&self, limit: usize) -> Result<Vec<ProfileSummary>, StoreError>;

    /// Sessions saved by `user_id`, newest first.
    fn user_scores(&self, user_id: &str) -> Result<Vec<SessionSummary>, StoreError>;
}

/// Save `summary` for the signed-in player.
///
/// Failures are logged and returned but never touch the finished session:
/// its score is final once the game is over.
pub fn record_session(
    identity: &dyn IdentityProvider,
    store: &dyn ScoreStore,
    summary: &SessionSummary,
) -> Result<(), StoreError> {
    if !identity.is_authenticated() {
        info!("not signed in, session summary not saved");
        return Err(StoreError::NotAuthenticated);
    }
    let who = identity.current().ok_or(StoreError::NotAuthenticated)?;
    match store.save_session_summary(&who, summary) {
        Ok(()) => {
            info!(user = %who.user_id, score = summary.score, "session summary saved");
            Ok(())
        }
        Err(err) => {
            warn!(user = %who.user_id, error = %err, "failed to save session summary");
            Err(err)
        }
    }
}
