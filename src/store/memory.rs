use std::sync::Mutex;

use crate::error::StoreError;
use crate::store::{
    identity::Identity,
    models::{ProfileSummary, ScoreBook, SessionSummary},
    ScoreStore,
};

/// Score store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    book: Mutex<ScoreBook>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn save_session_summary(
        &self,
        identity: &Identity,
        summary: &SessionSummary,
    ) -> Result<(), StoreError> {
        let mut book = self.book.lock().map_err(|_| StoreError::Poisoned)?;
        book.record(identity, summary);
        Ok(())
    }

    fn leaderboard(&self, limit: usize) -> Result<Vec<ProfileSummary>, StoreError> {
        let book = self.book.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(book.leaderboard(limit))
    }

    fn user_scores(&self, user_id: &str) -> Result<Vec<SessionSummary>, StoreError> {
        let book = self.book.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(book.user_scores(user_id))
    }
}
