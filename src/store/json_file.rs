use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::StoreError;
use crate::store::{
    identity::Identity,
    models::{ProfileSummary, ScoreBook, SessionSummary},
    ScoreStore,
};

/// Score store backed by a single JSON document on disk.
///
/// The whole book is read, updated and rewritten on every save. Writes go to
/// a sibling temp file first and are renamed into place.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<ScoreBook, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(ScoreBook::default()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(ScoreBook::default()),
            Err(source) => Err(StoreError::Io { path: self.path.clone(), source }),
        }
    }

    fn write(&self, book: &ScoreBook) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(book)?).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        debug!(path = %self.path.display(), scores = book.scores.len(), "score file written");
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn save_session_summary(
        &self,
        identity: &Identity,
        summary: &SessionSummary,
    ) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut book = self.load()?;
        book.record(identity, summary);
        self.write(&book)
    }

    fn leaderboard(&self, limit: usize) -> Result<Vec<ProfileSummary>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.load()?.leaderboard(limit))
    }

    fn user_scores(&self, user_id: &str) -> Result<Vec<SessionSummary>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.load()?.user_scores(user_id))
    }
}
