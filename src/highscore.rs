//! Durable high-score persistence.
//!
//! The simulation talks to a [`ScoreStore`] port; concrete backends are
//! LocalStorage on wasm and an in-memory store for native runs and tests.
//! Failures degrade gracefully: a failed read means "no prior best", a failed
//! write is logged and forgotten so it can never stall a tick.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a score store write can surface
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("failed to encode high-score record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("storage rejected the write")]
    WriteRejected,
}

/// Persistence port for the single best-score integer
pub trait ScoreStore: std::fmt::Debug {
    /// Read the stored best score, `None` when absent or unreadable
    fn load(&self) -> Option<u32>;
    /// Persist a new best score
    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

/// Versioned record written to the backing store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreRecord {
    /// Record format version
    pub version: u32,
    /// Best score achieved
    pub best: u32,
}

impl HighScoreRecord {
    /// Current record format version
    pub const VERSION: u32 = 1;

    pub fn new(best: u32) -> Self {
        Self { version: Self::VERSION, best }
    }
}

/// In-memory store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: Option<u32>,
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Option<u32> {
        self.best
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        self.best = Some(score);
        Ok(())
    }
}

/// LocalStorage-backed store (wasm only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageScoreStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageScoreStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "meeple_drop_highscore";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageScoreStore {
    fn load(&self) -> Option<u32> {
        let storage = Self::storage()?;
        let json = storage.get_item(Self::STORAGE_KEY).ok()??;
        match serde_json::from_str::<HighScoreRecord>(&json) {
            Ok(record) => {
                log::info!("Loaded high score: {}", record.best);
                Some(record.best)
            }
            Err(e) => {
                log::warn!("Unreadable high-score record, starting fresh: {e}");
                None
            }
        }
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        let json = serde_json::to_string(&HighScoreRecord::new(score))?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| StoreError::WriteRejected)?;
        log::info!("High score saved: {score}");
        Ok(())
    }
}
