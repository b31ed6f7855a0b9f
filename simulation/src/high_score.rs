//! Persistence seam for the best score across sessions.

use std::io;

use thiserror::Error;

/// Storage for the best score ever reached.
pub trait HighScoreStore {
    /// Reads the stored high score. An empty store reports zero.
    ///
    /// # Errors
    ///
    /// Returns [`HighScoreError`] when the underlying storage cannot be read.
    fn load(&mut self) -> Result<u32, HighScoreError>;

    /// Replaces the stored high score.
    ///
    /// # Errors
    ///
    /// Returns [`HighScoreError`] when the underlying storage cannot be written.
    fn save(&mut self, score: u32) -> Result<(), HighScoreError>;
}

/// Failures raised by high-score storage.
#[derive(Debug, Error)]
pub enum HighScoreError {
    /// The backing storage could not be accessed.
    #[error("high score storage is unavailable: {0}")]
    Io(#[from] io::Error),
    /// The stored record could not be understood.
    #[error("high score record is malformed: {reason}")]
    Malformed {
        /// Description of the parsing failure.
        reason: String,
    },
}

/// Volatile store used by tests and by sessions that opt out of persistence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InMemoryHighScoreStore {
    best: u32,
    saves: u32,
}

impl InMemoryHighScoreStore {
    /// Creates a store that already remembers the provided score.
    #[must_use]
    pub const fn with_score(best: u32) -> Self {
        Self { best, saves: 0 }
    }

    /// Score currently held by the store.
    #[must_use]
    pub const fn best(&self) -> u32 {
        self.best
    }

    /// Number of times the store has been written.
    #[must_use]
    pub const fn saves(&self) -> u32 {
        self.saves
    }
}

impl HighScoreStore for InMemoryHighScoreStore {
    fn load(&mut self) -> Result<u32, HighScoreError> {
        Ok(self.best)
    }

    fn save(&mut self, score: u32) -> Result<(), HighScoreError> {
        self.best = score;
        self.saves += 1;
        Ok(())
    }
}
