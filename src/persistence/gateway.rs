use tracing::{info, warn};

use super::store::HighScoreStore;

/// Best-effort access to the persisted high score
///
/// Wraps a [`HighScoreStore`] so that gameplay never sees a storage error:
/// a failed load reads as 0, a failed save is dropped. The last failure is
/// kept as a warning the host may show.
pub struct HighScoreGateway<S> {
    store: S,
    last_warning: Option<String>,
}

impl<S: HighScoreStore> HighScoreGateway<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            last_warning: None,
        }
    }

    /// Stored high score, or 0 when nothing is stored or storage fails
    pub fn load(&mut self) -> u32 {
        match self.store.load() {
            Ok(Some(high_score)) => {
                info!(high_score, "loaded high score");
                high_score
            }
            Ok(None) => 0,
            Err(e) => {
                warn!("High score unavailable, starting from 0: {:#}", e);
                self.last_warning = Some(format!("High score could not be loaded: {e}"));
                0
            }
        }
    }

    /// Persist a new high score, returns whether it was written
    pub fn save(&mut self, high_score: u32) -> bool {
        match self.store.save(high_score) {
            Ok(()) => {
                info!(high_score, "saved high score");
                true
            }
            Err(e) => {
                warn!("Failed to save high score {}: {:#}", high_score, e);
                self.last_warning = Some(format!("High score could not be saved: {e}"));
                false
            }
        }
    }

    /// Most recent storage failure, if any
    pub fn last_warning(&self) -> Option<&str> {
        self.last_warning.as_deref()
    }

    /// Take the pending warning, clearing it
    pub fn take_warning(&mut self) -> Option<String> {
        self.last_warning.take()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
