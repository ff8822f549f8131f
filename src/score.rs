//! Score ledger
//!
//! Run score, item score and best score. The ledger only tracks values;
//! writing a new best to durable storage is the host's job (see
//! `persistence::BestScoreStore`), triggered by `maybe_update_best`
//! returning true.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    score: u32,
    item_score: u32,
    best: u32,
}

impl ScoreLedger {
    /// Start a ledger with the best score read from storage
    pub fn with_best(best: u32) -> Self {
        Self {
            score: 0,
            item_score: 0,
            best,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn item_score(&self) -> u32 {
        self.item_score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn add_score(&mut self, n: u32) -> u32 {
        self.score = self.score.saturating_add(n);
        self.score
    }

    pub fn add_item_score(&mut self, n: u32) -> u32 {
        self.item_score = self.item_score.saturating_add(n);
        self.item_score
    }

    /// Raise the best score to `candidate` if it is higher.
    /// Returns true when the best changed and should be persisted.
    pub fn maybe_update_best(&mut self, candidate: u32) -> bool {
        if candidate > self.best {
            self.best = candidate;
            true
        } else {
            false
        }
    }

    /// Clear the run counters, keeping the best
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.item_score = 0;
    }
}
