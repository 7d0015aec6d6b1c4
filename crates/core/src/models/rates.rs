use serde::{Deserialize, Serialize};

/// Official reference rates (bolívares per unit of foreign currency).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OfficialRates {
    pub usd: f64,
    pub eur: f64,
}

/// What one aggregator run did.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// A new entry was appended and the history written back.
    Stored {
        entry: super::history::HistoryEntry,
        history_len: usize,
    },
    /// Both sources were unavailable; nothing was written.
    Skipped,
}

impl UpdateOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, UpdateOutcome::Stored { .. })
    }
}
