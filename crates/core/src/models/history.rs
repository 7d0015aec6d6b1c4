use serde::{Deserialize, Serialize};

/// Default number of entries kept in the stored history.
/// At an hourly schedule this is four days of data.
pub const MAX_HISTORY: usize = 96;

/// One recorded point of the rate time series.
///
/// `timestamp` is a display string (see `timestamp::format_display`),
/// not a sortable instant: entries are ordered by their position in
/// the history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    /// Official BCV USD rate.
    pub bcv: f64,
    /// Official BCV EUR rate.
    pub bcv_eur: f64,
    /// Average Binance P2P USDT price.
    pub binance: f64,
}

impl HistoryEntry {
    pub fn new(timestamp: impl Into<String>, bcv: f64, bcv_eur: f64, binance: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            bcv,
            bcv_eur,
            binance,
        }
    }

    /// The entry used as `last` when the history is empty.
    pub fn zero() -> Self {
        Self::new(String::new(), 0.0, 0.0, 0.0)
    }
}

/// Ordered list of entries, oldest first.
pub type History = Vec<HistoryEntry>;

/// Append `entry` and drop entries from the front until at most `max`
/// remain.
pub fn append_capped(history: &mut History, entry: HistoryEntry, max: usize) {
    history.push(entry);
    if history.len() > max {
        let excess = history.len() - max;
        history.drain(..excess);
    }
}

/// Final and second-to-last entries. When there is a single entry it is
/// returned for both positions.
pub fn last_two(history: &[HistoryEntry]) -> Option<(&HistoryEntry, &HistoryEntry)> {
    let last = history.last()?;
    let prev = history
        .len()
        .checked_sub(2)
        .and_then(|i| history.get(i))
        .unwrap_or(last);
    Some((last, prev))
}
