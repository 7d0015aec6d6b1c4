use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::models::history::{append_capped, HistoryEntry};
use crate::models::rates::{OfficialRates, UpdateOutcome};
use crate::providers::registry::RateSources;
use crate::storage::manager::HistoryStore;
use crate::timestamp;

/// Fetches both rate sources and appends one merged entry to the stored
/// history.
///
/// Each source fails independently. A missing value is carried forward
/// from the previous entry; if both sources are missing the run is a
/// no-op. Runs on the same aggregator are serialized so two overlapping
/// triggers cannot interleave their read-modify-write of the history.
pub struct AggregatorService {
    sources: RateSources,
    store: HistoryStore,
    max_history: usize,
    tz: Tz,
    update_lock: Mutex<()>,
}

impl AggregatorService {
    pub fn new(sources: RateSources, store: HistoryStore, max_history: usize, tz: Tz) -> Self {
        Self {
            sources,
            store,
            max_history,
            tz,
            update_lock: Mutex::new(()),
        }
    }

    /// Market rate, or `None` (logged) on any failure.
    pub async fn fetch_market_rate(&self) -> Option<f64> {
        let provider = &self.sources.market;
        match provider.fetch_market_rate().await {
            Ok(rate) => Some(rate),
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "Error fetching market rate");
                None
            }
        }
    }

    /// Official USD/EUR rates, or `None` (logged) on any failure.
    pub async fn fetch_official_rates(&self) -> Option<OfficialRates> {
        let provider = &self.sources.official;
        match provider.fetch_official_rates().await {
            Ok(rates) => Some(rates),
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "Error fetching official rates");
                None
            }
        }
    }

    /// Fetch, merge and store one entry stamped with the current time.
    pub async fn update_and_store_rates(&self) -> UpdateOutcome {
        self.update_and_store_rates_at(Utc::now()).await
    }

    /// Same as `update_and_store_rates`, with the entry stamped at `now`.
    pub async fn update_and_store_rates_at(&self, now: DateTime<Utc>) -> UpdateOutcome {
        let _guard = self.update_lock.lock().await;
        info!("Updating and storing rates");

        let (market, official) =
            tokio::join!(self.fetch_market_rate(), self.fetch_official_rates());

        let mut history = self.store.read_history().await;
        let last = history.last().cloned().unwrap_or_else(HistoryEntry::zero);

        let stamp = timestamp::format_display(now, self.tz);
        let Some(entry) = merge_entry(&last, official, market, stamp) else {
            info!("All rate fetches failed, skipping update");
            return UpdateOutcome::Skipped;
        };

        append_capped(&mut history, entry.clone(), self.max_history);
        self.store.write_history(&history).await;
        info!(
            entries = history.len(),
            bcv = entry.bcv,
            bcv_eur = entry.bcv_eur,
            binance = entry.binance,
            "Rates updated in store"
        );

        UpdateOutcome::Stored {
            entry,
            history_len: history.len(),
        }
    }
}

/// Build the next history entry from fresh fetch results.
///
/// Fields whose source failed keep the value from `last`. Returns `None`
/// when neither source produced anything, since the entry would only
/// duplicate `last`.
pub fn merge_entry(
    last: &HistoryEntry,
    official: Option<OfficialRates>,
    market: Option<f64>,
    timestamp: String,
) -> Option<HistoryEntry> {
    if official.is_none() && market.is_none() {
        return None;
    }

    Some(HistoryEntry {
        timestamp,
        bcv: official.map_or(last.bcv, |r| r.usd),
        bcv_eur: official.map_or(last.bcv_eur, |r| r.eur),
        binance: market.unwrap_or(last.binance),
    })
}
