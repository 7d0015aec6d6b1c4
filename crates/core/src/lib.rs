pub mod errors;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;
pub mod timestamp;

use std::sync::{Arc, RwLock};

use chrono::Utc;
use tracing::info;

use errors::CoreError;
use models::{
    history::History,
    rates::{OfficialRates, UpdateOutcome},
    settings::Settings,
    snapshot::Snapshot,
};
use providers::registry::RateSources;
use services::{aggregator_service::AggregatorService, projector_service::ProjectorService};
use storage::{
    kv::KeyValueStore,
    manager::{HistoryRead, HistoryStore},
};

/// Main entry point for the exchange rates core library.
///
/// Owns the history store adapter, the aggregator that feeds it and the
/// snapshot currently being served. Share it behind an `Arc` between the
/// scheduled trigger and the read endpoint.
#[must_use]
pub struct RatesTracker {
    settings: Settings,
    store: HistoryStore,
    aggregator: AggregatorService,
    projector: ProjectorService,
    snapshot: RwLock<Snapshot>,
}

impl std::fmt::Debug for RatesTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot.read().unwrap_or_else(|e| e.into_inner());
        f.debug_struct("RatesTracker")
            .field("history_key", &self.store.key())
            .field("max_history", &self.settings.max_history)
            .field("timezone", &self.settings.timezone)
            .field("last_updated", &snapshot.last_updated)
            .finish()
    }
}

impl RatesTracker {
    /// Build a tracker backed by `store`, using the default DolarVzla and
    /// Binance P2P providers.
    pub fn new(settings: Settings, store: Arc<dyn KeyValueStore>) -> Result<Self, CoreError> {
        let sources = RateSources::new_with_defaults(&settings);
        Self::with_sources(settings, store, sources)
    }

    /// Build a tracker with explicit rate sources.
    pub fn with_sources(
        settings: Settings,
        store: Arc<dyn KeyValueStore>,
        sources: RateSources,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        let tz = settings.tz()?;
        let history_store = HistoryStore::new(store, settings.history_key.clone());
        let aggregator =
            AggregatorService::new(sources, history_store.clone(), settings.max_history, tz);

        Ok(Self {
            settings,
            store: history_store,
            aggregator,
            projector: ProjectorService::new(),
            snapshot: RwLock::new(Snapshot::default()),
        })
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Fetchers ────────────────────────────────────────────────────

    /// Current Binance P2P rate, `None` if the fetch failed.
    pub async fn fetch_market_rate(&self) -> Option<f64> {
        self.aggregator.fetch_market_rate().await
    }

    /// Current official USD/EUR rates, `None` if the fetch failed.
    pub async fn fetch_official_rates(&self) -> Option<OfficialRates> {
        self.aggregator.fetch_official_rates().await
    }

    // ── History ─────────────────────────────────────────────────────

    /// Stored history; empty when nothing is stored or the store fails.
    pub async fn read_history(&self) -> History {
        self.store.read_history().await
    }

    /// Stored history, keeping "empty" and "store unavailable" apart.
    pub async fn read_history_status(&self) -> HistoryRead {
        self.store.read().await
    }

    /// Best-effort history write.
    pub async fn write_history(&self, history: &History) {
        self.store.write_history(history).await;
    }

    // ── Pipeline ────────────────────────────────────────────────────

    /// Fetch both sources and append one entry to the stored history.
    pub async fn update_and_store_rates(&self) -> UpdateOutcome {
        self.aggregator.update_and_store_rates().await
    }

    /// Recompute the served snapshot from storage.
    ///
    /// On a cold start (no stored history) one aggregator pass runs first
    /// to seed the history, so this can make outbound calls.
    pub async fn load_rates_from_storage(&self) -> Snapshot {
        let mut history = self.store.read_history().await;
        if history.is_empty() {
            info!("No stored history, running an initial fetch");
            self.aggregator.update_and_store_rates().await;
            history = self.store.read_history().await;
        }

        let mut snapshot = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        let next = self.projector.project(&snapshot, &history, Utc::now());
        *snapshot = next.clone();
        next
    }

    /// The snapshot computed by the last `load_rates_from_storage` call
    /// (the empty default before the first one).
    #[must_use]
    pub fn get_rates(&self) -> Snapshot {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
